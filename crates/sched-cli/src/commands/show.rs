use anyhow::Result;
use chrono::Utc;
use sched_core::error::CoreError;
use sched_core::repository::TaskRepository;

use crate::cli::ShowCommand;
use crate::util::resolve_task_id;
use crate::views::table::display_task_details;

pub async fn show_task(repo: &impl TaskRepository, command: ShowCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let task = repo
        .find_task_by_id(task_id)
        .await?
        .ok_or_else(|| CoreError::NotFound(task_id.to_string()))?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&task)?);
    } else {
        display_task_details(&task, Utc::now().date_naive());
    }
    Ok(())
}
