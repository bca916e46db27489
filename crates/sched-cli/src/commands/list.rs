use anyhow::Result;
use chrono::Utc;
use sched_core::repository::TaskRepository;

use crate::cli::ListCommand;
use crate::config::Config;
use crate::views::table::display_tasks;

pub async fn list_tasks(repo: &impl TaskRepository, command: ListCommand, config: &Config) -> Result<()> {
    let limit = command.limit.unwrap_or(config.list_limit);
    let tasks = repo.list_tasks(limit, command.search.as_deref()).await?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&tasks)?);
    } else {
        display_tasks(&tasks, Utc::now().date_naive());
    }

    Ok(())
}
