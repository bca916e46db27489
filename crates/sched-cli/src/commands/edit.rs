use anyhow::{bail, Result};
use chrono::Utc;
use owo_colors::OwoColorize;
use sched_core::date::format_date;
use sched_core::models::UpdateTaskData;
use sched_core::repository::TaskRepository;

use crate::cli::EditCommand;
use crate::parser::parse_date_input;
use crate::util::resolve_task_id;

pub async fn edit_task(repo: &impl TaskRepository, command: EditCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;

    let date = if command.date_clear {
        Some(None)
    } else if let Some(date_str) = command.date {
        Some(Some(parse_date_input(&date_str, Utc::now())?))
    } else {
        None
    };

    let comment = if command.comment_clear {
        Some(None)
    } else {
        command.comment.map(Some)
    };

    let repeat = if command.repeat_clear {
        Some(None)
    } else {
        command.repeat.map(Some)
    };

    let update_data = UpdateTaskData {
        title: command.title,
        date,
        comment,
        repeat,
    };

    if update_data.title.is_none()
        && update_data.comment.is_none()
        && !update_data.affects_schedule()
    {
        bail!("Nothing to change. Pass at least one of --title, --date, --comment or --repeat.");
    }

    let task = repo.update_task(task_id, update_data).await?;
    println!(
        "Task '{}' updated, due {}.",
        task.title.bold(),
        format_date(task.date).cyan()
    );
    Ok(())
}
