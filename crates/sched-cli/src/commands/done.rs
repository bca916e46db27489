use anyhow::Result;
use owo_colors::{OwoColorize, Style};
use sched_core::date::format_date;
use sched_core::models::CompletionResult;
use sched_core::repository::TaskRepository;

use crate::cli::DoneCommand;
use crate::util::resolve_task_id;

pub async fn done_task(repo: &impl TaskRepository, command: DoneCommand) -> Result<()> {
    let task_id = resolve_task_id(repo, &command.id).await?;
    let success_style = Style::new().green().bold();

    match repo.complete_task(task_id).await? {
        CompletionResult::Deleted(task) => {
            println!("{} Done: '{}' (removed)", "✓".style(success_style), task.title);
        }
        CompletionResult::Rescheduled {
            task,
            previous_date,
        } => {
            println!(
                "{} Done: '{}', next on {} (was {})",
                "✓".style(success_style),
                task.title,
                format_date(task.date).cyan(),
                format_date(previous_date)
            );
        }
    }

    Ok(())
}
