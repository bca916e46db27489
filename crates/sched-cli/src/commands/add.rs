use anyhow::Result;
use chrono::Utc;
use owo_colors::{OwoColorize, Style};
use sched_core::date::format_date;
use sched_core::models::NewTaskData;
use sched_core::repository::TaskRepository;

use crate::cli::AddCommand;
use crate::parser::parse_date_input;
use crate::util::short_id;
use crate::views::table::describe_repeat;

pub async fn add_task(repo: &impl TaskRepository, command: AddCommand) -> Result<()> {
    let date = command
        .date
        .as_deref()
        .map(|d| parse_date_input(d, Utc::now()))
        .transpose()?;

    let new_task_data = NewTaskData {
        title: command.title,
        date,
        comment: command.comment,
        repeat: command.repeat,
    };

    let added_task = repo.add_task(new_task_data).await?;

    let success_style = Style::new().green().bold();
    let info_style = Style::new().blue();
    let subtle_style = Style::new().bright_black();

    let label = if added_task.is_recurring() {
        "Created recurring task:"
    } else {
        "Created task:"
    };
    println!(
        "{} {} {}",
        "✓".style(success_style),
        label,
        added_task.title.bright_white().bold()
    );
    println!(
        "  {} Task ID: {}",
        "→".style(info_style),
        added_task.id.to_string().yellow()
    );
    println!(
        "  {} Due: {}",
        "→".style(info_style),
        format_date(added_task.date).cyan()
    );
    if let Some(repeat) = added_task.repeat.as_deref() {
        println!("  {} Repeats: {}", "→".style(info_style), describe_repeat(repeat));
    }

    println!(
        "   {} Mark done: sched done {}",
        "•".style(subtle_style),
        short_id(&added_task.id).yellow()
    );

    Ok(())
}
