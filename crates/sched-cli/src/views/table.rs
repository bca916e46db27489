use chrono::NaiveDate;
use chrono_humanize::{Accuracy, HumanTime, Tense};
use comfy_table::{Attribute, Cell, Color, Row, Table};
use owo_colors::OwoColorize;
use sched_core::date::format_date;
use sched_core::models::Task;
use sched_core::recurrence::RepeatRule;

use crate::util::short_id;

/// Human form of a stored rule; falls back to the raw text if it no longer
/// parses.
pub fn describe_repeat(repeat: &str) -> String {
    repeat
        .parse::<RepeatRule>()
        .map(|rule| rule.to_string())
        .unwrap_or_else(|_| repeat.to_string())
}

/// "today", "tomorrow", "in 3 days", "2 weeks ago"...
pub fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        -1 => "yesterday".to_string(),
        _ => {
            let human = HumanTime::from(date - today);
            let tense = if date > today { Tense::Future } else { Tense::Past };
            human.to_text_en(Accuracy::Rough, tense)
        }
    }
}

pub fn display_tasks(tasks: &[Task], today: NaiveDate) {
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Due Date", "Repeat", "Comment"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&task.id)));

        let mut title = String::new();
        if task.is_recurring() {
            title.push('↻');
            title.push(' ');
        }
        title.push_str(&task.title);
        let title_cell = if task.date < today {
            Cell::new(title).fg(Color::Red).add_attribute(Attribute::Bold)
        } else {
            Cell::new(title)
        };
        row.add_cell(title_cell);

        let due_text = format!(
            "{} ({})",
            format_date(task.date),
            relative_day(task.date, today)
        );
        let due_cell = if task.date < today {
            Cell::new(due_text).fg(Color::Red) // Overdue
        } else if task.date == today {
            Cell::new(due_text).fg(Color::Yellow) // Due today
        } else {
            Cell::new(due_text)
        };
        row.add_cell(due_cell);

        row.add_cell(Cell::new(
            task.repeat
                .as_deref()
                .map(describe_repeat)
                .unwrap_or_else(|| "None".to_string()),
        ));
        row.add_cell(Cell::new(task.comment.as_deref().unwrap_or("")));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_task_details(task: &Task, today: NaiveDate) {
    println!("{} {}", "Task".bold(), task.title.bright_white().bold());
    println!("  {:<8} {}", "ID:", task.id.to_string().yellow());
    println!(
        "  {:<8} {} ({})",
        "Due:",
        format_date(task.date).cyan(),
        relative_day(task.date, today)
    );
    match task.repeat.as_deref() {
        Some(repeat) => println!("  {:<8} {} [{}]", "Repeat:", describe_repeat(repeat), repeat),
        None => println!("  {:<8} {}", "Repeat:", "never".bright_black()),
    }
    if let Some(comment) = &task.comment {
        println!("  {:<8} {}", "Comment:", comment);
    }
    println!(
        "  {:<8} {}",
        "Created:",
        task.created_at.format("%Y-%m-%d %H:%M").to_string().bright_black()
    );
}
