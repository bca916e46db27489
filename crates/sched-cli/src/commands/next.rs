use anyhow::Result;
use chrono::Utc;
use sched_core::date::parse_date;
use sched_core::recurrence;

use crate::cli::NextCommand;

pub fn next_date(command: NextCommand) -> Result<()> {
    // an empty rule has no next date; print a blank line
    if command.repeat.is_empty() {
        println!();
        return Ok(());
    }

    let now = match command.now.as_deref() {
        Some(raw) => parse_date(raw)?,
        None => Utc::now().date_naive(),
    };

    let next = recurrence::next_date(now, &command.date, &command.repeat)?;
    println!("{next}");
    Ok(())
}
