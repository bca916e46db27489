//! Due date normalization applied whenever a task is created or edited.

use chrono::NaiveDate;

use crate::date::parse_date;
use crate::error::RepeatError;
use crate::recurrence::RepeatRule;

/// Resolves the date a task should be stored with.
///
/// * no date: today
/// * a date in the past with a repeat rule: the rule's next occurrence
/// * a date in the past without a rule: today
/// * otherwise the date itself
///
/// A repeat rule, when present, is always validated, even if the date does
/// not need to move.
pub fn normalize_due_date(
    today: NaiveDate,
    date: Option<&str>,
    repeat: Option<&str>,
) -> Result<NaiveDate, RepeatError> {
    let rule = repeat
        .filter(|r| !r.is_empty())
        .map(str::parse::<RepeatRule>)
        .transpose()?;

    let Some(raw) = date.filter(|d| !d.is_empty()) else {
        return Ok(today);
    };
    let date = parse_date(raw)?;

    if date >= today {
        return Ok(date);
    }

    match rule {
        Some(rule) => rule.next_after(today, date),
        None => Ok(today),
    }
}
