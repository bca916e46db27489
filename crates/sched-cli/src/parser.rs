use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_english::{parse_date_string, Dialect};
use sched_core::date::format_date;

/// Turns user input into the `YYYYMMDD` form the core expects.
///
/// All-digit input is passed through untouched so the core reports malformed
/// dates itself. Anything else goes through `chrono-english` ("tomorrow",
/// "next friday", "2024-03-01").
pub fn parse_date_input(input: &str, now: DateTime<Utc>) -> Result<String> {
    let input = input.trim();
    if input.is_empty() || input.bytes().all(|b| b.is_ascii_digit()) {
        return Ok(input.to_string());
    }
    parse_date_string(input, now, Dialect::Uk)
        .map(|parsed| format_date(parsed.date_naive()))
        .map_err(|e| anyhow::anyhow!("Failed to parse date '{}': {}", input, e))
}
