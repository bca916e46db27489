//! Day-resolution date helpers shared by the engine and the task store.
//!
//! Dates travel outside the crate as 8-digit `YYYYMMDD` strings; inside they
//! are [`NaiveDate`] values with no time-of-day and no offset, so every
//! comparison happens at day granularity.

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveDateTime, TimeZone};

use crate::error::RepeatError;

/// External date format (`20240131`).
pub const DATE_FORMAT: &str = "%Y%m%d";

/// Parses a strict `YYYYMMDD` string.
pub fn parse_date(value: &str) -> Result<NaiveDate, RepeatError> {
    if value.len() != 8 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RepeatError::InvalidDate(value.to_string()));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| RepeatError::InvalidDate(value.to_string()))
}

#[inline]
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Last calendar day of the month containing `date`.
pub fn last_day_of_month(date: NaiveDate) -> Option<NaiveDate> {
    date.with_day(1)?
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Number of days in the month containing `date` (28 to 31).
pub fn days_in_month(date: NaiveDate) -> u32 {
    last_day_of_month(date).map_or(31, |last| last.day())
}

/// Anything that can serve as the engine's reference day.
///
/// Time-of-day is dropped: a `DateTime` contributes the calendar day it
/// falls on in its own time zone.
pub trait ReferenceDay {
    fn reference_day(&self) -> NaiveDate;
}

impl ReferenceDay for NaiveDate {
    fn reference_day(&self) -> NaiveDate {
        *self
    }
}

impl ReferenceDay for NaiveDateTime {
    fn reference_day(&self) -> NaiveDate {
        self.date()
    }
}

impl<Tz: TimeZone> ReferenceDay for DateTime<Tz> {
    fn reference_day(&self) -> NaiveDate {
        self.date_naive()
    }
}

/// Serde adapter storing a [`NaiveDate`] as `YYYYMMDD`.
pub mod compact {
    use chrono::NaiveDate;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_date(*date))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_date(&raw).map_err(de::Error::custom)
    }
}
