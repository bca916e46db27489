//! Repeat rule engine.
//!
//! A repeat rule is a short space-separated string attached to a task:
//!
//! | rule            | meaning                                                 |
//! |-----------------|---------------------------------------------------------|
//! | `d 7`           | every 7 days (interval 1..=400)                         |
//! | `y`             | every year on the same month/day                        |
//! | `w 1,3,5`       | on Monday, Wednesday, Friday (`1` = Monday, `7` = Sunday) |
//! | `m 1,-1`        | on the first and the last day of every month            |
//! | `m 15 1,7`      | on January 15 and July 15                               |
//!
//! Rules are parsed once into a [`RepeatRule`] and then evaluated against a
//! reference day. Evaluation is pure: no I/O, no shared state, no logging.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Utc, Weekday};

use crate::date::{days_in_month, format_date, parse_date, ReferenceDay};
use crate::error::RepeatError;

/// Upper bound (inclusive) for the interval of a daily rule.
pub const MAX_INTERVAL_DAYS: u32 = 400;

/// How many months the monthly search walks before giving up. Nine years
/// covers the longest gap between two February 29ths (2096 -> 2104).
const MONTH_SEARCH_HORIZON: u32 = 12 * 9;

/// A day-of-month selector of a monthly rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MonthDay {
    /// A fixed day, 1 to 31. Months shorter than the day are skipped.
    Day(u32),
    /// Counted back from the month end: `FromEnd(1)` is the last day,
    /// `FromEnd(2)` the second-to-last.
    FromEnd(u32),
}

impl MonthDay {
    /// Resolves the selector inside the month that contains `month`.
    ///
    /// `None` when the month has no such day, including out-of-range
    /// selectors such as `Day(0)` or `FromEnd(0)`.
    pub fn resolve(self, month: NaiveDate) -> Option<NaiveDate> {
        let day = match self {
            MonthDay::Day(day) => day,
            MonthDay::FromEnd(back) => {
                let offset = back.checked_sub(1)?;
                days_in_month(month).checked_sub(offset)?
            }
        };
        month.with_day(day)
    }
}

impl fmt::Display for MonthDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthDay::Day(day) => write!(f, "{}", day),
            MonthDay::FromEnd(1) => write!(f, "last day"),
            MonthDay::FromEnd(2) => write!(f, "second-to-last day"),
            MonthDay::FromEnd(back) => write!(f, "{} days before month end", back.saturating_sub(1)),
        }
    }
}

/// A repeat rule.
///
/// `FromStr` is the validating constructor: sets come out deduplicated,
/// sorted and range-checked. A hand-built value that breaks those ranges
/// still evaluates without panicking; it fails with `MaxDaysExceeded` when
/// it can never produce a date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatRule {
    Daily { interval: u32 },
    Yearly,
    Weekly { weekdays: Vec<Weekday> },
    Monthly { days: Vec<MonthDay>, months: Vec<u32> },
}

impl FromStr for RepeatRule {
    type Err = RepeatError;

    fn from_str(rule: &str) -> Result<Self, Self::Err> {
        if rule.is_empty() {
            return Err(RepeatError::EmptyRule);
        }

        let parts: Vec<&str> = rule.split_whitespace().collect();
        let Some((kind, params)) = parts.split_first() else {
            return Err(RepeatError::InvalidRule(rule.to_string()));
        };

        match *kind {
            "d" => parse_daily(rule, params),
            "y" if params.is_empty() => Ok(RepeatRule::Yearly),
            "y" => Err(RepeatError::InvalidRule(rule.to_string())),
            "w" => parse_weekly(rule, params),
            "m" => parse_monthly(rule, params),
            _ => Err(RepeatError::UnsupportedRule(rule.to_string())),
        }
    }
}

fn parse_daily(rule: &str, params: &[&str]) -> Result<RepeatRule, RepeatError> {
    let [interval] = params else {
        return Err(RepeatError::InvalidRule(rule.to_string()));
    };
    let interval: i64 = interval
        .parse()
        .map_err(|_| RepeatError::InvalidRule(rule.to_string()))?;

    if interval <= 0 || interval > i64::from(MAX_INTERVAL_DAYS) {
        return Err(RepeatError::MaxDaysExceeded);
    }

    Ok(RepeatRule::Daily {
        interval: interval as u32,
    })
}

fn parse_weekly(rule: &str, params: &[&str]) -> Result<RepeatRule, RepeatError> {
    let [set] = params else {
        return Err(RepeatError::InvalidRule(rule.to_string()));
    };

    let weekdays = parse_set(set, |value| match value {
        1..=7 => Some(value),
        _ => None,
    })
    .ok_or_else(|| RepeatError::InvalidWeekday(set.to_string()))?;

    Ok(RepeatRule::Weekly {
        weekdays: weekdays.into_iter().filter_map(iso_weekday).collect(),
    })
}

fn parse_monthly(rule: &str, params: &[&str]) -> Result<RepeatRule, RepeatError> {
    if params.is_empty() || params.len() > 2 {
        return Err(RepeatError::UnsupportedRule(rule.to_string()));
    }

    let days = parse_set(params[0], |value| match value {
        1..=31 => Some(MonthDay::Day(value as u32)),
        -1 | -2 => Some(MonthDay::FromEnd(value.unsigned_abs() as u32)),
        _ => None,
    })
    .ok_or_else(|| RepeatError::InvalidDay(params[0].to_string()))?;

    let months = match params.get(1) {
        Some(set) => parse_set(set, |value| match value {
            1..=12 => Some(value as u32),
            _ => None,
        })
        .ok_or_else(|| RepeatError::InvalidMonth(set.to_string()))?,
        None => BTreeSet::new(),
    };

    Ok(RepeatRule::Monthly {
        days: days.into_iter().collect(),
        months: months.into_iter().collect(),
    })
}

/// Parses a comma-separated integer set. A single member that fails to parse
/// or is rejected by `validate` invalidates the whole set.
fn parse_set<T: Ord>(raw: &str, validate: impl Fn(i64) -> Option<T>) -> Option<BTreeSet<T>> {
    raw.split(',')
        .map(|member| member.trim().parse::<i64>().ok().and_then(&validate))
        .collect()
}

/// Maps `1..=7` to Monday..Sunday. In a Sunday-first numbering this is the
/// same as `value % 7`, see [`Weekday::num_days_from_sunday`].
fn iso_weekday(value: i64) -> Option<Weekday> {
    match value {
        1 => Some(Weekday::Mon),
        2 => Some(Weekday::Tue),
        3 => Some(Weekday::Wed),
        4 => Some(Weekday::Thu),
        5 => Some(Weekday::Fri),
        6 => Some(Weekday::Sat),
        7 => Some(Weekday::Sun),
        _ => None,
    }
}

impl RepeatRule {
    /// Computes the first occurrence strictly after `now`, starting from the
    /// task's stored `due` date.
    ///
    /// The result is also strictly after `due`, so feeding it back in as the
    /// next due date always moves forward.
    pub fn next_after(&self, now: NaiveDate, due: NaiveDate) -> Result<NaiveDate, RepeatError> {
        match self {
            RepeatRule::Daily { interval } => next_daily(now, due, *interval),
            RepeatRule::Yearly => next_yearly(now, due),
            RepeatRule::Weekly { weekdays } => next_weekly(now, due, weekdays),
            RepeatRule::Monthly { days, months } => next_monthly(now, due, days, months),
        }
    }

    /// A daily rule with interval 1 leaves a task that is due today where it is.
    fn passes_through(&self, due: NaiveDate, today: NaiveDate) -> bool {
        matches!(self, RepeatRule::Daily { interval: 1 }) && due == today
    }
}

fn next_daily(now: NaiveDate, due: NaiveDate, interval: u32) -> Result<NaiveDate, RepeatError> {
    if interval == 0 {
        return Err(RepeatError::MaxDaysExceeded);
    }
    let interval = i64::from(interval);
    let elapsed = (now - due).num_days();
    // Smallest k >= 1 with due + k * interval > now.
    let steps = if elapsed < 0 { 1 } else { elapsed / interval + 1 };

    due.checked_add_days(Days::new((steps * interval) as u64))
        .ok_or(RepeatError::MaxDaysExceeded)
}

fn next_yearly(now: NaiveDate, due: NaiveDate) -> Result<NaiveDate, RepeatError> {
    let mut next = add_one_year(due)?;
    while next <= now {
        next = add_one_year(next)?;
    }
    Ok(next)
}

/// Same month and day one year later. February 29 rolls over into March 1
/// when the following year is not a leap year.
fn add_one_year(date: NaiveDate) -> Result<NaiveDate, RepeatError> {
    let year = date.year() + 1;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
        .ok_or(RepeatError::MaxDaysExceeded)
}

fn next_weekly(now: NaiveDate, due: NaiveDate, weekdays: &[Weekday]) -> Result<NaiveDate, RepeatError> {
    let start = due
        .max(now)
        .succ_opt()
        .ok_or(RepeatError::MaxDaysExceeded)?;

    start
        .iter_days()
        .take(7)
        .find(|day| weekdays.contains(&day.weekday()))
        .ok_or(RepeatError::MaxDaysExceeded)
}

fn next_monthly(
    now: NaiveDate,
    due: NaiveDate,
    days: &[MonthDay],
    months: &[u32],
) -> Result<NaiveDate, RepeatError> {
    let reference = due.max(now);
    let first_month = reference.with_day(1).ok_or(RepeatError::MaxDaysExceeded)?;

    // Months are visited in calendar order, so the first month holding any
    // candidate after the reference holds the earliest one.
    (0..MONTH_SEARCH_HORIZON)
        .filter_map(|offset| first_month.checked_add_months(Months::new(offset)))
        .filter(|month| months.is_empty() || months.contains(&month.month()))
        .find_map(|month| {
            days.iter()
                .filter_map(|day| day.resolve(month))
                .filter(|candidate| *candidate > reference)
                .min()
        })
        .ok_or(RepeatError::MaxDaysExceeded)
}

/// Computes the next due date for a task.
///
/// * `now` - the reference day; any time-of-day is discarded
/// * `due_date` - the task's stored date, `YYYYMMDD`
/// * `rule` - the task's repeat rule
///
/// Returns the next date as `YYYYMMDD`, strictly after `now`. The one
/// exception is `d 1` on a task that is due today, which is returned as is.
pub fn next_date(now: impl ReferenceDay, due_date: &str, rule: &str) -> Result<String, RepeatError> {
    next_date_with_today(Utc::now().date_naive(), now, due_date, rule)
}

/// [`next_date`] with an explicit value for the current calendar day.
pub fn next_date_with_today(
    today: NaiveDate,
    now: impl ReferenceDay,
    due_date: &str,
    rule: &str,
) -> Result<String, RepeatError> {
    if rule.is_empty() {
        return Err(RepeatError::EmptyRule);
    }
    let due = parse_date(due_date)?;
    let rule: RepeatRule = rule.parse()?;

    if rule.passes_through(due, today) {
        return Ok(format_date(due));
    }

    rule.next_after(now.reference_day(), due).map(format_date)
}

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

fn month_name(month: u32) -> String {
    month
        .checked_sub(1)
        .and_then(|index| MONTH_NAMES.get(index as usize))
        .map_or_else(|| format!("month {}", month), |name| name.to_string())
}

impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatRule::Daily { interval: 1 } => write!(f, "every day"),
            RepeatRule::Daily { interval } => write!(f, "every {} days", interval),
            RepeatRule::Yearly => write!(f, "every year"),
            RepeatRule::Weekly { weekdays } => {
                let names: Vec<String> = weekdays.iter().map(|w| w.to_string()).collect();
                write!(f, "every {}", names.join(", "))
            }
            RepeatRule::Monthly { days, months } => {
                let days: Vec<String> = days.iter().map(|d| d.to_string()).collect();
                write!(f, "on {}", days.join(", "))?;
                if months.is_empty() {
                    write!(f, " of every month")
                } else {
                    let names: Vec<String> = months
                        .iter()
                        .map(|m| month_name(*m))
                        .collect();
                    write!(f, " of {}", names.join(", "))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(value: &str) -> NaiveDate {
        parse_date(value).unwrap()
    }

    /// Reference day used by the table tests below.
    const NOW: &str = "20240126";

    /// A "today" that never collides with the due dates in the tables.
    fn far_today() -> NaiveDate {
        date("19700101")
    }

    fn next(due: &str, rule: &str) -> Result<String, RepeatError> {
        next_date_with_today(far_today(), date(NOW), due, rule)
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_parse_daily() {
            assert_eq!("d 7".parse::<RepeatRule>(), Ok(RepeatRule::Daily { interval: 7 }));
            assert_eq!("  d   400 ".parse::<RepeatRule>(), Ok(RepeatRule::Daily { interval: 400 }));
        }

        #[test]
        fn test_parse_weekly_dedups_and_sorts() {
            let rule: RepeatRule = "w 7,1,3,1".parse().unwrap();
            assert_eq!(
                rule,
                RepeatRule::Weekly {
                    weekdays: vec![Weekday::Mon, Weekday::Wed, Weekday::Sun]
                }
            );
        }

        #[test]
        fn test_weekday_seven_is_sunday_zero() {
            let RepeatRule::Weekly { weekdays } = "w 7".parse::<RepeatRule>().unwrap() else {
                panic!("expected a weekly rule");
            };
            assert_eq!(weekdays[0].num_days_from_sunday(), 7 % 7);
        }

        #[test]
        fn test_parse_monthly_sets() {
            let rule: RepeatRule = "m 15,-1,15,-2 12,1,1".parse().unwrap();
            assert_eq!(
                rule,
                RepeatRule::Monthly {
                    days: vec![MonthDay::Day(15), MonthDay::FromEnd(1), MonthDay::FromEnd(2)],
                    months: vec![1, 12],
                }
            );
        }

        #[rstest]
        #[case("", RepeatError::EmptyRule)]
        #[case("   ", RepeatError::InvalidRule("   ".into()))]
        #[case("d", RepeatError::InvalidRule("d".into()))]
        #[case("d 1 2", RepeatError::InvalidRule("d 1 2".into()))]
        #[case("d x", RepeatError::InvalidRule("d x".into()))]
        #[case("d 0", RepeatError::MaxDaysExceeded)]
        #[case("d -3", RepeatError::MaxDaysExceeded)]
        #[case("d 401", RepeatError::MaxDaysExceeded)]
        #[case("y 2", RepeatError::InvalidRule("y 2".into()))]
        #[case("w", RepeatError::InvalidRule("w".into()))]
        #[case("w abc", RepeatError::InvalidWeekday("abc".into()))]
        #[case("w 8,4,5", RepeatError::InvalidWeekday("8,4,5".into()))]
        #[case("w 0", RepeatError::InvalidWeekday("0".into()))]
        #[case("w 1,,2", RepeatError::InvalidWeekday("1,,2".into()))]
        #[case("m", RepeatError::UnsupportedRule("m".into()))]
        #[case("m 1 2 3", RepeatError::UnsupportedRule("m 1 2 3".into()))]
        #[case("m 32", RepeatError::InvalidDay("32".into()))]
        #[case("m 0", RepeatError::InvalidDay("0".into()))]
        #[case("m -2,-3", RepeatError::InvalidDay("-2,-3".into()))]
        #[case("m 40,11,19", RepeatError::InvalidDay("40,11,19".into()))]
        #[case("m 1 13", RepeatError::InvalidMonth("13".into()))]
        #[case("m 1 0,5", RepeatError::InvalidMonth("0,5".into()))]
        #[case("x 5", RepeatError::UnsupportedRule("x 5".into()))]
        #[case("k 34", RepeatError::UnsupportedRule("k 34".into()))]
        #[case("ooo", RepeatError::UnsupportedRule("ooo".into()))]
        fn test_parse_errors(#[case] rule: &str, #[case] expected: RepeatError) {
            assert_eq!(rule.parse::<RepeatRule>(), Err(expected));
        }

        #[test]
        fn test_invalid_day_reported_before_month() {
            assert!(matches!(
                "m 99 99".parse::<RepeatRule>(),
                Err(RepeatError::InvalidDay(_))
            ));
        }
    }

    mod dispatcher_tests {
        use super::*;
        use chrono::TimeZone;

        #[test]
        fn test_empty_rule_checked_before_date() {
            assert_eq!(next("garbage", ""), Err(RepeatError::EmptyRule));
        }

        #[test]
        fn test_invalid_due_date() {
            assert_eq!(
                next("2024-01-01", "d 1"),
                Err(RepeatError::InvalidDate("2024-01-01".into()))
            );
            assert_eq!(
                next("20240230", "y"),
                Err(RepeatError::InvalidDate("20240230".into()))
            );
        }

        #[test]
        fn test_now_time_of_day_is_ignored() {
            let late = Utc.with_ymd_and_hms(2024, 1, 26, 23, 59, 59).unwrap();
            let early = Utc.with_ymd_and_hms(2024, 1, 26, 0, 0, 1).unwrap();
            let a = next_date_with_today(far_today(), late, "20240120", "d 1").unwrap();
            let b = next_date_with_today(far_today(), early, "20240120", "d 1").unwrap();
            assert_eq!(a, "20240127");
            assert_eq!(a, b);
        }

        #[test]
        fn test_daily_one_passes_through_when_due_today() {
            let today = date("20240126");
            assert_eq!(
                next_date_with_today(today, today, "20240126", "d 1").unwrap(),
                "20240126"
            );
        }

        #[test]
        fn test_pass_through_only_for_interval_one() {
            let today = date("20240126");
            assert_eq!(
                next_date_with_today(today, today, "20240126", "d 2").unwrap(),
                "20240128"
            );
            assert_eq!(
                next_date_with_today(today, today, "20240125", "d 1").unwrap(),
                "20240127"
            );
        }

        #[test]
        fn test_next_date_uses_wall_clock_for_today() {
            // 1999 can never be today, so no pass-through here.
            assert_eq!(next_date(date("20000101"), "19991231", "d 1").unwrap(), "20000102");
        }
    }

    mod daily_tests {
        use super::*;

        #[rstest]
        #[case("20240113", "d 7", "20240127")]
        #[case("20240120", "d 20", "20240209")]
        #[case("20240202", "d 30", "20240303")]
        #[case("20231225", "d 12", "20240130")]
        #[case("20240228", "d 1", "20240229")]
        #[case("20240126", "d 1", "20240127")]
        #[case("20240119", "d 7", "20240202")]
        #[case("20240126", "d 400", "20250301")]
        fn test_daily(#[case] due: &str, #[case] rule: &str, #[case] expected: &str) {
            assert_eq!(next(due, rule).unwrap(), expected);
        }

        #[test]
        fn test_interval_bounds() {
            assert_eq!(next("20240101", "d 0"), Err(RepeatError::MaxDaysExceeded));
            assert_eq!(next("20240101", "d 401"), Err(RepeatError::MaxDaysExceeded));
            assert!(next("20240101", "d 400").is_ok());
        }

        #[test]
        fn test_hand_built_zero_interval_is_an_error() {
            let rule = RepeatRule::Daily { interval: 0 };
            assert_eq!(
                rule.next_after(date(NOW), date("20240101")),
                Err(RepeatError::MaxDaysExceeded)
            );
        }

        #[test]
        fn test_far_past_due_date_lands_on_step_boundary() {
            let due = date("19000101");
            let result = RepeatRule::Daily { interval: 7 }
                .next_after(date(NOW), due)
                .unwrap();
            assert!(result > date(NOW));
            assert!(result - Days::new(7) <= date(NOW));
            assert_eq!((result - due).num_days() % 7, 0);
        }
    }

    mod yearly_tests {
        use super::*;

        #[rstest]
        #[case("20231113", "20241113")]
        #[case("20240229", "20250301")]
        #[case("20240301", "20250301")]
        #[case("20150301", "20240301")]
        #[case("20230126", "20250126")]
        fn test_yearly(#[case] due: &str, #[case] expected: &str) {
            assert_eq!(next(due, "y").unwrap(), expected);
        }

        #[test]
        fn test_leap_day_reference() {
            let now = date("20240229");
            let result = RepeatRule::Yearly.next_after(now, date("20240229")).unwrap();
            assert!(result > now);
            assert_eq!(result, date("20250301"));
        }
    }

    mod weekly_tests {
        use super::*;

        #[rstest]
        #[case("20240126", "w 1,2,3", "20240129")]
        #[case("20240125", "w 1,4,5", "20240129")]
        #[case("20240126", "w 7", "20240128")]
        #[case("20240126", "w 5", "20240202")]
        #[case("20240205", "w 1", "20240212")]
        #[case("20231201", "w 6", "20240127")]
        fn test_weekly(#[case] due: &str, #[case] rule: &str, #[case] expected: &str) {
            assert_eq!(next(due, rule).unwrap(), expected);
        }

        #[test]
        fn test_mon_wed_fri_is_earliest_match() {
            let rule: RepeatRule = "w 1,3,5".parse().unwrap();
            let now = date(NOW);
            let result = rule.next_after(now, date("20240101")).unwrap();
            assert!(matches!(result.weekday(), Weekday::Mon | Weekday::Wed | Weekday::Fri));
            for day in now.succ_opt().unwrap().iter_days().take_while(|d| *d < result) {
                assert!(!matches!(day.weekday(), Weekday::Mon | Weekday::Wed | Weekday::Fri));
            }
        }
    }

    mod monthly_tests {
        use super::*;

        #[rstest]
        #[case("20231106", "m 13", "20240213")]
        #[case("20240116", "m 16,5", "20240205")]
        #[case("20240126", "m 25,26,7", "20240207")]
        #[case("20240409", "m 31", "20240531")]
        #[case("20240329", "m 10,17 12,8,1", "20240810")]
        #[case("20230311", "m 07,19 05,6", "20240507")]
        #[case("20230311", "m 1 1,2", "20240201")]
        #[case("20240127", "m -1", "20240131")]
        #[case("20240222", "m -2", "20240228")]
        #[case("20240326", "m -1,-2", "20240330")]
        #[case("20240201", "m -1,18", "20240218")]
        #[case("20240126", "m 15 1,7", "20240715")]
        #[case("20240126", "m 30", "20240130")]
        #[case("20240130", "m 30", "20240330")]
        fn test_monthly(#[case] due: &str, #[case] rule: &str, #[case] expected: &str) {
            assert_eq!(next(due, rule).unwrap(), expected);
        }

        #[test]
        fn test_negative_day_with_month_set() {
            // February end resolves per year: leap 2024 vs. regular 2025.
            assert_eq!(next("20240101", "m -1 2").unwrap(), "20240229");
            assert_eq!(next("20240301", "m -1 2").unwrap(), "20250228");
            assert_eq!(next("20240301", "m -2 2,4").unwrap(), "20240429");
        }

        #[test]
        fn test_leap_day_only_rule_skips_to_next_leap_year() {
            assert_eq!(next("20240301", "m 29 2").unwrap(), "20280229");
        }

        #[test]
        fn test_nonexistent_day_in_month_set() {
            assert_eq!(next("20240101", "m 30 2"), Err(RepeatError::MaxDaysExceeded));
            assert_eq!(next("20240101", "m 31 4,6,9,11"), Err(RepeatError::MaxDaysExceeded));
        }

        #[test]
        fn test_out_of_range_selectors_resolve_to_nothing() {
            let feb = date("20240210");
            assert_eq!(MonthDay::FromEnd(0).resolve(feb), None);
            assert_eq!(MonthDay::FromEnd(30).resolve(feb), None);
            assert_eq!(MonthDay::Day(0).resolve(feb), None);
            assert_eq!(MonthDay::Day(30).resolve(feb), None);
            assert_eq!(MonthDay::FromEnd(1).resolve(feb), Some(date("20240229")));
            assert_eq!(MonthDay::FromEnd(2).resolve(feb), Some(date("20240228")));
        }

        #[test]
        fn test_hand_built_monthly_rule_without_candidates() {
            let rule = RepeatRule::Monthly {
                days: vec![MonthDay::FromEnd(0)],
                months: vec![],
            };
            assert_eq!(
                rule.next_after(date(NOW), date(NOW)),
                Err(RepeatError::MaxDaysExceeded)
            );

            let rule = RepeatRule::Monthly {
                days: vec![MonthDay::Day(1)],
                months: vec![0, 13],
            };
            assert_eq!(
                rule.next_after(date(NOW), date(NOW)),
                Err(RepeatError::MaxDaysExceeded)
            );
        }

        #[test]
        fn test_month_end_rollover_skips_short_months() {
            // no overflow into early March: the 31st only exists in long months
            assert_eq!(next("20240131", "m 31").unwrap(), "20240331");
        }

        #[test]
        fn test_last_day_is_month_end() {
            let rule: RepeatRule = "m -1".parse().unwrap();
            let mut due = date("20230101");
            for _ in 0..30 {
                let result = rule.next_after(due, due).unwrap();
                assert_eq!(result.succ_opt().unwrap().day(), 1, "{result} is not a month end");
                due = result;
            }
        }
    }

    mod display_tests {
        use super::*;

        #[rstest]
        #[case("d 1", "every day")]
        #[case("d 3", "every 3 days")]
        #[case("y", "every year")]
        #[case("w 5,1", "every Mon, Fri")]
        #[case("m 1,-1", "on 1, last day of every month")]
        #[case("m -2 7,1", "on second-to-last day of Jan, Jul")]
        fn test_describe(#[case] rule: &str, #[case] expected: &str) {
            assert_eq!(rule.parse::<RepeatRule>().unwrap().to_string(), expected);
        }

        #[test]
        fn test_describe_hand_built_out_of_range_values() {
            let rule = RepeatRule::Monthly {
                days: vec![MonthDay::Day(1), MonthDay::FromEnd(0)],
                months: vec![0, 13],
            };
            assert_eq!(
                rule.to_string(),
                "on 1, 0 days before month end of month 0, month 13"
            );
        }
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn any_date() -> impl Strategy<Value = NaiveDate> {
            (1990i32..2060, 1u32..=12, 1u32..=28)
                .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
        }

        fn any_rule() -> impl Strategy<Value = RepeatRule> {
            let day = prop_oneof![
                (1u32..=28).prop_map(MonthDay::Day),
                (1u32..=2).prop_map(MonthDay::FromEnd),
            ];
            prop_oneof![
                (1u32..=MAX_INTERVAL_DAYS).prop_map(|interval| RepeatRule::Daily { interval }),
                Just(RepeatRule::Yearly),
                proptest::collection::btree_set(1i64..=7, 1..=3).prop_map(|set| RepeatRule::Weekly {
                    weekdays: set.into_iter().filter_map(iso_weekday).collect(),
                }),
                (
                    proptest::collection::btree_set(day, 1..=4),
                    proptest::collection::btree_set(1u32..=12, 0..=3),
                )
                    .prop_map(|(days, months)| RepeatRule::Monthly {
                        days: days.into_iter().collect(),
                        months: months.into_iter().collect(),
                    }),
            ]
        }

        proptest! {
            #[test]
            fn next_is_strictly_after_now(rule in any_rule(), now in any_date(), due in any_date()) {
                let result = rule.next_after(now, due).unwrap();
                prop_assert!(result > now);
                prop_assert!(result > due);
            }

            #[test]
            fn feeding_result_back_moves_forward(rule in any_rule(), now in any_date(), due in any_date()) {
                let first = rule.next_after(now, due).unwrap();
                let second = rule.next_after(first, first).unwrap();
                prop_assert!(second > first);
            }

            #[test]
            fn weekly_result_matches_set(rule in any_rule(), now in any_date(), due in any_date()) {
                if let RepeatRule::Weekly { weekdays } = &rule {
                    let result = rule.next_after(now, due).unwrap();
                    prop_assert!(weekdays.contains(&result.weekday()));
                    prop_assert!((result - due.max(now)).num_days() <= 7);
                }
            }
        }
    }
}
