use thiserror::Error;

/// Errors produced while parsing or evaluating a repeat rule.
///
/// Every variant is terminal: the engine is deterministic, so calling it
/// again with the same input reproduces the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepeatError {
    #[error("Repeat rule is empty")]
    EmptyRule,

    #[error("Invalid date '{0}', expected YYYYMMDD")]
    InvalidDate(String),

    #[error("Invalid repeat rule: {0}")]
    InvalidRule(String),

    #[error("Unsupported repeat rule: {0}")]
    UnsupportedRule(String),

    #[error("Invalid day of month: {0}")]
    InvalidDay(String),

    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(String),

    #[error("Maximum number of days exceeded")]
    MaxDaysExceeded,
}

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Repeat(#[from] RepeatError),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Ambiguous short ID. Did you mean one of these?")]
    AmbiguousId(Vec<(String, String)>), // Vec of (ID, Title)
}
