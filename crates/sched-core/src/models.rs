use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled task.
///
/// `repeat` holds the raw repeat rule as entered; `None` means the task is
/// one-off and is deleted when done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    #[serde(with = "crate::date::compact")]
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repeat: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        self.repeat.as_deref().is_some_and(|r| !r.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewTaskData {
    pub title: String,
    /// Raw `YYYYMMDD`; `None` or empty means today.
    pub date: Option<String>,
    pub comment: Option<String>,
    pub repeat: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    /// `Some(None)` resets the date to today.
    pub date: Option<Option<String>>,
    pub comment: Option<Option<String>>,
    pub repeat: Option<Option<String>>,
}

impl UpdateTaskData {
    /// Whether the patch touches anything the due date depends on.
    pub fn affects_schedule(&self) -> bool {
        self.date.is_some() || self.repeat.is_some()
    }
}

#[derive(Debug)]
pub enum CompletionResult {
    /// A one-off task was done and removed.
    Deleted(Task),
    /// A recurring task was moved to its next occurrence.
    Rescheduled { task: Task, previous_date: NaiveDate },
}
