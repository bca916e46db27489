use crate::db::DbPool;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, UpdateTaskData};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use uuid::Uuid;

pub mod tasks;

/// Persistence operations for scheduled tasks.
///
/// Creation and edits run every due date through
/// [`normalize_due_date`](crate::schedule::normalize_due_date); completion
/// either deletes the task or advances it with the recurrence engine.
#[async_trait]
pub trait TaskRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError>;
    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError>;
    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError>;
    /// Tasks ordered by due date, at most `limit` of them.
    async fn list_tasks(&self, limit: u32, search: Option<&str>) -> Result<Vec<Task>, CoreError>;
    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError>;
    /// Stores `date` as is, without normalization.
    async fn update_task_date(&self, id: Uuid, date: NaiveDate) -> Result<Task, CoreError>;
    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError>;
    async fn complete_task(&self, id: Uuid) -> Result<CompletionResult, CoreError>;
}

/// SQLite implementation of the repository pattern
#[derive(Debug, Clone)]
pub struct SqliteRepository {
    pool: DbPool,
    fixed_today: Option<NaiveDate>,
}

impl SqliteRepository {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            fixed_today: None,
        }
    }

    /// Pins "today" instead of reading the clock. Used by tests.
    pub fn with_today(pool: DbPool, today: NaiveDate) -> Self {
        Self {
            pool,
            fixed_today: Some(today),
        }
    }

    pub(crate) fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub(crate) fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }
}
