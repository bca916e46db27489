use crate::date::parse_date;
use crate::error::CoreError;
use crate::models::{CompletionResult, NewTaskData, Task, UpdateTaskData};
use crate::recurrence::RepeatRule;
use crate::repository::SqliteRepository;
use crate::schedule::normalize_due_date;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sqlx::{QueryBuilder, Sqlite, Transaction};
use uuid::Uuid;

/// Date format accepted by the search box, e.g. `26.01.2024`.
const SEARCH_DATE_FORMAT: &str = "%d.%m.%Y";

#[async_trait]
impl super::TaskRepository for SqliteRepository {
    async fn add_task(&self, data: NewTaskData) -> Result<Task, CoreError> {
        let title = require_title(&data.title)?;
        let repeat = non_empty(data.repeat);
        let date = normalize_due_date(self.today(), data.date.as_deref(), repeat.as_deref())?;

        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            date,
            title,
            comment: non_empty(data.comment),
            repeat,
            created_at: now,
            updated_at: now,
        };

        sqlx::query(
            r#"INSERT INTO tasks (id, date, title, comment, repeat, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(task.id)
        .bind(task.date)
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(self.pool())
        .await?;

        tracing::debug!(task_id = %task.id, date = %task.date, repeat = ?task.repeat, "task added");
        Ok(task)
    }

    async fn find_task_by_id(&self, id: Uuid) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool())
            .await?;
        Ok(task)
    }

    async fn find_tasks_by_short_id_prefix(&self, short_id: &str) -> Result<Vec<Task>, CoreError> {
        // ids are stored as blobs, so match against their hex form
        let prefix: String = short_id
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Ok(Vec::new());
        }

        let mut pattern = String::with_capacity(prefix.len() + 1);
        pattern.push_str(&prefix);
        pattern.push('%');

        let tasks: Vec<Task> = sqlx::query_as("SELECT * FROM tasks WHERE lower(hex(id)) LIKE ?")
            .bind(pattern)
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn list_tasks(&self, limit: u32, search: Option<&str>) -> Result<Vec<Task>, CoreError> {
        let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT * FROM tasks");

        if let Some(term) = search.map(str::trim).filter(|s| !s.is_empty()) {
            match parse_search_date(term) {
                Some(date) => {
                    query_builder.push(" WHERE date = ");
                    query_builder.push_bind(date);
                }
                None => {
                    let pattern = format!("%{}%", term.to_lowercase());
                    query_builder.push(" WHERE lower(title) LIKE ");
                    query_builder.push_bind(pattern.clone());
                    query_builder.push(" OR lower(comment) LIKE ");
                    query_builder.push_bind(pattern);
                }
            }
        }

        query_builder.push(" ORDER BY date, created_at LIMIT ");
        query_builder.push_bind(i64::from(limit));

        let tasks = query_builder
            .build_query_as::<Task>()
            .fetch_all(self.pool())
            .await?;
        Ok(tasks)
    }

    async fn update_task(&self, id: Uuid, data: UpdateTaskData) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;

        let existing = Self::find_task_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let title = match &data.title {
            Some(title) => require_title(title)?,
            None => existing.title.clone(),
        };
        let comment = match data.comment.clone() {
            Some(comment) => non_empty(comment),
            None => existing.comment.clone(),
        };
        let repeat = match data.repeat.clone() {
            Some(repeat) => non_empty(repeat),
            None => existing.repeat.clone(),
        };

        let date = if data.affects_schedule() {
            let raw = match data.date.clone() {
                Some(date) => date,
                None => Some(crate::date::format_date(existing.date)),
            };
            normalize_due_date(self.today(), raw.as_deref(), repeat.as_deref())?
        } else {
            existing.date
        };

        let task = Task {
            date,
            title,
            comment,
            repeat,
            updated_at: Utc::now(),
            ..existing
        };

        sqlx::query(
            "UPDATE tasks SET date = $1, title = $2, comment = $3, repeat = $4, updated_at = $5 WHERE id = $6",
        )
        .bind(task.date)
        .bind(&task.title)
        .bind(&task.comment)
        .bind(&task.repeat)
        .bind(task.updated_at)
        .bind(task.id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        tracing::debug!(task_id = %task.id, date = %task.date, "task updated");
        Ok(task)
    }

    async fn update_task_date(&self, id: Uuid, date: NaiveDate) -> Result<Task, CoreError> {
        let mut tx = self.pool().begin().await?;
        let task = Self::set_date_in_transaction(&mut tx, id, date).await?;
        tx.commit().await?;
        tracing::debug!(task_id = %id, %date, "task date set");
        Ok(task)
    }

    async fn delete_task(&self, id: Uuid) -> Result<(), CoreError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(self.pool())
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }
        tracing::debug!(task_id = %id, "task deleted");
        Ok(())
    }

    async fn complete_task(&self, id: Uuid) -> Result<CompletionResult, CoreError> {
        let mut tx = self.pool().begin().await?;

        let task = Self::find_task_by_id_in_transaction(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))?;

        let Some(rule) = task.repeat.as_deref().filter(|r| !r.is_empty()) else {
            sqlx::query("DELETE FROM tasks WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            tx.commit().await?;
            tracing::info!(task_id = %id, "one-off task done and removed");
            return Ok(CompletionResult::Deleted(task));
        };

        let previous_date = task.date;
        let next = rule
            .parse::<RepeatRule>()?
            .next_after(self.today(), previous_date)?;
        let task = Self::set_date_in_transaction(&mut tx, id, next).await?;
        tx.commit().await?;

        tracing::info!(task_id = %id, from = %previous_date, to = %next, "recurring task rescheduled");
        Ok(CompletionResult::Rescheduled {
            task,
            previous_date,
        })
    }
}

impl SqliteRepository {
    /// Find a task by ID within an existing transaction
    pub(crate) async fn find_task_by_id_in_transaction<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        id: Uuid,
    ) -> Result<Option<Task>, CoreError> {
        let task = sqlx::query_as("SELECT * FROM tasks WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut **tx)
            .await?;
        Ok(task)
    }

    async fn set_date_in_transaction<'a>(
        tx: &mut Transaction<'a, Sqlite>,
        id: Uuid,
        date: NaiveDate,
    ) -> Result<Task, CoreError> {
        let result = sqlx::query("UPDATE tasks SET date = $1, updated_at = $2 WHERE id = $3")
            .bind(date)
            .bind(Utc::now())
            .bind(id)
            .execute(&mut **tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CoreError::NotFound(id.to_string()));
        }

        Self::find_task_by_id_in_transaction(tx, id)
            .await?
            .ok_or_else(|| CoreError::NotFound(id.to_string()))
    }
}

fn require_title(title: &str) -> Result<String, CoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(CoreError::InvalidInput("Task title cannot be empty.".to_string()));
    }
    Ok(title.to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_search_date(term: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(term, SEARCH_DATE_FORMAT)
        .ok()
        .or_else(|| parse_date(term).ok())
}
