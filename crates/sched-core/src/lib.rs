//! # Sched Core Library
//!
//! A small task scheduler built around a recurrence engine that computes the
//! next due date of a task from a compact repeat rule.
//!
//! ## Repeat rules
//!
//! - `d <n>`: every `n` days, `1 <= n <= 400`
//! - `y`: every year on the same month and day
//! - `w <days>`: on the listed ISO weekdays (`1` = Monday ... `7` = Sunday)
//! - `m <days> [<months>]`: on the listed days of the month, `-1` and `-2`
//!   counting from the end, optionally restricted to the listed months
//!
//! ## Core Modules
//!
//! - [`recurrence`]: Rule parsing and next-date calculation
//! - [`schedule`]: Due date normalization on create and edit
//! - [`date`]: `YYYYMMDD` helpers
//! - [`db`]: Database connection and migration management
//! - [`models`]: Core data structures and transfer objects
//! - [`repository`]: Data access layer with Repository pattern
//! - [`error`]: Error types
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use sched_core::{
//!     db, models::NewTaskData, recurrence,
//!     repository::{SqliteRepository, TaskRepository},
//! };
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let next = recurrence::next_date(chrono::Utc::now(), "20240126", "m 1,-1")?;
//!     println!("next: {next}");
//!
//!     let pool = db::establish_connection("scheduler.db").await?;
//!     let repo = SqliteRepository::new(pool);
//!
//!     let task = repo
//!         .add_task(NewTaskData {
//!             title: "Pay rent".to_string(),
//!             repeat: Some("m 1".to_string()),
//!             ..Default::default()
//!         })
//!         .await?;
//!     println!("Created task: {} due {}", task.title, task.date);
//!
//!     Ok(())
//! }
//! ```

pub mod date;
pub mod db;
pub mod error;
pub mod models;
pub mod recurrence;
pub mod repository;
pub mod schedule;
