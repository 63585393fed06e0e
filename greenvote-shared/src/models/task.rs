//! Task model and store operations
//!
//! Tasks are volunteer work items attached to a project. Status and priority
//! are free text: the backend does not constrain them and neither do we.
//!
//! # Table
//!
//! ```text
//! tasks
//!   task_id      server-assigned key
//!   title        text, required
//!   description  text, required
//!   status       text, required ("open", "in progress", ...)
//!   priority     text, required ("high", "low", ...)
//!   due_date     date, required
//!   project_id   reference to projects, required
//! ```
//!
//! # Example
//!
//! ```no_run
//! use greenvote_shared::db::MemoryStore;
//! use greenvote_shared::models::task::{Task, TaskFields};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = MemoryStore::new();
//!
//! let task = Task::create(&store, &TaskFields {
//!     title: "Water the rooftop garden".to_string(),
//!     description: "Morning shift".to_string(),
//!     status: "open".to_string(),
//!     priority: "high".to_string(),
//!     due_date: "2024-09-01".to_string(),
//!     project_id: "proj-42".to_string(),
//! }).await?;
//!
//! Task::delete(&store, &task.task_id).await?;
//! # Ok(())
//! # }
//! ```

use super::RecordId;
use crate::db::{self, Query, RecordStore, StoreResult, Table};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Task row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Server-assigned key
    pub task_id: RecordId,

    pub title: String,

    pub description: String,

    /// Free-form status
    pub status: String,

    /// Free-form priority
    pub priority: String,

    /// Due date as the backend returned it
    ///
    /// Usually `YYYY-MM-DD`, but a `timestamptz` column yields a full RFC 3339
    /// timestamp; see [`Task::due_on`].
    pub due_date: String,

    /// Owning project
    pub project_id: RecordId,
}

/// Every writable task column
///
/// Used for both inserts and updates: updates always send the full set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub due_date: String,
    pub project_id: String,
}

impl Task {
    /// Calendar date the task is due
    ///
    /// Timestamps are converted to their UTC date. Returns `None` when the
    /// stored value is neither a date nor a timestamp.
    pub fn due_on(&self) -> Option<NaiveDate> {
        let raw = self.due_date.trim();
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .or_else(|| {
                DateTime::parse_from_rfc3339(raw)
                    .ok()
                    .map(|ts| ts.naive_utc().date())
            })
    }

    /// Lists every task
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or a row does not decode
    pub async fn list(store: &dyn RecordStore) -> StoreResult<Vec<Task>> {
        let rows = store.list(Table::Tasks, &Query::all()).await?;
        db::decode_rows(Table::Tasks, rows)
    }

    /// Inserts a task and returns it with its assigned key
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the insert or returns no row
    pub async fn create(store: &dyn RecordStore, fields: &TaskFields) -> StoreResult<Task> {
        let record = db::encode(Table::Tasks, fields)?;
        let rows = store.insert(Table::Tasks, record).await?;
        let task: Task = db::decode_inserted(Table::Tasks, rows)?;

        tracing::info!(task_id = %task.task_id, title = %task.title, "Task created");
        Ok(task)
    }

    /// Overwrites every writable column of a task
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the update
    pub async fn update(
        store: &dyn RecordStore,
        task_id: &RecordId,
        fields: &TaskFields,
    ) -> StoreResult<()> {
        let record = db::encode(Table::Tasks, fields)?;
        store.update(Table::Tasks, task_id, record).await?;

        tracing::info!(task_id = %task_id, "Task updated");
        Ok(())
    }

    /// Deletes a task
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the delete
    pub async fn delete(store: &dyn RecordStore, task_id: &RecordId) -> StoreResult<()> {
        store.delete(Table::Tasks, task_id).await?;

        tracing::info!(task_id = %task_id, "Task deleted");
        Ok(())
    }
}
