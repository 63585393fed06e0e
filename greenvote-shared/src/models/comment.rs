//! Comment model
//!
//! Comments hang off a project through their `task_id` column (the backend
//! reuses the task association column for project discussion threads).
//! Authorship is nullable: an anonymous visitor's comment is stored with a
//! `null` user, never a placeholder.

use super::{RecordId, UserId};
use crate::db::{self, Query, RecordStore, StoreResult, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Comment row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Server-assigned key
    pub comment_id: RecordId,

    /// Project the comment belongs to
    pub task_id: RecordId,

    /// Author, if the visitor was signed in
    #[serde(default)]
    pub user_id: Option<UserId>,

    pub content: String,

    /// Client clock at submission time
    pub created_at: DateTime<Utc>,
}

/// Input for posting a comment
///
/// `user_id` serializes as `null` when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateComment {
    pub task_id: RecordId,
    pub user_id: Option<UserId>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Lists the comments posted on a project, in store order
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or a row does not decode
    pub async fn list_for_project(
        store: &dyn RecordStore,
        project_id: &RecordId,
    ) -> StoreResult<Vec<Comment>> {
        let rows = store
            .list(Table::Comments, &Query::all().eq("task_id", project_id))
            .await?;
        db::decode_rows(Table::Comments, rows)
    }

    /// Posts a comment
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the insert or returns no row
    pub async fn create(store: &dyn RecordStore, data: &CreateComment) -> StoreResult<Comment> {
        let record = db::encode(Table::Comments, data)?;
        let rows = store.insert(Table::Comments, record).await?;
        let comment: Comment = db::decode_inserted(Table::Comments, rows)?;

        tracing::info!(
            comment_id = %comment.comment_id,
            project_id = %comment.task_id,
            anonymous = comment.user_id.is_none(),
            "Comment posted"
        );
        Ok(comment)
    }
}
