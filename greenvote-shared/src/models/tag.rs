//! Tag model
//!
//! A tag row is a name attached to one task. There is no separate vocabulary
//! table: the names offered for selection are whatever tag rows exist. Tags
//! are only ever created, never updated or deleted, and duplicate names are
//! allowed.

use super::RecordId;
use crate::db::{self, Query, RecordStore, StoreResult, Table};
use serde::{Deserialize, Serialize};

/// Tag row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Server-assigned key
    pub tag_id: RecordId,

    /// Task the tag is attached to
    ///
    /// Rows seeded directly into the table may not reference a task.
    #[serde(default)]
    pub task_id: Option<RecordId>,

    pub name: String,
}

/// Input for attaching a tag to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateTag {
    pub task_id: RecordId,
    pub name: String,
}

impl Tag {
    /// Lists every tag row
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or a row does not decode
    pub async fn list(store: &dyn RecordStore) -> StoreResult<Vec<Tag>> {
        let rows = store.list(Table::Tags, &Query::all()).await?;
        db::decode_rows(Table::Tags, rows)
    }

    /// Lists the tags attached to one task
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or a row does not decode
    pub async fn list_for_task(store: &dyn RecordStore, task_id: &RecordId) -> StoreResult<Vec<Tag>> {
        let rows = store
            .list(Table::Tags, &Query::all().eq("task_id", task_id))
            .await?;
        db::decode_rows(Table::Tags, rows)
    }

    /// Attaches a tag to a task
    ///
    /// # Errors
    ///
    /// Returns an error if the store rejects the insert or returns no row
    pub async fn create(store: &dyn RecordStore, data: &CreateTag) -> StoreResult<Tag> {
        let record = db::encode(Table::Tags, data)?;
        let rows = store.insert(Table::Tags, record).await?;
        let tag: Tag = db::decode_inserted(Table::Tags, rows)?;

        tracing::debug!(tag_id = %tag.tag_id, task_id = %data.task_id, name = %tag.name, "Tag attached");
        Ok(tag)
    }
}
