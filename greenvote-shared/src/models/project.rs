//! Project model
//!
//! Projects are the things the community votes on. They are provisioned on
//! the backend and are read-only here.

use super::RecordId;
use crate::db::{self, Query, RecordStore, StoreResult, Table};
use serde::{Deserialize, Serialize};

/// Project row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: RecordId,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,
}

impl Project {
    /// Lists every project
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or a row does not decode
    pub async fn list(store: &dyn RecordStore) -> StoreResult<Vec<Project>> {
        let rows = store.list(Table::Projects, &Query::all()).await?;
        db::decode_rows(Table::Projects, rows)
    }

    /// Finds a project by key
    ///
    /// # Errors
    ///
    /// Returns an error if the store request fails or the row does not decode
    pub async fn find(store: &dyn RecordStore, project_id: &RecordId) -> StoreResult<Option<Project>> {
        let rows = store
            .list(Table::Projects, &Query::all().eq("project_id", project_id))
            .await?;
        Ok(db::decode_rows(Table::Projects, rows)?.into_iter().next())
    }
}
