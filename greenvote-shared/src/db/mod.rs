//! Remote record store
//!
//! The views never talk to the hosted backend directly. Everything goes through
//! the [`RecordStore`] trait, which exposes the four verbs every collection
//! supports: list, insert, update and delete. Rows cross the seam as JSON;
//! the typed operations live on the models (`Task::create`, `Tag::list`, ...).
//!
//! # Implementations
//!
//! - [`RestStore`]: the hosted backend's PostgREST endpoint over HTTP
//! - [`MemoryStore`]: process-local tables for offline runs and tests
//!
//! Caching and refresh-after-mutation belong to whoever owns the store, not to
//! the views.

use crate::models::RecordId;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use std::fmt;

pub mod memory;
pub mod rest;

pub use memory::MemoryStore;
pub use rest::{RestStore, RestStoreConfig};

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors returned by a record store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The request never produced a response (connect, timeout, TLS)
    #[error("{0}")]
    Transport(String),

    /// The backend answered with a non-success status
    ///
    /// `message` is the backend's own explanation when it sent one.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// A payload could not be encoded as JSON
    #[error("Invalid {table} payload: {message}")]
    Encode { table: Table, message: String },

    /// A row could not be decoded into its model
    #[error("Invalid {table} row: {message}")]
    Decode { table: Table, message: String },

    /// An insert returned no representation, so no identifier was assigned
    #[error("Insert into {0} returned no rows")]
    EmptyInsert(Table),

    /// The store could not be set up
    #[error("Store configuration error: {0}")]
    Config(String),
}

/// Collections the views read and write
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Tasks,
    Tags,
    Comments,
    Projects,
}

impl Table {
    /// Table name on the backend
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Tasks => "tasks",
            Table::Tags => "tags",
            Table::Comments => "comments",
            Table::Projects => "projects",
        }
    }

    /// Primary key column
    pub fn key_column(&self) -> &'static str {
        match self {
            Table::Tasks => "task_id",
            Table::Tags => "tag_id",
            Table::Comments => "comment_id",
            Table::Projects => "project_id",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Row selection for [`RecordStore::list`]
///
/// Only equality filters are supported; multiple filters are AND-ed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    filters: Vec<(String, String)>,
}

impl Query {
    /// Selects every row
    pub fn all() -> Self {
        Query::default()
    }

    /// Adds a `column = value` filter
    pub fn eq(mut self, column: &str, value: impl fmt::Display) -> Self {
        self.filters.push((column.to_string(), value.to_string()));
        self
    }

    /// Filters in insertion order
    pub fn filters(&self) -> &[(String, String)] {
        &self.filters
    }
}

/// The remote data store seam
///
/// Implementations must return the inserted rows (including the assigned key)
/// from [`insert`](RecordStore::insert). Updating or deleting a key that
/// matches nothing is not an error, mirroring PostgREST.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Lists rows of `table` matching `query`
    async fn list(&self, table: Table, query: &Query) -> StoreResult<Vec<JsonValue>>;

    /// Inserts one record and returns the stored representation
    async fn insert(&self, table: Table, record: JsonValue) -> StoreResult<Vec<JsonValue>>;

    /// Overwrites the given fields of the row keyed by `id`
    async fn update(&self, table: Table, id: &RecordId, fields: JsonValue) -> StoreResult<()>;

    /// Removes the row keyed by `id`
    async fn delete(&self, table: Table, id: &RecordId) -> StoreResult<()>;
}

/// Encodes a model payload for the wire
pub(crate) fn encode<T: serde::Serialize>(table: Table, value: &T) -> StoreResult<JsonValue> {
    serde_json::to_value(value).map_err(|e| StoreError::Encode {
        table,
        message: e.to_string(),
    })
}

/// Decodes listed rows into models
pub(crate) fn decode_rows<T: DeserializeOwned>(
    table: Table,
    rows: Vec<JsonValue>,
) -> StoreResult<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| StoreError::Decode {
                table,
                message: e.to_string(),
            })
        })
        .collect()
}

/// Decodes the row returned by an insert
pub(crate) fn decode_inserted<T: DeserializeOwned>(
    table: Table,
    rows: Vec<JsonValue>,
) -> StoreResult<T> {
    decode_rows(table, rows)?
        .into_iter()
        .next()
        .ok_or(StoreError::EmptyInsert(table))
}
