//! View error types
//!
//! The views know exactly two kinds of failure:
//!
//! - [`LoadError`]: the initial read of a collection failed. The view switches
//!   to a terminal error state and renders nothing else.
//! - [`MutationError`]: a create, update or delete failed. It is always caught
//!   by the handler that issued the request and turned into a failure
//!   notification carrying its message; the view itself stays usable.
//!
//! Once a request has been issued there is no distinction between the backend
//! refusing the data and the network failing: both become one of these.

use greenvote_shared::db::{StoreError, Table};

/// A collection could not be loaded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to load {table}: {message}")]
pub struct LoadError {
    /// Collection whose read failed
    pub table: Table,

    /// Underlying failure text
    pub message: String,
}

impl LoadError {
    /// Wraps a store failure for `table`
    pub fn new(table: Table, err: StoreError) -> Self {
        LoadError {
            table,
            message: err.to_string(),
        }
    }
}

/// A create, update or delete request failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct MutationError {
    message: String,
}

impl MutationError {
    /// Text shown to the user after the operation's failure prefix
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StoreError> for MutationError {
    fn from(err: StoreError) -> Self {
        MutationError {
            message: err.to_string(),
        }
    }
}
