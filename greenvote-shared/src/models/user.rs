//! User identity
//!
//! Accounts live in the hosted authentication subsystem, not in a table this
//! workspace reads. All the views ever see of a user is the opaque identifier
//! resolved from the current session (see [`crate::auth`]).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier of an authenticated user
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Wraps an identifier issued by the authentication subsystem
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    /// Returns the identifier as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
