//! Opaque record identifiers
//!
//! The hosted backend assigns keys server-side. Depending on the table they
//! come back as integers (`bigserial`) or strings (`uuid`, `text`), so both
//! decode into the same [`RecordId`]. Identifiers always serialize as text,
//! which is also how they appear in row filters (`task_id=eq.42`).

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned identifier of a task, tag, comment or project
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Wraps an identifier received from the store or typed by a user
    pub fn new(id: impl Into<String>) -> Self {
        RecordId(id.into())
    }

    /// Returns the identifier as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId(id.to_string())
    }
}

impl From<String> for RecordId {
    fn from(id: String) -> Self {
        RecordId(id)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => RecordId(text),
            RawId::Signed(n) => RecordId(n.to_string()),
            RawId::Unsigned(n) => RecordId(n.to_string()),
        })
    }
}
