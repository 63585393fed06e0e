//! In-memory record store
//!
//! Process-local tables with the same contract as the REST store: inserts get
//! a UUID v4 key unless the record already carries one, listing honours
//! equality filters, and update/delete of a missing key succeed silently.
//!
//! Used by the binary's offline mode and by the test suites.

use super::{Query, RecordStore, StoreError, StoreResult, Table};
use crate::models::RecordId;
use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::HashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Record store holding every table in memory
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<Table, Vec<JsonValue>>>,
}

impl MemoryStore {
    /// Creates an empty store
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Appends rows verbatim, keys included
    pub async fn seed(&self, table: Table, rows: impl IntoIterator<Item = JsonValue>) {
        self.tables
            .lock()
            .await
            .entry(table)
            .or_default()
            .extend(rows);
    }

    /// Number of rows currently in `table`
    pub async fn len(&self, table: Table) -> usize {
        self.tables.lock().await.get(&table).map_or(0, Vec::len)
    }
}

/// Text form of a scalar cell, as it would appear in a filter
fn cell_text(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn cell_matches(row: &JsonValue, column: &str, expected: &str) -> bool {
    row.get(column)
        .and_then(cell_text)
        .is_some_and(|text| text == expected)
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn list(&self, table: Table, query: &Query) -> StoreResult<Vec<JsonValue>> {
        let tables = self.tables.lock().await;
        let rows = tables.get(&table).map(Vec::as_slice).unwrap_or_default();

        Ok(rows
            .iter()
            .filter(|row| {
                query
                    .filters()
                    .iter()
                    .all(|(column, value)| cell_matches(row, column, value))
            })
            .cloned()
            .collect())
    }

    async fn insert(&self, table: Table, record: JsonValue) -> StoreResult<Vec<JsonValue>> {
        let JsonValue::Object(mut row) = record else {
            return Err(StoreError::Rejected {
                status: 400,
                message: format!("{} record must be a JSON object", table),
            });
        };

        let key = table.key_column();
        if row.get(key).map_or(true, JsonValue::is_null) {
            row.insert(key.to_string(), JsonValue::String(Uuid::new_v4().to_string()));
        }

        let row = JsonValue::Object(row);
        self.tables
            .lock()
            .await
            .entry(table)
            .or_default()
            .push(row.clone());

        Ok(vec![row])
    }

    async fn update(&self, table: Table, id: &RecordId, fields: JsonValue) -> StoreResult<()> {
        let JsonValue::Object(fields) = fields else {
            return Err(StoreError::Rejected {
                status: 400,
                message: format!("{} update must be a JSON object", table),
            });
        };

        let mut tables = self.tables.lock().await;
        let rows = tables.entry(table).or_default();
        for row in rows
            .iter_mut()
            .filter(|row| cell_matches(row, table.key_column(), id.as_str()))
        {
            if let JsonValue::Object(cells) = row {
                for (column, value) in &fields {
                    cells.insert(column.clone(), value.clone());
                }
            }
        }

        Ok(())
    }

    async fn delete(&self, table: Table, id: &RecordId) -> StoreResult<()> {
        let mut tables = self.tables.lock().await;
        if let Some(rows) = tables.get_mut(&table) {
            rows.retain(|row| !cell_matches(row, table.key_column(), id.as_str()));
        }
        Ok(())
    }
}
