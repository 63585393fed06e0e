//! Common test utilities for integration tests
//!
//! This module provides shared infrastructure for integration tests:
//! - A scripted record store that records every request, fails chosen ones
//!   and can hold requests until released
//! - Test context with collaborators wired to that store
//! - Row and form builders

#![allow(dead_code)]

use async_trait::async_trait;
use greenvote::forms::TaskForm;
use greenvote::views::Collaborators;
use greenvote_shared::auth::FixedIdentity;
use greenvote_shared::db::{MemoryStore, Query, RecordStore, StoreError, StoreResult, Table};
use greenvote_shared::models::{RecordId, UserId};
use greenvote_shared::notify::ToastQueue;
use serde_json::{json, Value as JsonValue};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Kind of store request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    List,
    Insert,
    Update,
    Delete,
}

/// One request as the store received it
#[derive(Debug, Clone)]
pub struct Call {
    pub op: Op,
    pub table: Table,
    pub body: Option<JsonValue>,
}

struct Failure {
    op: Op,
    table: Table,
    skip: usize,
    message: String,
}

/// In-memory store with request recording, failure injection and gates
pub struct ScriptedStore {
    inner: MemoryStore,
    calls: Mutex<Vec<Call>>,
    failures: Mutex<Vec<Failure>>,
    gates: Mutex<HashMap<Op, Arc<Notify>>>,
}

impl ScriptedStore {
    pub fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            calls: Mutex::new(Vec::new()),
            failures: Mutex::new(Vec::new()),
            gates: Mutex::new(HashMap::new()),
        }
    }

    /// Backing tables, for seeding and inspection without recording
    pub fn tables(&self) -> &MemoryStore {
        &self.inner
    }

    /// Requests received so far
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Bodies of the insert requests sent to `table`, in order
    pub fn inserted(&self, table: Table) -> Vec<JsonValue> {
        self.calls()
            .into_iter()
            .filter(|c| c.op == Op::Insert && c.table == table)
            .filter_map(|c| c.body)
            .collect()
    }

    /// Fails the next matching request with `message`
    pub fn fail_next(&self, op: Op, table: Table, message: &str) {
        self.fail_after(op, table, 0, message);
    }

    /// Lets `skip` matching requests through, then fails the next one
    pub fn fail_after(&self, op: Op, table: Table, skip: usize, message: &str) {
        self.failures.lock().unwrap().push(Failure {
            op,
            table,
            skip,
            message: message.to_string(),
        });
    }

    /// Holds every request of kind `op` until the returned gate is notified
    pub fn hold(&self, op: Op) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.lock().unwrap().insert(op, Arc::clone(&gate));
        gate
    }

    async fn enter(&self, op: Op, table: Table, body: Option<JsonValue>) -> StoreResult<()> {
        self.calls.lock().unwrap().push(Call { op, table, body });

        let gate = self.gates.lock().unwrap().get(&op).cloned();
        if let Some(gate) = gate {
            gate.notified().await;
        }

        let mut failures = self.failures.lock().unwrap();
        if let Some(pos) = failures.iter().position(|f| f.op == op && f.table == table) {
            if failures[pos].skip == 0 {
                let failure = failures.remove(pos);
                return Err(StoreError::Rejected {
                    status: 500,
                    message: failure.message,
                });
            }
            failures[pos].skip -= 1;
        }
        Ok(())
    }
}

#[async_trait]
impl RecordStore for ScriptedStore {
    async fn list(&self, table: Table, query: &Query) -> StoreResult<Vec<JsonValue>> {
        self.enter(Op::List, table, None).await?;
        self.inner.list(table, query).await
    }

    async fn insert(&self, table: Table, record: JsonValue) -> StoreResult<Vec<JsonValue>> {
        self.enter(Op::Insert, table, Some(record.clone())).await?;
        self.inner.insert(table, record).await
    }

    async fn update(&self, table: Table, id: &RecordId, fields: JsonValue) -> StoreResult<()> {
        self.enter(Op::Update, table, Some(fields.clone())).await?;
        self.inner.update(table, id, fields).await
    }

    async fn delete(&self, table: Table, id: &RecordId) -> StoreResult<()> {
        self.enter(Op::Delete, table, Some(json!({ "id": id }))).await?;
        self.inner.delete(table, id).await
    }
}

/// Test context containing all necessary resources
pub struct TestContext {
    pub store: Arc<ScriptedStore>,
    pub toasts: Arc<ToastQueue>,
    pub collaborators: Collaborators,
}

impl TestContext {
    /// Context for a visitor who is not signed in
    pub fn new() -> Self {
        Self::with_identity(FixedIdentity::anonymous())
    }

    /// Context for a signed-in user
    pub fn signed_in(user_id: &str) -> Self {
        Self::with_identity(FixedIdentity::signed_in(UserId::new(user_id)))
    }

    fn with_identity(identity: FixedIdentity) -> Self {
        let store = Arc::new(ScriptedStore::new());
        let toasts = Arc::new(ToastQueue::new());
        let collaborators = Collaborators {
            store: store.clone(),
            identity: Arc::new(identity),
            notifier: toasts.clone(),
        };

        Self {
            store,
            toasts,
            collaborators,
        }
    }
}

/// A stored task row
pub fn task_row(task_id: i64, title: &str) -> JsonValue {
    json!({
        "task_id": task_id,
        "title": title,
        "description": format!("{} description", title),
        "status": "open",
        "priority": "medium",
        "due_date": "2024-09-01",
        "project_id": "proj-42",
    })
}

/// A stored tag row
pub fn tag_row(tag_id: i64, task_id: i64, name: &str) -> JsonValue {
    json!({ "tag_id": tag_id, "task_id": task_id, "name": name })
}

/// A create form that passes validation
pub fn filled_task_form(title: &str) -> TaskForm {
    let mut form = TaskForm::default();
    form.title = title.to_string();
    form.description = "Bring gloves".to_string();
    form.status = "open".to_string();
    form.priority = "high".to_string();
    form.due_date = "2024-09-01".to_string();
    form.project_id = "proj-42".to_string();
    form
}
