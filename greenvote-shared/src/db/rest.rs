//! PostgREST-backed record store
//!
//! Talks to the hosted backend's REST endpoint (`{base_url}/rest/v1/{table}`).
//! This adapter owns transport details only: headers, filters, the request
//! timeout and mapping non-success responses to [`StoreError`].
//!
//! # Requests
//!
//! ```text
//! list    GET    /rest/v1/tasks?select=*&project_id=eq.proj-42
//! insert  POST   /rest/v1/tasks            Prefer: return=representation
//! update  PATCH  /rest/v1/tasks?task_id=eq.17
//! delete  DELETE /rest/v1/tasks?task_id=eq.17
//! ```
//!
//! # Example
//!
//! ```no_run
//! use greenvote_shared::db::{Query, RecordStore, RestStore, RestStoreConfig, Table};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = RestStore::new(RestStoreConfig::new(
//!     "https://example.supabase.co",
//!     "public-anon-key",
//! ))?;
//!
//! let rows = store.list(Table::Tasks, &Query::all()).await?;
//! println!("{} tasks", rows.len());
//! # Ok(())
//! # }
//! ```

use super::{Query, RecordStore, StoreError, StoreResult, Table};
use crate::models::RecordId;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use std::time::Duration;
use tracing::{debug, warn};

/// Configuration for the REST store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestStoreConfig {
    /// Project URL, e.g. `https://abcd.supabase.co`
    pub base_url: String,

    /// Public (anon) API key, sent as `apikey` on every request
    pub api_key: String,

    /// Session access token; requests fall back to the API key without one
    pub access_token: Option<String>,

    /// Per-request timeout
    ///
    /// Default: 30 seconds
    pub timeout_seconds: u64,
}

impl RestStoreConfig {
    /// Creates a config with no session and the default timeout
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        RestStoreConfig {
            base_url: base_url.into(),
            api_key: api_key.into(),
            access_token: None,
            timeout_seconds: 30,
        }
    }

    /// Sends requests on behalf of a signed-in user
    pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }
}

/// Record store backed by the hosted PostgREST endpoint
#[derive(Debug, Clone)]
pub struct RestStore {
    client: Client,
    rest_url: String,
}

impl RestStore {
    /// Builds the HTTP client with auth headers and timeout baked in
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if a key contains characters that are not
    /// valid in a header, or the client cannot be constructed.
    pub fn new(config: RestStoreConfig) -> StoreResult<Self> {
        let bearer = config.access_token.as_deref().unwrap_or(&config.api_key);

        let mut headers = HeaderMap::new();
        headers.insert("apikey", header_value(&config.api_key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", bearer))?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| StoreError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(RestStore {
            client,
            rest_url: format!("{}/rest/v1", config.base_url.trim_end_matches('/')),
        })
    }

    fn endpoint(&self, table: Table) -> String {
        format!("{}/{}", self.rest_url, table.as_str())
    }

    async fn send(&self, table: Table, request: RequestBuilder) -> StoreResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let err = rejection(status, &body);
        warn!(table = %table, status = status.as_u16(), error = %err, "Store request rejected");
        Err(err)
    }

    async fn rows(table: Table, response: Response) -> StoreResult<Vec<JsonValue>> {
        response
            .json::<Vec<JsonValue>>()
            .await
            .map_err(|e| StoreError::Decode {
                table,
                message: e.to_string(),
            })
    }
}

#[async_trait]
impl RecordStore for RestStore {
    async fn list(&self, table: Table, query: &Query) -> StoreResult<Vec<JsonValue>> {
        debug!(table = %table, filters = query.filters().len(), "Listing rows");
        let request = self
            .client
            .get(self.endpoint(table))
            .query(&list_params(query));
        let response = self.send(table, request).await?;
        Self::rows(table, response).await
    }

    async fn insert(&self, table: Table, record: JsonValue) -> StoreResult<Vec<JsonValue>> {
        debug!(table = %table, "Inserting row");
        let request = self
            .client
            .post(self.endpoint(table))
            .header("Prefer", "return=representation")
            .json(&record);
        let response = self.send(table, request).await?;
        Self::rows(table, response).await
    }

    async fn update(&self, table: Table, id: &RecordId, fields: JsonValue) -> StoreResult<()> {
        debug!(table = %table, id = %id, "Updating row");
        let request = self
            .client
            .patch(self.endpoint(table))
            .query(&key_params(table, id))
            .header("Prefer", "return=minimal")
            .json(&fields);
        self.send(table, request).await?;
        Ok(())
    }

    async fn delete(&self, table: Table, id: &RecordId) -> StoreResult<()> {
        debug!(table = %table, id = %id, "Deleting row");
        let request = self
            .client
            .delete(self.endpoint(table))
            .query(&key_params(table, id))
            .header("Prefer", "return=minimal");
        self.send(table, request).await?;
        Ok(())
    }
}

fn header_value(value: &str) -> StoreResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|_| StoreError::Config("API key or token is not a valid header value".to_string()))
}

fn list_params(query: &Query) -> Vec<(String, String)> {
    let mut params = vec![("select".to_string(), "*".to_string())];
    params.extend(
        query
            .filters()
            .iter()
            .map(|(column, value)| (column.clone(), format!("eq.{}", value))),
    );
    params
}

fn key_params(table: Table, id: &RecordId) -> [(&'static str, String); 1] {
    [(table.key_column(), format!("eq.{}", id))]
}

/// Error body PostgREST sends alongside non-success statuses
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

fn rejection(status: StatusCode, body: &str) -> StoreError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .map(|b| b.message)
        .unwrap_or_else(|_| status.to_string());

    StoreError::Rejected {
        status: status.as_u16(),
        message,
    }
}
