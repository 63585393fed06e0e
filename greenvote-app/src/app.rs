/// Application wiring
///
/// Turns a [`Config`] into the collaborators every view is built with.
///
/// # Example
///
/// ```no_run
/// use greenvote::{app, config::Config, views::TasksView};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let collaborators = app::build_collaborators(&config)?;
/// let mut tasks = TasksView::new(&collaborators);
/// tasks.activate().await;
/// # Ok(())
/// # }
/// ```

use crate::config::{Config, StoreConfig};
use crate::views::Collaborators;
use greenvote_shared::auth::SessionIdentity;
use greenvote_shared::db::{MemoryStore, RecordStore, RestStore};
use greenvote_shared::notify::TracingNotifier;
use std::sync::Arc;

/// Builds the store, identity and notifier selected by `config`
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be built from the store settings
pub fn build_collaborators(config: &Config) -> anyhow::Result<Collaborators> {
    let store: Arc<dyn RecordStore> = match &config.store {
        StoreConfig::Rest(rest) => {
            tracing::info!(url = %rest.base_url, timeout_seconds = rest.timeout_seconds, "Using REST record store");
            Arc::new(RestStore::new(rest.clone())?)
        }
        StoreConfig::Memory => {
            tracing::info!("Using in-memory record store");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(Collaborators {
        store,
        identity: Arc::new(SessionIdentity::new(
            config.access_token.clone(),
            config.jwt_secret.clone(),
        )),
        notifier: Arc::new(TracingNotifier),
    })
}
