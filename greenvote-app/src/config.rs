//! Configuration management
//!
//! Loads configuration from environment variables (and a `.env` file in
//! development) into a type-safe struct.
//!
//! # Environment Variables
//!
//! - `GREENVOTE_STORE`: `rest` (default) or `memory`
//! - `SUPABASE_URL`: backend project URL (required for `rest`)
//! - `SUPABASE_ANON_KEY`: public API key (required for `rest`)
//! - `SUPABASE_ACCESS_TOKEN`: session access token of the signed-in user
//! - `SUPABASE_JWT_SECRET`: secret used to verify the session token
//! - `GREENVOTE_PROJECT_ID`: project shown on the detail view (required)
//! - `GREENVOTE_REQUEST_TIMEOUT_SECS`: HTTP request timeout (default: 30)
//! - `RUST_LOG`: log filter
//!
//! # Example
//!
//! ```no_run
//! use greenvote::config::Config;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = Config::from_env()?;
//! println!("Showing project {}", config.project_id);
//! # Ok(())
//! # }
//! ```

use greenvote_shared::db::RestStoreConfig;
use greenvote_shared::models::RecordId;
use std::collections::HashMap;
use std::env;

/// Which record store backs the views
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreConfig {
    /// The hosted backend over HTTP
    Rest(RestStoreConfig),

    /// Process-local tables; nothing persists
    Memory,
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Record store selection
    pub store: StoreConfig,

    /// Session access token of the signed-in user, if any
    pub access_token: Option<String>,

    /// Secret for verifying the session token
    ///
    /// Without it the token's claims are trusted as decoded.
    pub jwt_secret: Option<String>,

    /// Project whose comments the detail view shows
    pub project_id: RecordId,
}

impl Config {
    /// Loads configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        Self::from_vars(&env::vars().collect())
    }

    /// Builds configuration from an explicit variable map
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is invalid
    pub fn from_vars(vars: &HashMap<String, String>) -> anyhow::Result<Self> {
        let var = |name: &str| vars.get(name).filter(|v| !v.is_empty()).cloned();
        let required = |name: &str| {
            var(name).ok_or_else(|| anyhow::anyhow!("{} environment variable is required", name))
        };

        let access_token = var("SUPABASE_ACCESS_TOKEN");

        let store = match var("GREENVOTE_STORE").as_deref().unwrap_or("rest") {
            "rest" => {
                let timeout_seconds = var("GREENVOTE_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|| "30".to_string())
                    .parse::<u64>()?;
                if timeout_seconds == 0 {
                    anyhow::bail!("GREENVOTE_REQUEST_TIMEOUT_SECS must be > 0");
                }

                let mut rest = RestStoreConfig::new(
                    required("SUPABASE_URL")?,
                    required("SUPABASE_ANON_KEY")?,
                );
                rest.access_token = access_token.clone();
                rest.timeout_seconds = timeout_seconds;
                StoreConfig::Rest(rest)
            }
            "memory" => StoreConfig::Memory,
            other => anyhow::bail!("GREENVOTE_STORE must be 'rest' or 'memory', got '{}'", other),
        };

        Ok(Self {
            store,
            access_token,
            jwt_secret: var("SUPABASE_JWT_SECRET"),
            project_id: RecordId::new(required("GREENVOTE_PROJECT_ID")?),
        })
    }
}
