//! Current-user resolution
//!
//! The views ask the authentication subsystem one question: who is signed in?
//! The answer is an opaque [`UserId`] or nobody.
//!
//! # Providers
//!
//! - [`SessionIdentity`]: reads the `sub` claim of the session access token
//! - [`FixedIdentity`]: a constant answer, for anonymous runs and tests
//!
//! # Example
//!
//! ```no_run
//! use greenvote_shared::auth::{IdentityProvider, SessionIdentity};
//!
//! # async fn example(token: String) -> Result<(), Box<dyn std::error::Error>> {
//! let identity = SessionIdentity::new(Some(token), None);
//! match identity.current_user().await? {
//!     Some(user) => println!("signed in as {}", user),
//!     None => println!("anonymous"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod jwt;

use crate::models::UserId;
use async_trait::async_trait;

/// Errors from resolving the current user
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The session token could not be used
    #[error("Invalid session: {0}")]
    InvalidSession(#[from] jwt::JwtError),
}

/// The authentication subsystem seam
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Resolves the signed-in user, or `None` for an anonymous visitor
    async fn current_user(&self) -> Result<Option<UserId>, IdentityError>;
}

/// Identity taken from a session access token
#[derive(Debug, Clone, Default)]
pub struct SessionIdentity {
    access_token: Option<String>,
    jwt_secret: Option<String>,
}

impl SessionIdentity {
    /// Creates a provider for the given session
    ///
    /// `access_token` is `None` when nobody is signed in. With `jwt_secret`
    /// the token is verified, otherwise only decoded.
    pub fn new(access_token: Option<String>, jwt_secret: Option<String>) -> Self {
        SessionIdentity {
            access_token,
            jwt_secret,
        }
    }
}

#[async_trait]
impl IdentityProvider for SessionIdentity {
    async fn current_user(&self) -> Result<Option<UserId>, IdentityError> {
        let Some(token) = self.access_token.as_deref() else {
            return Ok(None);
        };

        let claims = jwt::decode_session(token, self.jwt_secret.as_deref())?;
        tracing::debug!(user_id = %claims.sub, "Session resolved");
        Ok(Some(UserId::new(claims.sub)))
    }
}

/// Identity provider with a constant answer
#[derive(Debug, Clone, Default)]
pub struct FixedIdentity {
    user: Option<UserId>,
}

impl FixedIdentity {
    /// Always resolves to `user`
    pub fn signed_in(user: UserId) -> Self {
        FixedIdentity { user: Some(user) }
    }

    /// Always resolves to nobody
    pub fn anonymous() -> Self {
        FixedIdentity { user: None }
    }
}

#[async_trait]
impl IdentityProvider for FixedIdentity {
    async fn current_user(&self) -> Result<Option<UserId>, IdentityError> {
        Ok(self.user.clone())
    }
}
