//! Session token decoding
//!
//! The hosted authentication subsystem hands the browser a session whose
//! access token is a JWT. The signed-in user is its `sub` claim.
//!
//! # Verification
//!
//! - With the project's JWT secret: HS256 signature, expiry and the
//!   `authenticated` audience are all checked.
//! - Without it: the claims are decoded unverified (expiry is still checked).
//!   This is what a client holding its own stored session does; the backend
//!   re-verifies the token on every request anyway.
//!
//! # Example
//!
//! ```no_run
//! use greenvote_shared::auth::jwt::{decode_session, JwtError};
//!
//! # fn example(access_token: &str) -> Result<(), JwtError> {
//! let claims = decode_session(access_token, Some("project-jwt-secret"))?;
//! println!("Signed in as {}", claims.sub);
//! # Ok(())
//! # }
//! ```

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

/// Audience the backend stamps on signed-in sessions
pub const SESSION_AUDIENCE: &str = "authenticated";

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    /// Failed to sign a token
    #[cfg(test)]
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Signature, audience or shape did not check out
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,
}

/// Claims of a session access token
///
/// Only the claims the client needs; the backend includes many more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject - user ID
    pub sub: String,

    /// Audience - `authenticated` for signed-in users
    pub aud: String,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Role the backend grants the session
    #[serde(default)]
    pub role: Option<String>,

    /// Email of the signed-in user, when the provider supplies one
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
impl SessionClaims {
    /// Claims for a signed-in user expiring after `expires_in`
    pub(crate) fn new(user_id: impl Into<String>, expires_in: chrono::Duration) -> Self {
        SessionClaims {
            sub: user_id.into(),
            aud: SESSION_AUDIENCE.to_string(),
            exp: (chrono::Utc::now() + expires_in).timestamp(),
            role: Some(SESSION_AUDIENCE.to_string()),
            email: None,
        }
    }
}

/// Signs session claims with HS256, as the backend does
#[cfg(test)]
pub(crate) fn sign_session(claims: &SessionClaims, secret: &str) -> Result<String, JwtError> {
    use jsonwebtoken::{encode, EncodingKey, Header};

    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&Header::new(Algorithm::HS256), claims, &key)
        .map_err(|e| JwtError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Decodes a session access token
///
/// Verifies the signature and audience only when `secret` is given.
///
/// # Errors
///
/// Returns `JwtError::Expired` for expired sessions and
/// `JwtError::ValidationError` for anything else that fails
pub fn decode_session(token: &str, secret: Option<&str>) -> Result<SessionClaims, JwtError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;

    let key = match secret {
        Some(secret) => {
            validation.set_audience(&[SESSION_AUDIENCE]);
            DecodingKey::from_secret(secret.as_bytes())
        }
        None => {
            validation.insecure_disable_signature_validation();
            validation.validate_aud = false;
            DecodingKey::from_secret(&[])
        }
    };

    let token_data = decode::<SessionClaims>(token, &key, &validation).map_err(|e| {
        match e.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            _ => JwtError::ValidationError(format!("Token validation failed: {}", e)),
        }
    })?;

    Ok(token_data.claims)
}
