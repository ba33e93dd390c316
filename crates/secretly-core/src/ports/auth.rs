//! Authentication ports: password hashing and session tokens.

use crate::domain::{SessionClaims, SessionIdentity};

/// Session token service - turns a session identity into an opaque bearer
/// string and back.
pub trait TokenService: Send + Sync {
    /// Issue a token carrying the given identity under a fresh session id.
    fn issue(&self, identity: &SessionIdentity) -> Result<String, AuthError>;

    /// Validate a token and recover the session it carries.
    fn validate(&self, token: &str) -> Result<SessionClaims, AuthError>;

    /// Lifetime of issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh salt.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a hash.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Session lifetime out of range: {0} hours")]
    InvalidLifetime(i64),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
