//! Auth Gateway - bridges inbound credentials or federated profiles to a
//! session identity.
//!
//! A session identity is only ever produced after the underlying check has
//! succeeded; nothing here builds one from raw request input.

use std::sync::Arc;

use crate::domain::{Session, SessionIdentity};
use crate::error::DomainError;
use crate::ports::{FederatedProfile, SessionRevocations, TokenService};

use super::user_store::{CredentialVerifier, FindOrCreate, UserStore};

pub struct AuthGateway {
    users: Arc<UserStore>,
    tokens: Arc<dyn TokenService>,
    revocations: Arc<dyn SessionRevocations>,
}

impl AuthGateway {
    pub fn new(
        users: Arc<UserStore>,
        tokens: Arc<dyn TokenService>,
        revocations: Arc<dyn SessionRevocations>,
    ) -> Self {
        Self {
            users,
            tokens,
            revocations,
        }
    }

    /// Register a local user and log them straight in.
    pub async fn sign_up(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<SessionIdentity, DomainError> {
        let user = self.users.register(username, raw_password).await?;
        Ok(SessionIdentity::from(&user))
    }

    pub async fn log_in(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<SessionIdentity, DomainError> {
        let user = self
            .users
            .verify_local_credential(username, raw_password)
            .await?;
        Ok(SessionIdentity::from(&user))
    }

    pub async fn federated_log_in(
        &self,
        profile: &FederatedProfile,
    ) -> Result<SessionIdentity, DomainError> {
        let user = self
            .users
            .find_or_create_by_provider_id(&profile.provider_id)
            .await?;
        Ok(SessionIdentity::from(&user))
    }

    /// Serialize an identity into a session token.
    pub fn establish(&self, identity: &SessionIdentity) -> Result<String, DomainError> {
        self.tokens
            .issue(identity)
            .map_err(|e| DomainError::Internal(e.to_string()))
    }

    /// Rebuild the session from a token.
    ///
    /// Anything that does not validate, or whose session was logged out, is
    /// anonymous. Only a failing revocation lookup is an error.
    pub async fn resume(&self, token: Option<&str>) -> Result<Session, DomainError> {
        let Some(claims) = token.and_then(|t| self.tokens.validate(t).ok()) else {
            return Ok(Session::Anonymous);
        };

        if self.revocations.is_revoked(claims.session_id).await? {
            return Ok(Session::Anonymous);
        }

        Ok(Session::Authenticated(claims.identity))
    }

    /// End the session: the token behind it stops resuming, and the
    /// in-request session becomes anonymous.
    ///
    /// Idempotent. A missing or invalid token has nothing left to revoke.
    pub async fn logout(&self, session: &mut Session, token: Option<&str>) -> Result<(), DomainError> {
        if let Some(claims) = token.and_then(|t| self.tokens.validate(t).ok()) {
            self.revocations
                .revoke(claims.session_id, claims.expires_at)
                .await?;
        }
        session.clear();
        Ok(())
    }

    pub fn session_ttl_seconds(&self) -> i64 {
        self.tokens.expiration_seconds()
    }
}
