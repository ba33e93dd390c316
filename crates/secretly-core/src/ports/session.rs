use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::error::RepoError;

/// Record of sessions ended by logout.
///
/// A revoked session id must stay revoked at least until `expires_at`; after
/// that the token is rejected on expiry alone and the record may be dropped.
#[async_trait]
pub trait SessionRevocations: Send + Sync {
    /// Mark a session as ended. Revoking the same id twice is not an error.
    async fn revoke(&self, session_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), RepoError>;

    async fn is_revoked(&self, session_id: Uuid) -> Result<bool, RepoError>;
}
