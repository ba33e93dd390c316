use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Post;

/// User entity - a local account, a federated identity, or both.
///
/// New users are built through [`User::local`] or [`User::federated`], so every
/// user carries at least one way to authenticate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub provider_id: Option<String>,
    /// Insertion order, not display order.
    pub posts: Vec<Post>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a user that signs in with a username and password.
    pub fn local(username: String, password_hash: String) -> Self {
        Self::with_credentials(Some(username), Some(password_hash), None)
    }

    /// Create a user known only by a federated provider id.
    pub fn federated(provider_id: String) -> Self {
        Self::with_credentials(None, None, Some(provider_id))
    }

    fn with_credentials(
        username: Option<String>,
        password_hash: Option<String>,
        provider_id: Option<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            provider_id,
            posts: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
