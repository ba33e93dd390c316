use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::User;

/// The public-safe projection of a user that a session carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionIdentity {
    pub id: Uuid,
    pub username: Option<String>,
}

impl From<&User> for SessionIdentity {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
        }
    }
}

/// What a valid session token decodes to.
///
/// `session_id` names this particular login so it can be revoked on logout
/// while the token itself is still within its lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionClaims {
    pub session_id: Uuid,
    pub identity: SessionIdentity,
    pub expires_at: DateTime<Utc>,
}

/// Per-request authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(SessionIdentity),
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        match self {
            Session::Authenticated(identity) => Some(identity),
            Session::Anonymous => None,
        }
    }

    /// Drop the identity, if any.
    pub fn clear(&mut self) {
        *self = Session::Anonymous;
    }
}
