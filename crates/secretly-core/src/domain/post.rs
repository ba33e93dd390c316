use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - a single anonymous secret, owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Time-ordered (v7) so ids of posts created by this process sort by insertion.
    pub id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Create a new post stamped with the current time.
    pub fn new(content: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            content,
            created_at: Utc::now(),
        }
    }
}
