//! In-memory stores - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use secretly_core::domain::{Post, User};
use secretly_core::error::RepoError;
use secretly_core::ports::{SessionRevocations, UserRepository};

/// User repository backed by a `Vec` behind an async `RwLock`.
///
/// Uniqueness checks and inserts happen under one write lock, which gives the
/// same guarantee as the unique indexes in PostgreSQL.
/// Note: Data is lost on process restart.
pub struct InMemoryUserRepository {
    users: RwLock<Vec<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Vec::new()),
        }
    }

    async fn find_where(&self, predicate: impl Fn(&User) -> bool) -> Option<User> {
        let users = self.users.read().await;
        users.iter().find(|u| predicate(u)).cloned()
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn same(a: &Option<String>, b: &Option<String>) -> bool {
    matches!((a, b), (Some(a), Some(b)) if a == b)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.find_where(|u| u.id == id).await)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .find_where(|u| u.username.as_deref() == Some(username))
            .await)
    }

    async fn find_by_provider_id(&self, provider_id: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .find_where(|u| u.provider_id.as_deref() == Some(provider_id))
            .await)
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        for existing in users.iter() {
            if existing.id == user.id {
                return Err(RepoError::Constraint("users.id".to_string()));
            }
            if same(&existing.username, &user.username) {
                return Err(RepoError::Constraint("users.username".to_string()));
            }
            if same(&existing.provider_id, &user.provider_id) {
                return Err(RepoError::Constraint("users.provider_id".to_string()));
            }
        }

        users.push(user.clone());
        Ok(user)
    }

    async fn append_post(&self, user_id: Uuid, post: Post) -> Result<(), RepoError> {
        let mut users = self.users.write().await;
        let user = users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(RepoError::NotFound)?;

        user.posts.push(post);
        Ok(())
    }

    async fn list_with_posts(&self) -> Result<Vec<User>, RepoError> {
        Ok(self.users.read().await.clone())
    }
}

/// Revoked session ids, each kept until its token would have expired.
pub struct InMemorySessionRevocations {
    revoked: RwLock<HashMap<Uuid, DateTime<Utc>>>,
}

impl InMemorySessionRevocations {
    pub fn new() -> Self {
        Self {
            revoked: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemorySessionRevocations {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRevocations for InMemorySessionRevocations {
    async fn revoke(&self, session_id: Uuid, expires_at: DateTime<Utc>) -> Result<(), RepoError> {
        let now = Utc::now();
        let mut revoked = self.revoked.write().await;
        revoked.retain(|_, exp| *exp > now);
        revoked.insert(session_id, expires_at);
        Ok(())
    }

    async fn is_revoked(&self, session_id: Uuid) -> Result<bool, RepoError> {
        Ok(self.revoked.read().await.contains_key(&session_id))
    }
}
