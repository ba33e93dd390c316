use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::RepoError;

/// User repository - persistence for the user aggregate and its posts.
///
/// Implementations must enforce uniqueness of `username` and `provider_id`:
/// [`UserRepository::insert`] reports a clash as [`RepoError::Constraint`].
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user, with posts, by id.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError>;

    /// Find a user, with posts, by local username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Find a user, with posts, by federated provider id.
    async fn find_by_provider_id(&self, provider_id: &str) -> Result<Option<User>, RepoError>;

    /// Persist a new user.
    async fn insert(&self, user: User) -> Result<User, RepoError>;

    /// Append a post to a user's collection in a single write.
    ///
    /// Returns [`RepoError::NotFound`] when the user does not exist.
    async fn append_post(&self, user_id: Uuid, post: Post) -> Result<(), RepoError>;

    /// Every user together with their posts.
    async fn list_with_posts(&self) -> Result<Vec<User>, RepoError>;
}
