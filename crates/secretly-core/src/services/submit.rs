//! Submit Workflow - authenticated append of one post.

use std::sync::Arc;

use crate::domain::{Session, User};
use crate::error::DomainError;

use super::user_store::UserStore;

pub struct SubmitWorkflow {
    users: Arc<UserStore>,
}

impl SubmitWorkflow {
    pub fn new(users: Arc<UserStore>) -> Self {
        Self { users }
    }

    /// Append `content` to the session user's posts.
    ///
    /// Anonymous sessions are rejected before the store is touched.
    pub async fn submit(&self, session: &Session, content: String) -> Result<User, DomainError> {
        let identity = session.identity().ok_or(DomainError::Unauthenticated)?;
        self.users.append_post(identity.id, content).await
    }
}
