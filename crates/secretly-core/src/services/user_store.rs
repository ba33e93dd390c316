//! User Store - registration, credential checks and post appends over a
//! [`UserRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, User};
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

/// Verifies a local username/password pair.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    /// Fails with [`DomainError::InvalidCredential`] for an unknown user and for
    /// a wrong password alike.
    async fn verify_local_credential(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<User, DomainError>;
}

/// Resolves a federated identity to a local user, creating it on first sight.
#[async_trait]
pub trait FindOrCreate: Send + Sync {
    async fn find_or_create_by_provider_id(&self, provider_id: &str) -> Result<User, DomainError>;
}

pub struct UserStore {
    repo: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl UserStore {
    pub fn new(repo: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { repo, passwords }
    }

    /// Register a local user with a freshly hashed password.
    pub async fn register(&self, username: &str, raw_password: &str) -> Result<User, DomainError> {
        if username.is_empty() {
            return Err(DomainError::Validation("No username was given".to_string()));
        }
        if raw_password.is_empty() {
            return Err(DomainError::Validation("No password was given".to_string()));
        }

        // Cheap early exit; the store's unique index is what actually decides.
        if self.repo.find_by_username(username).await?.is_some() {
            return Err(DomainError::DuplicateUsername(username.to_string()));
        }

        let password_hash = self
            .passwords
            .hash(raw_password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        match self
            .repo
            .insert(User::local(username.to_string(), password_hash))
            .await
        {
            Ok(user) => Ok(user),
            Err(RepoError::Constraint(_)) => {
                Err(DomainError::DuplicateUsername(username.to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<User, DomainError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::user_not_found(id))
    }

    /// Append a post stamped with the current time and return the updated user.
    pub async fn append_post(&self, user_id: Uuid, content: String) -> Result<User, DomainError> {
        match self.repo.append_post(user_id, Post::new(content)).await {
            Ok(()) => self.find_by_id(user_id).await,
            Err(RepoError::NotFound) => Err(DomainError::user_not_found(user_id)),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl CredentialVerifier for UserStore {
    async fn verify_local_credential(
        &self,
        username: &str,
        raw_password: &str,
    ) -> Result<User, DomainError> {
        let user = self
            .repo
            .find_by_username(username)
            .await?
            .ok_or(DomainError::InvalidCredential)?;

        let Some(hash) = user.password_hash.as_deref() else {
            return Err(DomainError::InvalidCredential);
        };

        let valid = self
            .passwords
            .verify(raw_password, hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        if valid {
            Ok(user)
        } else {
            Err(DomainError::InvalidCredential)
        }
    }
}

#[async_trait]
impl FindOrCreate for UserStore {
    async fn find_or_create_by_provider_id(&self, provider_id: &str) -> Result<User, DomainError> {
        if provider_id.is_empty() {
            return Err(DomainError::Validation(
                "Provider id must not be empty".to_string(),
            ));
        }

        if let Some(user) = self.repo.find_by_provider_id(provider_id).await? {
            return Ok(user);
        }

        match self
            .repo
            .insert(User::federated(provider_id.to_string()))
            .await
        {
            Ok(user) => Ok(user),
            // Lost a race with a concurrent first login: the winner's row is the answer.
            Err(RepoError::Constraint(_)) => self
                .repo
                .find_by_provider_id(provider_id)
                .await?
                .ok_or_else(|| {
                    DomainError::Internal(format!(
                        "provider id {provider_id} conflicted but no user was found"
                    ))
                }),
            Err(e) => Err(e.into()),
        }
    }
}
