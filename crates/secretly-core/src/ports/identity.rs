//! Federated identity port - an external OAuth provider.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Profile returned by a provider after a successful handshake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FederatedProfile {
    /// Provider name (e.g. "google").
    pub provider: String,
    /// Stable provider-specific user id.
    pub provider_id: String,
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// URL the browser is sent to in order to start the handshake.
    fn authorization_url(&self, state: &str) -> String;

    /// Exchange an authorization code for the user's profile.
    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, FederatedAuthError>;

    fn provider_name(&self) -> &str;
}

#[derive(Debug, thiserror::Error)]
pub enum FederatedAuthError {
    #[error("Failed to exchange token: {0}")]
    TokenExchange(String),

    #[error("Failed to fetch user info: {0}")]
    UserInfoFetch(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
