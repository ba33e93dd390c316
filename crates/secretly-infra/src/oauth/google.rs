//! Google OAuth 2.0 identity provider.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use secretly_core::ports::{FederatedAuthError, FederatedProfile, IdentityProvider};

const AUTHORIZATION_ENDPOINT: &str = "https://accounts.google.com/o/oauth2/v2/auth";
const TOKEN_ENDPOINT: &str = "https://oauth2.googleapis.com/token";
const USERINFO_ENDPOINT: &str = "https://www.googleapis.com/oauth2/v2/userinfo";

/// Google client registration.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
}

#[derive(Debug, Deserialize)]
struct GoogleTokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct GoogleUserInfo {
    id: String,
}

#[derive(Clone)]
pub struct GoogleIdentityProvider {
    config: GoogleConfig,
    http_client: Client,
}

impl GoogleIdentityProvider {
    pub fn new(config: GoogleConfig) -> Result<Self, FederatedAuthError> {
        if config.client_id.is_empty() || config.client_secret.is_empty() {
            return Err(FederatedAuthError::Config(
                "Google client id and secret are required".to_string(),
            ));
        }

        Ok(Self {
            config,
            http_client: Client::new(),
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityProvider {
    fn authorization_url(&self, state: &str) -> String {
        format!(
            "{AUTHORIZATION_ENDPOINT}?client_id={}&redirect_uri={}&response_type=code&scope=profile&state={}",
            urlencoding::encode(&self.config.client_id),
            urlencoding::encode(&self.config.redirect_uri),
            urlencoding::encode(state)
        )
    }

    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, FederatedAuthError> {
        let token_response = self
            .http_client
            .post(TOKEN_ENDPOINT)
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
                ("code", code),
                ("grant_type", "authorization_code"),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FederatedAuthError::TokenExchange(format!("HTTP error: {e}")))?
            .json::<GoogleTokenResponse>()
            .await
            .map_err(|e| FederatedAuthError::TokenExchange(format!("JSON parse error: {e}")))?;

        let user_info = self
            .http_client
            .get(USERINFO_ENDPOINT)
            .bearer_auth(&token_response.access_token)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| FederatedAuthError::UserInfoFetch(format!("HTTP error: {e}")))?
            .json::<GoogleUserInfo>()
            .await
            .map_err(|e| FederatedAuthError::UserInfoFetch(format!("JSON parse error: {e}")))?;

        tracing::debug!("Google profile fetched");

        Ok(FederatedProfile {
            provider: self.provider_name().to_string(),
            provider_id: user_info.id,
        })
    }

    fn provider_name(&self) -> &str {
        "google"
    }
}
