//! Data Transfer Objects - form and query payloads accepted by the web server.

use serde::{Deserialize, Serialize};

/// Username/password form posted to `/signup` and `/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsForm {
    pub username: String,
    pub password: String,
}

/// Secret submitted to `/submit`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitForm {
    pub content: String,
}

/// Query string the OAuth provider redirects back with.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}
