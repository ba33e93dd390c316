//! Google sign-in handshake.
//!
//! `begin` stores a random `state` in a short-lived cookie and redirects to
//! Google; `callback` checks the echoed `state`, exchanges the code for a
//! profile and logs the matching user in, creating them on first visit.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use secretly_core::DomainError;
use secretly_core::domain::SessionIdentity;
use secretly_core::ports::FederatedAuthError;
use secretly_shared::OAuthCallbackQuery;

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{OAUTH_STATE_COOKIE, oauth_state_cookie, removal_cookie};
use crate::state::AppState;

use super::auth::start_session;
use super::redirect;

#[derive(Debug, thiserror::Error)]
enum HandshakeError {
    #[error("Google login is not configured")]
    NotConfigured,

    #[error("Provider returned an error: {0}")]
    Denied(String),

    #[error("Missing authorization code")]
    MissingCode,

    #[error("State mismatch")]
    StateMismatch,

    #[error(transparent)]
    Provider(#[from] FederatedAuthError),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// GET /auth/google
pub async fn begin(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let Some(provider) = &state.identity_provider else {
        tracing::warn!("{}", HandshakeError::NotConfigured);
        return Ok(redirect("/login"));
    };

    let nonce = Uuid::new_v4().to_string();
    let mut response = redirect(&provider.authorization_url(&nonce));
    response
        .add_cookie(&oauth_state_cookie(nonce, &state))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

/// GET /auth/google/secretly
///
/// Any failure sends the browser back to `/login` without a session.
pub async fn callback(
    req: HttpRequest,
    state: web::Data<AppState>,
    query: web::Query<OAuthCallbackQuery>,
) -> AppResult<HttpResponse> {
    let expected_state = req.cookie(OAUTH_STATE_COOKIE).map(|c| c.value().to_string());

    let mut response = match complete(&state, query.into_inner(), expected_state).await {
        Ok(identity) => start_session(&state, &identity)?,
        Err(e) => {
            tracing::warn!(error = %e, "Google login failed");
            redirect("/login")
        }
    };

    response
        .add_cookie(&removal_cookie(OAUTH_STATE_COOKIE, "/auth"))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

async fn complete(
    state: &AppState,
    query: OAuthCallbackQuery,
    expected_state: Option<String>,
) -> Result<SessionIdentity, HandshakeError> {
    let provider = state
        .identity_provider
        .as_ref()
        .ok_or(HandshakeError::NotConfigured)?;

    if let Some(error) = query.error {
        return Err(HandshakeError::Denied(error));
    }

    match (query.state, expected_state) {
        (Some(received), Some(expected)) if received == expected => {}
        _ => return Err(HandshakeError::StateMismatch),
    }

    let code = query.code.ok_or(HandshakeError::MissingCode)?;
    let profile = provider.exchange_code(&code).await?;
    let identity = state.auth.federated_log_in(&profile).await?;

    tracing::info!(
        user_id = %identity.id,
        provider = %profile.provider,
        "Federated login succeeded"
    );

    Ok(identity)
}
