//! Local account handlers: sign up, log in, log out.

use actix_web::{HttpRequest, HttpResponse, web};

use secretly_core::DomainError;
use secretly_core::domain::SessionIdentity;
use secretly_shared::CredentialsForm;

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::{
    CurrentSession, SESSION_COOKIE, removal_cookie, session_cookie, session_token,
};
use crate::state::AppState;

use super::redirect;

/// Issue the session cookie for `identity` and send the browser to the feed.
pub(super) fn start_session(state: &AppState, identity: &SessionIdentity) -> AppResult<HttpResponse> {
    let token = state.auth.establish(identity)?;

    let mut response = redirect("/secretly");
    response
        .add_cookie(&session_cookie(token, state))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match state.auth.sign_up(&form.username, &form.password).await {
        Ok(identity) => {
            tracing::info!(user_id = %identity.id, "User registered");
            start_session(&state, &identity)
        }
        Err(DomainError::DuplicateUsername(_)) => {
            tracing::info!("Signup rejected: username taken");
            Ok(redirect("/signup"))
        }
        Err(DomainError::Validation(reason)) => {
            tracing::info!(%reason, "Signup rejected");
            Ok(redirect("/signup"))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /login
///
/// The credential is verified before any session exists; a failed attempt
/// leaves the browser without a session cookie.
pub async fn login(
    state: web::Data<AppState>,
    form: web::Form<CredentialsForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();

    match state.auth.log_in(&form.username, &form.password).await {
        Ok(identity) => {
            tracing::info!(user_id = %identity.id, "User logged in");
            start_session(&state, &identity)
        }
        Err(DomainError::InvalidCredential) => {
            tracing::info!("Login rejected");
            Ok(redirect("/login"))
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
///
/// Revokes the session behind the cookie, so a copy of it no longer resumes.
/// Safe to call repeatedly; an anonymous session is simply cleared again.
pub async fn logout(
    req: HttpRequest,
    state: web::Data<AppState>,
    CurrentSession(mut session): CurrentSession,
) -> AppResult<HttpResponse> {
    if let Some(identity) = session.identity() {
        tracing::info!(user_id = %identity.id, "User logged out");
    }
    state
        .auth
        .logout(&mut session, session_token(&req).as_deref())
        .await?;

    let mut response = redirect("/");
    response
        .add_cookie(&removal_cookie(SESSION_COOKIE, "/"))
        .map_err(|e| AppError::Internal(e.to_string()))?;
    Ok(response)
}
