//! Read-only pages.

use actix_web::{HttpResponse, web};

use crate::middleware::error::AppResult;
use crate::middleware::session::CurrentSession;
use crate::state::AppState;
use crate::views;

use super::html;

/// GET /
pub async fn landing(CurrentSession(session): CurrentSession) -> HttpResponse {
    html(views::landing(&session))
}

/// GET /signup
pub async fn signup(
    state: web::Data<AppState>,
    CurrentSession(session): CurrentSession,
) -> HttpResponse {
    html(views::signup_form(&session, state.identity_provider.is_some()))
}

/// GET /login
pub async fn login(
    state: web::Data<AppState>,
    CurrentSession(session): CurrentSession,
) -> HttpResponse {
    html(views::login_form(&session, state.identity_provider.is_some()))
}

/// GET /secretly
///
/// Public; every post by every user, newest first.
pub async fn feed(
    state: web::Data<AppState>,
    CurrentSession(session): CurrentSession,
) -> AppResult<HttpResponse> {
    let entries = state.feed.list_all_posts_by_recency().await?;

    tracing::debug!(count = entries.len(), "Rendering feed");

    Ok(html(views::feed(&entries, &session)))
}
