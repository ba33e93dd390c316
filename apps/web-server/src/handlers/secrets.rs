//! Secret submission.

use actix_web::{HttpResponse, web};

use secretly_core::DomainError;
use secretly_shared::SubmitForm;

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::session::CurrentSession;
use crate::state::AppState;
use crate::views;

use super::{html, redirect};

/// GET /submit
pub async fn submit_page(CurrentSession(session): CurrentSession) -> HttpResponse {
    if !session.is_authenticated() {
        return redirect("/login");
    }
    html(views::submit_form(&session))
}

/// POST /submit
///
/// Anonymous requests are sent to the login page before the body is looked at.
pub async fn submit(
    state: web::Data<AppState>,
    CurrentSession(session): CurrentSession,
    form: Result<web::Form<SubmitForm>, actix_web::Error>,
) -> AppResult<HttpResponse> {
    if !session.is_authenticated() {
        return Ok(redirect("/login"));
    }
    let form = form.map_err(|e| AppError::BadRequest(e.to_string()))?;

    match state.submissions.submit(&session, form.into_inner().content).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, posts = user.posts.len(), "Secret submitted");
            Ok(redirect("/secretly"))
        }
        Err(DomainError::Unauthenticated) => Ok(redirect("/login")),
        Err(e @ DomainError::NotFound { .. }) => {
            // The session outlived its user.
            tracing::error!(error = %e, "Submit for unknown user");
            Err(AppError::NotFound("User".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
