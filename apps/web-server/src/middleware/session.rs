//! Cookie-backed sessions.
//!
//! The session cookie holds a signed token carrying only `{id, username}` and
//! a session id. Every request resolves it through the auth gateway; a
//! missing, tampered, expired or logged-out cookie yields an anonymous session.

use actix_web::{
    FromRequest, HttpRequest,
    cookie::{Cookie, SameSite, time::Duration},
    dev::Payload,
    web,
};
use std::future::Future;
use std::pin::Pin;

use secretly_core::domain::Session;

use crate::state::AppState;

pub const SESSION_COOKIE: &str = "secretly_session";
pub const OAUTH_STATE_COOKIE: &str = "secretly_oauth_state";

/// How long a federated handshake may take before its state cookie lapses.
const OAUTH_STATE_TTL_MINUTES: i64 = 10;

/// Session extractor. Never fails; unauthenticated requests get
/// [`Session::Anonymous`].
///
/// ```ignore
/// async fn page(CurrentSession(session): CurrentSession) -> impl Responder {
///     session.is_authenticated().to_string()
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSession(pub Session);

impl FromRequest for CurrentSession {
    type Error = actix_web::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = session_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Ok(CurrentSession(Session::Anonymous));
            };

            let session = match state.auth.resume(token.as_deref()).await {
                Ok(session) => session,
                Err(e) => {
                    tracing::warn!(error = %e, "Session lookup failed; continuing anonymously");
                    Session::Anonymous
                }
            };

            Ok(CurrentSession(session))
        })
    }
}

/// Raw session token from the request cookie, if any.
pub fn session_token(req: &HttpRequest) -> Option<String> {
    req.cookie(SESSION_COOKIE).map(|c| c.value().to_string())
}

/// Cookie carrying a freshly issued session token.
pub fn session_cookie(token: String, state: &AppState) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .max_age(Duration::seconds(state.auth.session_ttl_seconds()))
        .finish()
}

/// Short-lived cookie holding the anti-forgery `state` of an OAuth handshake.
pub fn oauth_state_cookie(value: String, state: &AppState) -> Cookie<'static> {
    Cookie::build(OAUTH_STATE_COOKIE, value)
        .path("/auth")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(state.secure_cookies)
        .max_age(Duration::minutes(OAUTH_STATE_TTL_MINUTES))
        .finish()
}

/// Cookie instructing the browser to forget `name`.
pub fn removal_cookie(name: &'static str, path: &'static str) -> Cookie<'static> {
    let mut cookie = Cookie::build(name, "").path(path).finish();
    cookie.make_removal();
    cookie
}
