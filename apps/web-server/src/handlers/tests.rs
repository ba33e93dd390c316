use std::sync::Arc;

use actix_web::{
    App,
    cookie::Cookie,
    dev::ServiceResponse,
    http::{
        StatusCode,
        header::{self, ContentType},
    },
    test, web,
};
use async_trait::async_trait;

use secretly_core::domain::SessionIdentity;
use secretly_core::ports::{FederatedAuthError, FederatedProfile, IdentityProvider, TokenService};
use secretly_infra::{
    InMemorySessionRevocations, InMemoryUserRepository, JwtConfig, JwtTokenService,
    PasswordHashConfig,
};
use secretly_shared::{CredentialsForm, SubmitForm};

use super::configure_routes;
use crate::config::{AppConfig, SessionConfig};
use crate::middleware::session::{OAUTH_STATE_COOKIE, SESSION_COOKIE};
use crate::state::AppState;

fn test_config() -> AppConfig {
    AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database: None,
        session: SessionConfig {
            jwt: JwtConfig {
                secret: "test-secret".to_string(),
                expiration_hours: 1,
                issuer: "secretly".to_string(),
            },
            secure_cookies: false,
        },
        password: PasswordHashConfig {
            memory_kib: 1024,
            iterations: 1,
            parallelism: 1,
        },
        google: None,
    }
}

fn test_state() -> AppState {
    AppState::with_stores(
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(InMemorySessionRevocations::new()),
        &test_config(),
    )
    .unwrap()
}

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($state))
                .configure(configure_routes),
        )
        .await
    };
}

fn credentials(uri: &str, username: &str, password: &str) -> test::TestRequest {
    test::TestRequest::post().uri(uri).set_form(CredentialsForm {
        username: username.to_string(),
        password: password.to_string(),
    })
}

fn cookie_named<B>(resp: &ServiceResponse<B>, name: &str) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == name && !c.value().is_empty())
        .map(|c| c.into_owned())
}

fn location<B>(resp: &ServiceResponse<B>) -> String {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

struct FakeGoogle;

#[async_trait]
impl IdentityProvider for FakeGoogle {
    fn authorization_url(&self, state: &str) -> String {
        format!("https://accounts.example.test/auth?state={state}")
    }

    async fn exchange_code(&self, code: &str) -> Result<FederatedProfile, FederatedAuthError> {
        if code == "good-code" {
            Ok(FederatedProfile {
                provider: "google".to_string(),
                provider_id: "g-123".to_string(),
            })
        } else {
            Err(FederatedAuthError::TokenExchange("invalid_grant".to_string()))
        }
    }

    fn provider_name(&self) -> &str {
        "google"
    }
}

#[actix_web::test]
async fn test_landing_renders() {
    let app = init_app!(test_state());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("Share a secret anonymously"));
    assert!(body.contains(r#"href="/login""#));
}

#[actix_web::test]
async fn test_signup_starts_session() {
    let app = init_app!(test_state());

    let resp = test::call_service(&app, credentials("/signup", "alice", "pw1").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/secretly");
    let cookie = cookie_named(&resp, SESSION_COOKIE).expect("session cookie");
    assert_eq!(cookie.http_only(), Some(true));

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/submit").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_duplicate_signup_redirects_to_signup() {
    let app = init_app!(test_state());

    test::call_service(&app, credentials("/signup", "alice", "pw1").to_request()).await;
    let resp = test::call_service(&app, credentials("/signup", "alice", "other").to_request()).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/signup");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());
}

#[actix_web::test]
async fn test_login_verifies_before_session() {
    let app = init_app!(test_state());
    test::call_service(&app, credentials("/signup", "alice", "pw1").to_request()).await;

    let resp = test::call_service(&app, credentials("/login", "alice", "wrong").to_request()).await;
    assert_eq!(location(&resp), "/login");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());

    let resp = test::call_service(&app, credentials("/login", "nobody", "pw1").to_request()).await;
    assert_eq!(location(&resp), "/login");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());

    let resp = test::call_service(&app, credentials("/login", "alice", "pw1").to_request()).await;
    assert_eq!(location(&resp), "/secretly");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_some());
}

#[actix_web::test]
async fn test_submit_appears_in_feed_escaped_and_anonymous() {
    let app = init_app!(test_state());

    let resp = test::call_service(&app, credentials("/signup", "alice", "pw1").to_request()).await;
    let cookie = cookie_named(&resp, SESSION_COOKIE).unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submit")
            .cookie(cookie)
            .set_form(SubmitForm {
                content: "<script>alert(1)</script>".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/secretly");

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/secretly").to_request()).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!body.contains("<script>"));
    assert!(!body.contains("alice"));
}

#[actix_web::test]
async fn test_anonymous_submit_redirects_to_login() {
    let app = init_app!(test_state());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/submit").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/login");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submit")
            .set_form(SubmitForm {
                content: "sneaky".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/login");

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/secretly").to_request()).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("No secrets yet."));
    assert!(!body.contains("sneaky"));
}

#[actix_web::test]
async fn test_tampered_cookie_is_anonymous() {
    let app = init_app!(test_state());

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/submit")
            .cookie(Cookie::new(SESSION_COOKIE, "not-a-token"))
            .to_request(),
    )
    .await;

    assert_eq!(location(&resp), "/login");
}

#[actix_web::test]
async fn test_submit_for_vanished_user_is_not_found() {
    let app = init_app!(test_state());

    let tokens = JwtTokenService::new(test_config().session.jwt);
    let token = tokens
        .issue(&SessionIdentity {
            id: uuid::Uuid::new_v4(),
            username: Some("ghost".to_string()),
        })
        .unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submit")
            .cookie(Cookie::new(SESSION_COOKIE, token))
            .set_form(SubmitForm {
                content: "boo".to_string(),
            })
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(!body.contains("ghost"));
}

#[actix_web::test]
async fn test_logout_twice() {
    let app = init_app!(test_state());

    let resp = test::call_service(&app, credentials("/signup", "alice", "pw1").to_request()).await;
    let cookie = cookie_named(&resp, SESSION_COOKIE).unwrap();

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/logout").cookie(cookie).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/logout").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");
}

#[actix_web::test]
async fn test_cookie_from_before_logout_is_dead() {
    let app = init_app!(test_state());

    let resp = test::call_service(&app, credentials("/signup", "alice", "pw1").to_request()).await;
    let stale = cookie_named(&resp, SESSION_COOKIE).unwrap();

    test::call_service(
        &app,
        test::TestRequest::get().uri("/logout").cookie(stale.clone()).to_request(),
    )
    .await;

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/submit").cookie(stale.clone()).to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/login");

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/submit")
            .cookie(stale)
            .set_form(SubmitForm {
                content: "after logout".to_string(),
            })
            .to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/login");

    let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/secretly").to_request()).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(!body.contains("after logout"));

    // A fresh login still works.
    let resp = test::call_service(&app, credentials("/login", "alice", "pw1").to_request()).await;
    let fresh = cookie_named(&resp, SESSION_COOKIE).unwrap();
    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/submit").cookie(fresh).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_submit_without_content() {
    let app = init_app!(test_state());

    let empty_submit = || {
        test::TestRequest::post()
            .uri("/submit")
            .insert_header(ContentType::form_url_encoded())
            .set_payload("")
    };

    let resp = test::call_service(&app, empty_submit().to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/login");

    let resp = test::call_service(&app, credentials("/signup", "alice", "pw1").to_request()).await;
    let cookie = cookie_named(&resp, SESSION_COOKIE).unwrap();

    let resp = test::call_service(&app, empty_submit().cookie(cookie).to_request()).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));
}

#[actix_web::test]
async fn test_login_without_password_is_error_page() {
    let app = init_app!(test_state());

    let resp = test::call_service(
        &app,
        test::TestRequest::post()
            .uri("/login")
            .insert_header(ContentType::form_url_encoded())
            .set_payload("username=alice")
            .to_request(),
    )
    .await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = test::read_body(resp).await;
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert!(body.contains("<html"));
}

#[actix_web::test]
async fn test_google_unconfigured_redirects_to_login() {
    let app = init_app!(test_state());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/auth/google").to_request()).await;
    assert_eq!(location(&resp), "/login");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/google/secretly?code=good-code&state=abc")
            .to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/login");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());
}

#[actix_web::test]
async fn test_google_handshake() {
    let mut state = test_state();
    state.identity_provider = Some(Arc::new(FakeGoogle));
    let app = init_app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/auth/google").to_request()).await;
    assert_eq!(resp.status(), StatusCode::FOUND);
    let state_cookie = cookie_named(&resp, OAUTH_STATE_COOKIE).expect("state cookie");
    assert_eq!(
        location(&resp),
        format!("https://accounts.example.test/auth?state={}", state_cookie.value())
    );

    // Forged state
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri("/auth/google/secretly?code=good-code&state=forged")
            .cookie(state_cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/login");
    assert!(cookie_named(&resp, SESSION_COOKIE).is_none());

    // Rejected code
    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!("/auth/google/secretly?code=bad&state={}", state_cookie.value()))
            .cookie(state_cookie.clone())
            .to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/login");

    let resp = test::call_service(
        &app,
        test::TestRequest::get()
            .uri(&format!(
                "/auth/google/secretly?code=good-code&state={}",
                state_cookie.value()
            ))
            .cookie(state_cookie)
            .to_request(),
    )
    .await;
    assert_eq!(location(&resp), "/secretly");
    let session = cookie_named(&resp, SESSION_COOKIE).expect("session cookie");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri("/submit").cookie(session).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_health() {
    let app = init_app!(test_state());

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
}
