//! HTTP handlers and route configuration.

mod auth;
mod google;
mod health;
mod pages;
mod secrets;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, http::header, web};

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(form_config())
        // Pages
        .route("/", web::get().to(pages::landing))
        .route("/secretly", web::get().to(pages::feed))
        .route("/health", web::get().to(health::health_check))
        // Local accounts
        .service(
            web::resource("/signup")
                .route(web::get().to(pages::signup))
                .route(web::post().to(auth::signup)),
        )
        .service(
            web::resource("/login")
                .route(web::get().to(pages::login))
                .route(web::post().to(auth::login)),
        )
        .route("/logout", web::get().to(auth::logout))
        // Google
        .service(
            web::scope("/auth/google")
                .route("", web::get().to(google::begin))
                .route("/secretly", web::get().to(google::callback)),
        )
        // Secrets
        .service(
            web::resource("/submit")
                .route(web::get().to(secrets::submit_page))
                .route(web::post().to(secrets::submit)),
        );
}

fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(header::ContentType::html())
        .body(body)
}

/// 302 to `location`.
fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Malformed or incomplete form bodies get the generic error page.
fn form_config() -> web::FormConfig {
    web::FormConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(format!("Invalid form: {err}")).into())
}
