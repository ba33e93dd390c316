//! Error handling - every failure becomes a generic HTML page or a redirect.

use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header},
};
use secretly_core::{DomainError, RepoError};
use secretly_shared::ErrorResponse;
use std::fmt;

use crate::views;

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    /// Rendered as a redirect to the login page.
    Unauthorized,
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized => write!(f, "Unauthorized"),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized => StatusCode::FOUND,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Detail stays in the logs; the page only ever shows a generic title.
        let page = match self {
            AppError::Unauthorized => {
                return HttpResponse::Found()
                    .insert_header((header::LOCATION, "/login"))
                    .finish();
            }
            AppError::NotFound(detail) => {
                tracing::warn!(%detail, "Not found");
                ErrorResponse::not_found()
            }
            AppError::BadRequest(detail) => {
                tracing::info!(%detail, "Bad request");
                ErrorResponse::bad_request()
            }
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code())
            .content_type(header::ContentType::html())
            .body(views::error_page(&page))
    }
}

// Conversion from domain errors
impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::Validation(msg) => AppError::BadRequest(msg),
            DomainError::DuplicateUsername(_) => {
                AppError::BadRequest("Username already taken".to_string())
            }
            DomainError::InvalidCredential | DomainError::Unauthenticated => AppError::Unauthorized,
            DomainError::Store(err) => err.into(),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound => AppError::NotFound("Resource not found".to_string()),
            RepoError::Constraint(msg) => AppError::BadRequest(msg),
            RepoError::Connection(msg) => {
                AppError::Internal(format!("Database connection error: {}", msg))
            }
            RepoError::Query(msg) => AppError::Internal(format!("Database query error: {}", msg)),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    #[actix_web::test]
    async fn test_store_failure_hides_detail() {
        let err: AppError =
            DomainError::Store(RepoError::Query("relation \"users\" does not exist".into())).into();

        let response = err.error_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body()).await.unwrap();
        let body = String::from_utf8(body.to_vec()).unwrap();
        assert!(body.contains("Something went wrong"));
        assert!(!body.contains("relation"));
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let err: AppError = DomainError::Unauthenticated.into();

        let response = err.error_response();

        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(
            response.headers().get(header::LOCATION).unwrap(),
            "/login"
        );
    }

    #[test]
    fn test_missing_user_is_not_found() {
        let err: AppError = DomainError::user_not_found(uuid::Uuid::new_v4()).into();

        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
