//! Error page model.

use serde::{Deserialize, Serialize};

/// What a failed request shows the user: a status and a generic title.
///
/// Internal detail never goes here; it is logged server-side inside the
/// request's tracing span.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: u16,
    pub title: String,
}

impl ErrorResponse {
    pub fn new(status: u16, title: impl Into<String>) -> Self {
        Self {
            status,
            title: title.into(),
        }
    }

    pub fn bad_request() -> Self {
        Self::new(400, "Bad Request")
    }

    pub fn not_found() -> Self {
        Self::new(404, "Not Found")
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Something went wrong")
    }
}
