//! # Secretly Shared
//!
//! Payload types exchanged between the browser and the web server.

pub mod dto;
pub mod response;

pub use dto::{CredentialsForm, OAuthCallbackQuery, SubmitForm};
pub use response::ErrorResponse;
