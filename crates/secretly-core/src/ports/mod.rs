//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod identity;
mod repository;
mod session;

pub use auth::{AuthError, PasswordService, TokenService};
pub use identity::{FederatedAuthError, FederatedProfile, IdentityProvider};
pub use repository::UserRepository;
pub use session::SessionRevocations;
