//! Federated identity providers.

mod google;

pub use google::{GoogleConfig, GoogleIdentityProvider};
