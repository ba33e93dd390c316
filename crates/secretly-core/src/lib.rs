//! # Secretly Core
//!
//! The domain layer of Secretly: users, their posts, and the workflows that
//! create and read them. This crate contains pure business logic with zero
//! infrastructure dependencies; storage, hashing and tokens arrive through the
//! traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
