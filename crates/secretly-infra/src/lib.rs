//! # Secretly Infrastructure
//!
//! Concrete implementations of the ports defined in `secretly-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory repository only
//! - `postgres` - PostgreSQL repository via SeaORM
//! - `auth` - Argon2 password hashing + JWT session tokens
//! - `oauth` - Google identity provider over reqwest

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "oauth")]
pub mod oauth;

pub use database::{DatabaseConfig, InMemorySessionRevocations, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnections, PostgresSessionRevocations, PostgresUserRepository};

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, PasswordHashConfig};

#[cfg(feature = "oauth")]
pub use oauth::{GoogleConfig, GoogleIdentityProvider};
