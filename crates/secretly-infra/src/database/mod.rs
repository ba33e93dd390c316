//! User/post persistence: PostgreSQL via SeaORM, or in memory.

mod connections;
mod memory;

#[cfg(feature = "postgres")]
pub mod entity;
#[cfg(feature = "postgres")]
mod postgres_repo;
#[cfg(feature = "postgres")]
mod postgres_sessions;

pub use connections::DatabaseConfig;
pub use memory::{InMemorySessionRevocations, InMemoryUserRepository};

#[cfg(feature = "postgres")]
pub use connections::DatabaseConnections;
#[cfg(feature = "postgres")]
pub use postgres_repo::PostgresUserRepository;
#[cfg(feature = "postgres")]
pub use postgres_sessions::PostgresSessionRevocations;
