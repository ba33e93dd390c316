//! SeaORM entities.

pub mod post;
pub mod revoked_session;
pub mod user;
