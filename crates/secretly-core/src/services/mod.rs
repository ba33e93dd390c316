//! Services - the workflows built on top of the ports.

mod auth_gateway;
mod feed;
mod submit;
mod user_store;

pub use auth_gateway::AuthGateway;
pub use feed::{FeedAggregator, order_by_recency};
pub use submit::SubmitWorkflow;
pub use user_store::{CredentialVerifier, FindOrCreate, UserStore};
