//! Domain entities - the core business objects.

mod feed;
mod post;
mod session;
mod user;

pub use feed::FeedEntry;
pub use post::Post;
pub use session::{Session, SessionClaims, SessionIdentity};
pub use user::User;
