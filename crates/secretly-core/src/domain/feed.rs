use serde::{Deserialize, Serialize};

use super::{Post, SessionIdentity};

/// One row of the public feed: a post together with its owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedEntry {
    pub author: SessionIdentity,
    pub post: Post,
}
