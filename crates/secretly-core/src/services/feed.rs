//! Feed Aggregator - every user's posts, newest first.

use std::sync::Arc;

use crate::domain::{FeedEntry, SessionIdentity, User};
use crate::error::DomainError;
use crate::ports::UserRepository;

pub struct FeedAggregator {
    repo: Arc<dyn UserRepository>,
}

impl FeedAggregator {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Read-only; safe to call any number of times.
    pub async fn list_all_posts_by_recency(&self) -> Result<Vec<FeedEntry>, DomainError> {
        let users = self.repo.list_with_posts().await?;
        Ok(order_by_recency(users))
    }
}

/// Flatten users into (author, post) pairs sorted by `created_at` descending.
///
/// Equal timestamps fall back to descending post id. Post ids are v7 UUIDs, so
/// the most recently inserted post comes first.
pub fn order_by_recency(users: Vec<User>) -> Vec<FeedEntry> {
    let mut entries: Vec<FeedEntry> = users
        .into_iter()
        .flat_map(|user| {
            let author = SessionIdentity::from(&user);
            user.posts.into_iter().map(move |post| FeedEntry {
                author: author.clone(),
                post,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.post
            .created_at
            .cmp(&a.post.created_at)
            .then_with(|| b.post.id.cmp(&a.post.id))
    });

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Post;
    use chrono::{DateTime, TimeZone, Utc};
    use uuid::Uuid;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn post(id: u128, content: &str, seconds: i64) -> Post {
        Post {
            id: Uuid::from_u128(id),
            content: content.to_string(),
            created_at: at(seconds),
        }
    }

    #[test]
    fn test_posts_across_users_are_sorted_newest_first() {
        let mut a = User::local("a".to_string(), "hash".to_string());
        a.posts = vec![post(1, "a-first", 1), post(3, "a-second", 2)];
        let mut b = User::local("b".to_string(), "hash".to_string());
        b.posts = vec![post(2, "b-only", 3)];
        let (a_id, b_id) = (a.id, b.id);

        let feed = order_by_recency(vec![a, b]);

        let contents: Vec<&str> = feed.iter().map(|e| e.post.content.as_str()).collect();
        assert_eq!(contents, vec!["b-only", "a-second", "a-first"]);
        assert_eq!(feed[0].author.id, b_id);
        assert_eq!(feed[1].author.id, a_id);
        assert_eq!(feed[2].author.id, a_id);
    }

    #[test]
    fn test_equal_timestamps_break_ties_by_descending_id() {
        let mut a = User::federated("p1".to_string());
        a.posts = vec![post(10, "older", 5)];
        let mut b = User::federated("p2".to_string());
        b.posts = vec![post(20, "newer", 5)];

        let feed = order_by_recency(vec![a, b]);

        assert_eq!(feed[0].post.content, "newer");
        assert_eq!(feed[1].post.content, "older");
    }

    #[test]
    fn test_users_without_posts_contribute_nothing() {
        let feed = order_by_recency(vec![
            User::federated("p1".to_string()),
            User::local("a".to_string(), "hash".to_string()),
        ]);

        assert!(feed.is_empty());
    }

    #[test]
    fn test_feed_author_is_the_owner_projection() {
        let mut a = User::local("alice".to_string(), "hash".to_string());
        a.posts = vec![post(1, "hi", 1)];

        let feed = order_by_recency(vec![a]);

        assert_eq!(feed[0].author.username.as_deref(), Some("alice"));
    }
}
