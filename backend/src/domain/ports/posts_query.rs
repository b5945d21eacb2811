//! Driving port for post listings and lookups.

use async_trait::async_trait;

use crate::domain::{PostId, PostWithAuthor, ServiceError, UserId};

/// Domain use-case port for reading posts joined with their authors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsQuery: Send + Sync {
    /// Every post.
    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, ServiceError>;

    /// One post, or `None` when the id does not resolve.
    async fn get_post(&self, id: &PostId) -> Result<Option<PostWithAuthor>, ServiceError>;

    /// Posts with `published = true`.
    async fn list_published(&self) -> Result<Vec<PostWithAuthor>, ServiceError>;

    /// Posts written by an existing author.
    async fn list_by_author(&self, author_id: &UserId)
    -> Result<Vec<PostWithAuthor>, ServiceError>;

    /// Published posts written by an existing author.
    async fn list_published_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<Vec<PostWithAuthor>, ServiceError>;

    /// Posts whose title or content contains `query`, ignoring case. A blank
    /// query lists every post.
    async fn search(&self, query: &str) -> Result<Vec<PostWithAuthor>, ServiceError>;
}
