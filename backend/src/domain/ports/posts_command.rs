//! Driving port for post mutations and publication transitions.

use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostId, PostWithAuthor, ServiceError};

/// Domain use-case port for writing posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostsCommand: Send + Sync {
    /// Create an unpublished post for an existing author.
    async fn create_post(&self, post: NewPost) -> Result<PostWithAuthor, ServiceError>;

    /// Apply a partial update to an existing post.
    async fn update_post(
        &self,
        id: &PostId,
        changes: PostChanges,
    ) -> Result<PostWithAuthor, ServiceError>;

    /// Remove a post, returning the removed record.
    async fn delete_post(&self, id: &PostId) -> Result<Post, ServiceError>;

    /// Mark a post with enough content as published.
    async fn publish_post(&self, id: &PostId) -> Result<PostWithAuthor, ServiceError>;

    /// Mark a post as unpublished.
    async fn unpublish_post(&self, id: &PostId) -> Result<PostWithAuthor, ServiceError>;
}
