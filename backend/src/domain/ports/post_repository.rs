//! Port abstraction for post persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewPost, Post, PostChanges, PostFilter, PostId, PostWithAuthor};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by post repository adapters.
    pub enum PostPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "post repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "post repository query failed: {message}",
    }
}

/// Record-oriented access to stored posts, each joined with its author.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// List posts matching `filter`, oldest first.
    async fn list(&self, filter: &PostFilter)
    -> Result<Vec<PostWithAuthor>, PostPersistenceError>;

    /// Fetch a post by identifier.
    async fn find_by_id(&self, id: &PostId)
    -> Result<Option<PostWithAuthor>, PostPersistenceError>;

    /// Insert an unpublished post and return the stored record.
    async fn create(&self, post: &NewPost) -> Result<PostWithAuthor, PostPersistenceError>;

    /// Apply `changes` to an existing post and return the stored record.
    async fn update(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<PostWithAuthor, PostPersistenceError>;

    /// Delete a post and return the record as it was before deletion.
    async fn delete(&self, id: &PostId) -> Result<Post, PostPersistenceError>;
}
