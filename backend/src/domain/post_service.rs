//! Post domain service.
//!
//! Applies author existence, title and publication rules before delegating to
//! the post repository. The user repository answers author lookups.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{PostRepository, PostsCommand, PostsQuery, UserRepository};
use crate::domain::{
    Entity, NewPost, Post, PostChanges, PostFilter, PostId, PostWithAuthor, ServiceError, UserId,
    validate_title,
};

/// Post service implementing the post driving ports.
#[derive(Clone)]
pub struct PostService<P, U> {
    posts: Arc<P>,
    users: Arc<U>,
}

impl<P, U> PostService<P, U> {
    /// Create a new service with the post and user repositories.
    pub fn new(posts: Arc<P>, users: Arc<U>) -> Self {
        Self { posts, users }
    }
}

impl<P, U> PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn require_author(&self, author_id: &UserId) -> Result<(), ServiceError> {
        match self.users.find_by_id(author_id).await? {
            Some(_) => Ok(()),
            None => Err(ServiceError::AuthorNotFound),
        }
    }

    async fn require_post(&self, id: &PostId) -> Result<PostWithAuthor, ServiceError> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(Entity::Post))
    }

    async fn set_published(
        &self,
        id: &PostId,
        published: bool,
    ) -> Result<PostWithAuthor, ServiceError> {
        Ok(self
            .posts
            .update(id, &PostChanges::published(published))
            .await?)
    }
}

#[async_trait]
impl<P, U> PostsCommand for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn create_post(&self, post: NewPost) -> Result<PostWithAuthor, ServiceError> {
        self.require_author(&post.author_id).await?;
        validate_title(&post.title)?;
        Ok(self.posts.create(&post).await?)
    }

    async fn update_post(
        &self,
        id: &PostId,
        changes: PostChanges,
    ) -> Result<PostWithAuthor, ServiceError> {
        self.require_post(id).await?;
        if let Some(title) = changes.title.as_deref() {
            validate_title(title)?;
        }
        Ok(self.posts.update(id, &changes).await?)
    }

    async fn delete_post(&self, id: &PostId) -> Result<Post, ServiceError> {
        self.require_post(id).await?;
        Ok(self.posts.delete(id).await?)
    }

    async fn publish_post(&self, id: &PostId) -> Result<PostWithAuthor, ServiceError> {
        let existing = self.require_post(id).await?;
        if !existing.post.has_publishable_content() {
            return Err(ServiceError::ContentTooShort);
        }
        self.set_published(id, true).await
    }

    async fn unpublish_post(&self, id: &PostId) -> Result<PostWithAuthor, ServiceError> {
        self.require_post(id).await?;
        self.set_published(id, false).await
    }
}

#[async_trait]
impl<P, U> PostsQuery for PostService<P, U>
where
    P: PostRepository,
    U: UserRepository,
{
    async fn list_posts(&self) -> Result<Vec<PostWithAuthor>, ServiceError> {
        Ok(self.posts.list(&PostFilter::all()).await?)
    }

    async fn get_post(&self, id: &PostId) -> Result<Option<PostWithAuthor>, ServiceError> {
        Ok(self.posts.find_by_id(id).await?)
    }

    async fn list_published(&self) -> Result<Vec<PostWithAuthor>, ServiceError> {
        Ok(self.posts.list(&PostFilter::all().published_only()).await?)
    }

    async fn list_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<Vec<PostWithAuthor>, ServiceError> {
        self.require_author(author_id).await?;
        Ok(self.posts.list(&PostFilter::all().by_author(*author_id)).await?)
    }

    async fn list_published_by_author(
        &self,
        author_id: &UserId,
    ) -> Result<Vec<PostWithAuthor>, ServiceError> {
        self.require_author(author_id).await?;
        let filter = PostFilter::all().published_only().by_author(*author_id);
        Ok(self.posts.list(&filter).await?)
    }

    async fn search(&self, query: &str) -> Result<Vec<PostWithAuthor>, ServiceError> {
        let filter = if query.trim().is_empty() {
            PostFilter::all()
        } else {
            PostFilter::all().containing(query)
        };
        Ok(self.posts.list(&filter).await?)
    }
}

#[cfg(test)]
#[path = "post_service_tests.rs"]
mod tests;
