//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{NewUser, ServiceError, User, UserChanges, UserId, UserWithPosts};

/// Domain use-case port for creating, updating and deleting users.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a new user after checking email uniqueness and format.
    async fn create_user(&self, user: NewUser) -> Result<UserWithPosts, ServiceError>;

    /// Apply a partial update to an existing user.
    async fn update_user(
        &self,
        id: &UserId,
        changes: UserChanges,
    ) -> Result<UserWithPosts, ServiceError>;

    /// Remove a user that authors no posts, returning the removed record.
    async fn delete_user(&self, id: &UserId) -> Result<User, ServiceError>;
}
