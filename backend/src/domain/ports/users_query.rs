//! Driving port for user-facing queries.
//!
//! Inbound adapters (HTTP handlers) use this port to fetch user-visible data
//! without importing outbound persistence concerns. Single-record lookups
//! answer `None` for unknown users instead of failing.

use async_trait::async_trait;

use crate::domain::{ServiceError, UserId, UserWithPosts};

/// Domain use-case port for reading users and their posts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every user with their posts.
    async fn list_users(&self) -> Result<Vec<UserWithPosts>, ServiceError>;

    /// One user with their posts.
    async fn get_user(&self, id: &UserId) -> Result<Option<UserWithPosts>, ServiceError>;

    /// One user, looked up by exact email, with their posts.
    async fn get_user_by_email(&self, email: &str)
    -> Result<Option<UserWithPosts>, ServiceError>;

    /// The posts authored by a user, embedded in the user record.
    async fn get_user_posts(&self, id: &UserId) -> Result<Option<UserWithPosts>, ServiceError>;
}
