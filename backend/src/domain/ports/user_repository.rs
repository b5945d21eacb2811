//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{NewUser, User, UserChanges, UserId, UserWithPosts};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
    }
}

/// Record-oriented access to stored users.
///
/// Every read that returns [`UserWithPosts`] embeds the posts whose
/// `author_id` references the user. Adapters perform no business checks;
/// those belong to [`crate::domain::UserService`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every user with their posts, oldest first.
    async fn list_with_posts(&self) -> Result<Vec<UserWithPosts>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by identifier together with their posts.
    async fn find_with_posts(
        &self,
        id: &UserId,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError>;

    /// Fetch a user by exact email together with their posts.
    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError>;

    /// Insert a user and return the stored record.
    async fn create(&self, user: &NewUser) -> Result<UserWithPosts, UserPersistenceError>;

    /// Apply `changes` to an existing user and return the stored record.
    ///
    /// Adapters report a vanished row as [`UserPersistenceError::Query`].
    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<UserWithPosts, UserPersistenceError>;

    /// Delete a user and return the record as it was before deletion.
    async fn delete(&self, id: &UserId) -> Result<User, UserPersistenceError>;
}
