//! User domain service.
//!
//! Applies email uniqueness, email format and dependent-post checks before
//! delegating to the user repository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UsersCommand, UsersQuery};
use crate::domain::{
    Entity, NewUser, ServiceError, User, UserChanges, UserId, UserWithPosts, is_valid_email,
};

/// User service implementing the user driving ports.
#[derive(Clone)]
pub struct UserService<R> {
    users: Arc<R>,
}

impl<R> UserService<R> {
    /// Create a new service with the user repository.
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

impl<R> UserService<R>
where
    R: UserRepository,
{
    async fn require_user(&self, id: &UserId) -> Result<User, ServiceError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ServiceError::NotFound(Entity::User))
    }

    async fn email_taken(&self, email: &str) -> Result<bool, ServiceError> {
        Ok(self.users.find_by_email(email).await?.is_some())
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository,
{
    async fn create_user(&self, user: NewUser) -> Result<UserWithPosts, ServiceError> {
        if self.email_taken(&user.email).await? {
            return Err(ServiceError::DuplicateEmail);
        }
        if !is_valid_email(&user.email) {
            return Err(ServiceError::InvalidEmail);
        }
        Ok(self.users.create(&user).await?)
    }

    async fn update_user(
        &self,
        id: &UserId,
        changes: UserChanges,
    ) -> Result<UserWithPosts, ServiceError> {
        let existing = self.require_user(id).await?;

        if let Some(email) = changes.email.as_deref() {
            if email != existing.email {
                if self.email_taken(email).await? {
                    return Err(ServiceError::EmailInUse);
                }
                if !is_valid_email(email) {
                    return Err(ServiceError::InvalidEmail);
                }
            }
        }

        Ok(self.users.update(id, &changes).await?)
    }

    async fn delete_user(&self, id: &UserId) -> Result<User, ServiceError> {
        let existing = self
            .users
            .find_with_posts(id)
            .await?
            .ok_or(ServiceError::NotFound(Entity::User))?;
        if !existing.posts.is_empty() {
            return Err(ServiceError::HasDependents);
        }
        Ok(self.users.delete(id).await?)
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository,
{
    async fn list_users(&self) -> Result<Vec<UserWithPosts>, ServiceError> {
        Ok(self.users.list_with_posts().await?)
    }

    async fn get_user(&self, id: &UserId) -> Result<Option<UserWithPosts>, ServiceError> {
        Ok(self.users.find_with_posts(id).await?)
    }

    async fn get_user_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPosts>, ServiceError> {
        Ok(self.users.find_by_email(email).await?)
    }

    async fn get_user_posts(&self, id: &UserId) -> Result<Option<UserWithPosts>, ServiceError> {
        Ok(self.users.find_with_posts(id).await?)
    }
}

#[cfg(test)]
#[path = "user_service_tests.rs"]
mod tests;
