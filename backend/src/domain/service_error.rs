//! Tagged failures raised by the user and post domain services.
//!
//! Each variant renders the message clients see; inbound adapters dispatch
//! on the variant, never on the text.

use std::fmt;

use super::ports::{PostPersistenceError, UserPersistenceError};

/// Entity kinds that can be looked up by identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    /// A [`crate::domain::User`].
    User,
    /// A [`crate::domain::Post`].
    Post,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::User => "User",
            Self::Post => "Post",
        })
    }
}

/// Business-rule violations and store failures.
///
/// # Examples
/// ```
/// use blog_backend::domain::{Entity, ServiceError};
///
/// assert_eq!(ServiceError::NotFound(Entity::User).to_string(), "User not found");
/// assert!(ServiceError::TitleTooLong.is_rule_violation());
/// assert!(!ServiceError::store("connection refused").is_rule_violation());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    /// The referenced record does not exist.
    #[error("{0} not found")]
    NotFound(Entity),
    /// The referenced author does not exist.
    #[error("Author not found")]
    AuthorNotFound,
    /// A user with the requested email already exists.
    #[error("User with this email already exists")]
    DuplicateEmail,
    /// The requested email belongs to a different user.
    #[error("Email already in use")]
    EmailInUse,
    /// The email does not match the accepted format.
    #[error("Invalid email format")]
    InvalidEmail,
    /// The title is blank.
    #[error("Post title is required")]
    EmptyTitle,
    /// The title exceeds the maximum length.
    #[error("Post title must be less than 200 characters")]
    TitleTooLong,
    /// The post lacks enough content to be published.
    #[error("Post must have content (at least 10 characters) before publishing")]
    ContentTooShort,
    /// The user still authors posts.
    #[error("Cannot delete user with existing posts")]
    HasDependents,
    /// The backing store failed.
    #[error("store failure: {message}")]
    Store {
        /// Adapter-supplied description, never shown to clients.
        message: String,
    },
}

impl ServiceError {
    /// Build a [`ServiceError::Store`] from any displayable cause.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Whether the error is a business-rule violation rather than a store
    /// failure.
    pub fn is_rule_violation(&self) -> bool {
        !matches!(self, Self::Store { .. })
    }
}

impl From<UserPersistenceError> for ServiceError {
    fn from(err: UserPersistenceError) -> Self {
        Self::store(err.to_string())
    }
}

impl From<PostPersistenceError> for ServiceError {
    fn from(err: PostPersistenceError) -> Self {
        Self::store(err.to_string())
    }
}
