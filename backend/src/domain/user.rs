//! User records and the email policy.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Post;

/// Error returned when a string is not a valid identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be a valid UUID")]
pub struct InvalidIdError;

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct UserId(Uuid);

impl UserId {
    /// Parse a [`UserId`] from its string form.
    ///
    /// # Examples
    /// ```
    /// use blog_backend::domain::UserId;
    ///
    /// assert!(UserId::new("3fa85f64-5717-4562-b3fc-2c963f66afa6").is_ok());
    /// assert!(UserId::new("not-a-uuid").is_err());
    /// ```
    pub fn new(id: impl AsRef<str>) -> Result<Self, InvalidIdError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(InvalidIdError);
        }
        Uuid::parse_str(raw).map(Self).map_err(|_| InvalidIdError)
    }

    /// Wrap an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Check an email address against the accepted format.
///
/// The policy is deliberately loose: a non-whitespace local part, a single
/// `@`, and a non-whitespace domain containing at least one dot.
///
/// # Examples
/// ```
/// use blog_backend::domain::is_valid_email;
///
/// assert!(is_valid_email("a@b.com"));
/// assert!(!is_valid_email("a@b"));
/// assert!(!is_valid_email(" a@b.com"));
/// ```
pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Application user as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-generated identifier.
    pub id: UserId,
    /// Unique email address.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Optional display name.
    #[schema(example = "Alice Johnson")]
    pub name: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

/// User joined with the posts they authored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithPosts {
    /// The user record.
    #[serde(flatten)]
    pub user: User,
    /// Posts whose `authorId` references this user.
    pub posts: Vec<Post>,
}

/// Fields accepted when creating a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Email address; must be unique and well formed.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// Partial update applied to an existing user. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement email address.
    pub email: Option<String>,
    /// Replacement display name.
    pub name: Option<String>,
}
