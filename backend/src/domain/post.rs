//! Post records and the title/content rules applied to them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{InvalidIdError, ServiceError, User, UserId};

/// Maximum number of characters allowed in a post title.
pub const TITLE_MAX_CHARS: usize = 200;
/// Minimum number of trimmed content characters required to publish.
pub const PUBLISH_MIN_CONTENT_CHARS: usize = 10;

/// Stable post identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct PostId(Uuid);

impl PostId {
    /// Parse a [`PostId`] from its string form.
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

    /// Generate a new random [`PostId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Validate a post title.
///
/// Blank titles are rejected first, then titles longer than
/// [`TITLE_MAX_CHARS`]. The length check counts the title as supplied,
/// including surrounding whitespace.
///
/// # Examples
/// ```
/// use blog_backend::domain::{validate_title, ServiceError};
///
/// assert!(validate_title("Hello").is_ok());
/// assert_eq!(validate_title("   "), Err(ServiceError::EmptyTitle));
/// ```
pub fn validate_title(title: &str) -> Result<(), ServiceError> {
    if title.trim().is_empty() {
        return Err(ServiceError::EmptyTitle);
    }
    if title.chars().count() > TITLE_MAX_CHARS {
        return Err(ServiceError::TitleTooLong);
    }
    Ok(())
}

/// Blog post as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Store-generated identifier.
    pub id: PostId,
    /// Title, 1 to 200 characters.
    #[schema(example = "Getting Started with Rust")]
    pub title: String,
    /// Optional body text.
    pub content: Option<String>,
    /// Whether the post is visible in published listings.
    pub published: bool,
    /// Identifier of the authoring user.
    pub author_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Whether the content is long enough for the post to be published.
    pub fn has_publishable_content(&self) -> bool {
        self.content
            .as_deref()
            .is_some_and(|content| content.trim().chars().count() >= PUBLISH_MIN_CONTENT_CHARS)
    }

    /// Case-insensitive substring match against the title or content.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self
                .content
                .as_deref()
                .is_some_and(|content| content.to_lowercase().contains(&needle))
    }
}

/// Post joined with its author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PostWithAuthor {
    /// The post record.
    #[serde(flatten)]
    pub post: Post,
    /// The user referenced by `authorId`.
    pub author: User,
}

/// Fields accepted when creating a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// Title, validated with [`validate_title`].
    pub title: String,
    /// Optional body text.
    pub content: Option<String>,
    /// Identifier of an existing user.
    pub author_id: UserId,
}

/// Partial update applied to an existing post. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    /// Replacement title, validated with [`validate_title`].
    pub title: Option<String>,
    /// Replacement body text.
    pub content: Option<String>,
    /// Replacement publication flag.
    pub published: Option<bool>,
}

impl PostChanges {
    /// Changes that only toggle the publication flag.
    pub fn published(published: bool) -> Self {
        Self {
            published: Some(published),
            ..Self::default()
        }
    }
}

/// Filter applied when listing posts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Restrict to posts with this publication state.
    pub published: Option<bool>,
    /// Restrict to posts by this author.
    pub author_id: Option<UserId>,
    /// Restrict to posts whose title or content contains this text,
    /// ignoring case.
    pub text: Option<String>,
}

impl PostFilter {
    /// Filter matching every post.
    pub fn all() -> Self {
        Self::default()
    }

    /// Restrict to published posts.
    #[must_use]
    pub fn published_only(mut self) -> Self {
        self.published = Some(true);
        self
    }

    /// Restrict to posts by `author_id`.
    #[must_use]
    pub fn by_author(mut self, author_id: UserId) -> Self {
        self.author_id = Some(author_id);
        self
    }

    /// Restrict to posts containing `text`.
    #[must_use]
    pub fn containing(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Whether `post` satisfies every constraint of the filter.
    pub fn matches(&self, post: &Post) -> bool {
        self.published.is_none_or(|published| post.published == published)
            && self.author_id.is_none_or(|author| post.author_id == author)
            && self.text.as_deref().is_none_or(|text| post.matches_query(text))
    }
}
