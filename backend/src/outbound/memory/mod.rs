//! In-process store implementing the user, post and seed repository ports.
//!
//! Used when no database URL is configured and by the HTTP and behaviour
//! tests. Records are kept in insertion order, which matches the
//! `created_at` ordering of the PostgreSQL adapters. Locks are never held
//! across an await point.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::ports::{
    PostPersistenceError, PostRepository, SeedOutcome, SeedRepository, SeedRepositoryError,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    NewPost, NewUser, Post, PostChanges, PostFilter, PostId, PostWithAuthor, SeedPlan, User,
    UserChanges, UserId, UserWithPosts,
};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    posts: Vec<Post>,
}

impl State {
    fn user(&self, id: &UserId) -> Option<&User> {
        self.users.iter().find(|user| user.id == *id)
    }

    fn with_posts(&self, user: &User) -> UserWithPosts {
        UserWithPosts {
            user: user.clone(),
            posts: self
                .posts
                .iter()
                .filter(|post| post.author_id == user.id)
                .cloned()
                .collect(),
        }
    }

    fn with_author(&self, post: &Post) -> Option<PostWithAuthor> {
        self.user(&post.author_id).map(|author| PostWithAuthor {
            post: post.clone(),
            author: author.clone(),
        })
    }
}

/// Shared in-memory store. Clones share the same records.
///
/// # Examples
/// ```
/// use blog_backend::outbound::memory::InMemoryStore;
///
/// let store = InMemoryStore::new();
/// let handle = store.clone();
/// # let _ = handle;
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<State>>,
}

const POISONED: &str = "in-memory store lock poisoned";

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Option<MutexGuard<'_, State>> {
        self.state.lock().ok()
    }

    fn lock_users(&self) -> Result<MutexGuard<'_, State>, UserPersistenceError> {
        self.lock()
            .ok_or_else(|| UserPersistenceError::connection(POISONED))
    }

    fn lock_posts(&self) -> Result<MutexGuard<'_, State>, PostPersistenceError> {
        self.lock()
            .ok_or_else(|| PostPersistenceError::connection(POISONED))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn list_with_posts(&self) -> Result<Vec<UserWithPosts>, UserPersistenceError> {
        let state = self.lock_users()?;
        Ok(state.users.iter().map(|user| state.with_posts(user)).collect())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock_users()?.user(id).cloned())
    }

    async fn find_with_posts(
        &self,
        id: &UserId,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError> {
        let state = self.lock_users()?;
        Ok(state.user(id).map(|user| state.with_posts(user)))
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError> {
        let state = self.lock_users()?;
        Ok(state
            .users
            .iter()
            .find(|user| user.email == email)
            .map(|user| state.with_posts(user)))
    }

    async fn create(&self, user: &NewUser) -> Result<UserWithPosts, UserPersistenceError> {
        let mut state = self.lock_users()?;
        if state.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::query(
                "duplicate key value violates unique constraint \"users_email_key\"",
            ));
        }
        let now = Utc::now();
        let created = User {
            id: UserId::random(),
            email: user.email.clone(),
            name: user.name.clone(),
            created_at: now,
            updated_at: now,
        };
        state.users.push(created.clone());
        Ok(UserWithPosts {
            user: created,
            posts: Vec::new(),
        })
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<UserWithPosts, UserPersistenceError> {
        let mut state = self.lock_users()?;
        let user = state
            .users
            .iter_mut()
            .find(|user| user.id == *id)
            .ok_or_else(|| UserPersistenceError::query("record not found"))?;
        if let Some(email) = &changes.email {
            user.email.clone_from(email);
        }
        if let Some(name) = &changes.name {
            user.name = Some(name.clone());
        }
        user.updated_at = Utc::now();
        let updated = user.clone();
        Ok(state.with_posts(&updated))
    }

    async fn delete(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        let mut state = self.lock_users()?;
        if state.posts.iter().any(|post| post.author_id == *id) {
            return Err(UserPersistenceError::query(
                "update or delete on table \"users\" violates foreign key constraint",
            ));
        }
        let index = state
            .users
            .iter()
            .position(|user| user.id == *id)
            .ok_or_else(|| UserPersistenceError::query("record not found"))?;
        Ok(state.users.remove(index))
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list(
        &self,
        filter: &PostFilter,
    ) -> Result<Vec<PostWithAuthor>, PostPersistenceError> {
        let state = self.lock_posts()?;
        Ok(state
            .posts
            .iter()
            .filter(|post| filter.matches(post))
            .filter_map(|post| state.with_author(post))
            .collect())
    }

    async fn find_by_id(
        &self,
        id: &PostId,
    ) -> Result<Option<PostWithAuthor>, PostPersistenceError> {
        let state = self.lock_posts()?;
        Ok(state
            .posts
            .iter()
            .find(|post| post.id == *id)
            .and_then(|post| state.with_author(post)))
    }

    async fn create(&self, post: &NewPost) -> Result<PostWithAuthor, PostPersistenceError> {
        let mut state = self.lock_posts()?;
        let author = state.user(&post.author_id).cloned().ok_or_else(|| {
            PostPersistenceError::query(
                "insert on table \"posts\" violates foreign key constraint",
            )
        })?;
        let now = Utc::now();
        let created = Post {
            id: PostId::random(),
            title: post.title.clone(),
            content: post.content.clone(),
            published: false,
            author_id: post.author_id,
            created_at: now,
            updated_at: now,
        };
        state.posts.push(created.clone());
        Ok(PostWithAuthor {
            post: created,
            author,
        })
    }

    async fn update(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<PostWithAuthor, PostPersistenceError> {
        let mut state = self.lock_posts()?;
        let post = state
            .posts
            .iter_mut()
            .find(|post| post.id == *id)
            .ok_or_else(|| PostPersistenceError::query("record not found"))?;
        if let Some(title) = &changes.title {
            post.title.clone_from(title);
        }
        if let Some(content) = &changes.content {
            post.content = Some(content.clone());
        }
        if let Some(published) = changes.published {
            post.published = published;
        }
        post.updated_at = Utc::now();
        let updated = post.clone();
        state
            .with_author(&updated)
            .ok_or_else(|| PostPersistenceError::query("post author missing"))
    }

    async fn delete(&self, id: &PostId) -> Result<Post, PostPersistenceError> {
        let mut state = self.lock_posts()?;
        let index = state
            .posts
            .iter()
            .position(|post| post.id == *id)
            .ok_or_else(|| PostPersistenceError::query("record not found"))?;
        Ok(state.posts.remove(index))
    }
}

#[async_trait]
impl SeedRepository for InMemoryStore {
    async fn reseed(&self, plan: &SeedPlan) -> Result<SeedOutcome, SeedRepositoryError> {
        if let Some(index) = plan.dangling_author() {
            return Err(SeedRepositoryError::unknown_author(index));
        }
        let mut state = self
            .lock()
            .ok_or_else(|| SeedRepositoryError::connection(POISONED))?;

        let now = Utc::now();
        let users: Vec<User> = plan
            .users
            .iter()
            .map(|seed| User {
                id: UserId::random(),
                email: seed.email.clone(),
                name: seed.name.clone(),
                created_at: now,
                updated_at: now,
            })
            .collect();
        let posts: Vec<Post> = plan
            .posts
            .iter()
            .filter_map(|seed| {
                users.get(seed.author).map(|author| Post {
                    id: PostId::random(),
                    title: seed.title.clone(),
                    content: seed.content.clone(),
                    published: seed.published,
                    author_id: author.id,
                    created_at: now,
                    updated_at: now,
                })
            })
            .collect();

        state.users.clone_from(&users);
        state.posts.clone_from(&posts);
        Ok(SeedOutcome { users, posts })
    }
}
