//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.
//!
//! Users are read together with their posts: one query for the users, one
//! `IN` query for every post they author, grouped in memory.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, Post, User, UserChanges, UserId, UserWithPosts};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewUserRow, PostRow, UserRow, UserUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the user repository port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Load the posts of every listed author, oldest first.
async fn load_posts_for(
    conn: &mut AsyncPgConnection,
    author_ids: Vec<Uuid>,
) -> QueryResult<Vec<PostRow>> {
    if author_ids.is_empty() {
        return Ok(Vec::new());
    }
    posts::table
        .filter(posts::author_id.eq_any(author_ids))
        .order((posts::created_at.asc(), posts::id.asc()))
        .select(PostRow::as_select())
        .load(conn)
        .await
}

/// Pair each user with the posts that reference it, preserving user order.
fn attach_posts(user_rows: Vec<UserRow>, post_rows: Vec<PostRow>) -> Vec<UserWithPosts> {
    let mut by_author: HashMap<Uuid, Vec<Post>> = HashMap::new();
    for row in post_rows {
        by_author.entry(row.author_id).or_default().push(row.into());
    }

    user_rows
        .into_iter()
        .map(|row| {
            let posts = by_author.remove(&row.id).unwrap_or_default();
            UserWithPosts {
                user: row.into(),
                posts,
            }
        })
        .collect()
}

async fn with_posts(
    conn: &mut AsyncPgConnection,
    row: UserRow,
) -> QueryResult<UserWithPosts> {
    let post_rows = load_posts_for(conn, vec![row.id]).await?;
    let post_list = post_rows.into_iter().map(Post::from).collect();
    Ok(UserWithPosts {
        user: row.into(),
        posts: post_list,
    })
}

async fn find_row_by_id(conn: &mut AsyncPgConnection, id: Uuid) -> QueryResult<Option<UserRow>> {
    users::table
        .find(id)
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}

async fn find_row_by_email(
    conn: &mut AsyncPgConnection,
    email: &str,
) -> QueryResult<Option<UserRow>> {
    users::table
        .filter(users::email.eq(email))
        .select(UserRow::as_select())
        .first(conn)
        .await
        .optional()
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn list_with_posts(&self) -> Result<Vec<UserWithPosts>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let user_rows: Vec<UserRow> = users::table
            .order((users::created_at.asc(), users::id.asc()))
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let ids = user_rows.iter().map(|row| row.id).collect();
        let post_rows = load_posts_for(&mut conn, ids)
            .await
            .map_err(map_diesel_error)?;

        Ok(attach_posts(user_rows, post_rows))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = find_row_by_id(&mut conn, *id.as_uuid())
            .await
            .map_err(map_diesel_error)?;
        Ok(row.map(User::from))
    }

    async fn find_with_posts(
        &self,
        id: &UserId,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(row) = find_row_by_id(&mut conn, *id.as_uuid())
            .await
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };
        with_posts(&mut conn, row)
            .await
            .map(Some)
            .map_err(map_diesel_error)
    }

    async fn find_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserWithPosts>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let Some(row) = find_row_by_email(&mut conn, email)
            .await
            .map_err(map_diesel_error)?
        else {
            return Ok(None);
        };
        with_posts(&mut conn, row)
            .await
            .map(Some)
            .map_err(map_diesel_error)
    }

    async fn create(&self, user: &NewUser) -> Result<UserWithPosts, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewUserRow {
            email: user.email.as_str(),
            name: user.name.as_deref(),
        };

        let row: UserRow = diesel::insert_into(users::table)
            .values(&new_row)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(UserWithPosts {
            user: row.into(),
            posts: Vec::new(),
        })
    }

    async fn update(
        &self,
        id: &UserId,
        changes: &UserChanges,
    ) -> Result<UserWithPosts, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = UserUpdate {
            email: changes.email.as_deref(),
            name: changes.name.as_deref(),
            updated_at: Utc::now(),
        };

        let row: UserRow = diesel::update(users::table.find(*id.as_uuid()))
            .set(&update)
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        with_posts(&mut conn, row).await.map_err(map_diesel_error)
    }

    async fn delete(&self, id: &UserId) -> Result<User, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: UserRow = diesel::delete(users::table.find(*id.as_uuid()))
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }
}
