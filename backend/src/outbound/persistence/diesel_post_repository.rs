//! PostgreSQL-backed `PostRepository` implementation using Diesel ORM.
//!
//! Every read joins `posts` with `users` so callers receive the author in the
//! same round trip. Text search uses `ILIKE` with LIKE metacharacters escaped.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use crate::domain::ports::{PostPersistenceError, PostRepository};
use crate::domain::{NewPost, Post, PostChanges, PostFilter, PostId, PostWithAuthor};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, PostRow, PostUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the post repository port.
#[derive(Clone)]
pub struct DieselPostRepository {
    pool: DbPool,
}

impl DieselPostRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> PostPersistenceError {
    map_basic_pool_error(error, PostPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> PostPersistenceError {
    map_basic_diesel_error(
        error,
        PostPersistenceError::query,
        PostPersistenceError::connection,
    )
}

/// Build an `ILIKE` pattern matching `text` anywhere in a column.
fn contains_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped.push('%');
    escaped
}

fn joined((post, author): (PostRow, UserRow)) -> PostWithAuthor {
    PostWithAuthor {
        post: post.into(),
        author: author.into(),
    }
}

async fn find_joined(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> QueryResult<Option<(PostRow, UserRow)>> {
    posts::table
        .inner_join(users::table)
        .filter(posts::id.eq(id))
        .select((PostRow::as_select(), UserRow::as_select()))
        .first(conn)
        .await
        .optional()
}

async fn require_joined(
    conn: &mut AsyncPgConnection,
    id: Uuid,
) -> Result<PostWithAuthor, PostPersistenceError> {
    find_joined(conn, id)
        .await
        .map_err(map_diesel_error)?
        .map(joined)
        .ok_or_else(|| PostPersistenceError::query(format!("post {id} vanished during write")))
}

#[async_trait]
impl PostRepository for DieselPostRepository {
    async fn list(
        &self,
        filter: &PostFilter,
    ) -> Result<Vec<PostWithAuthor>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let mut query = posts::table
            .inner_join(users::table)
            .select((PostRow::as_select(), UserRow::as_select()))
            .order((posts::created_at.asc(), posts::id.asc()))
            .into_boxed();
        if let Some(published) = filter.published {
            query = query.filter(posts::published.eq(published));
        }
        if let Some(author_id) = filter.author_id {
            query = query.filter(posts::author_id.eq(*author_id.as_uuid()));
        }
        if let Some(text) = filter.text.as_deref() {
            let pattern = contains_pattern(text);
            query = query.filter(
                posts::title
                    .ilike(pattern.clone())
                    .or(posts::content.assume_not_null().ilike(pattern)),
            );
        }

        let rows: Vec<(PostRow, UserRow)> =
            query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(joined).collect())
    }

    async fn find_by_id(
        &self,
        id: &PostId,
    ) -> Result<Option<PostWithAuthor>, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = find_joined(&mut conn, *id.as_uuid())
            .await
            .map_err(map_diesel_error)?;
        Ok(row.map(joined))
    }

    async fn create(&self, post: &NewPost) -> Result<PostWithAuthor, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let new_row = NewPostRow {
            title: post.title.as_str(),
            content: post.content.as_deref(),
            published: false,
            author_id: *post.author_id.as_uuid(),
        };

        let id: Uuid = diesel::insert_into(posts::table)
            .values(&new_row)
            .returning(posts::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        require_joined(&mut conn, id).await
    }

    async fn update(
        &self,
        id: &PostId,
        changes: &PostChanges,
    ) -> Result<PostWithAuthor, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let update = PostUpdate {
            title: changes.title.as_deref(),
            content: changes.content.as_deref(),
            published: changes.published,
            updated_at: Utc::now(),
        };

        let updated = diesel::update(posts::table.find(*id.as_uuid()))
            .set(&update)
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        if updated == 0 {
            return Err(PostPersistenceError::query("record not found"));
        }

        require_joined(&mut conn, *id.as_uuid()).await
    }

    async fn delete(&self, id: &PostId) -> Result<Post, PostPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row: PostRow = diesel::delete(posts::table.find(*id.as_uuid()))
            .returning(PostRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for search patterns and error mapping.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("rust", "%rust%")]
    #[case("100%", "%100\\%%")]
    #[case("snake_case", "%snake\\_case%")]
    #[case("C:\\path", "%C:\\\\path%")]
    fn contains_pattern_escapes_like_metacharacters(#[case] text: &str, #[case] expected: &str) {
        assert_eq!(contains_pattern(text), expected);
    }

    #[rstest]
    fn pool_error_maps_to_connection_error() {
        let error = map_pool_error(PoolError::build("bad url"));
        assert!(matches!(error, PostPersistenceError::Connection { .. }));
    }
}
