//! PostgreSQL-backed seeding adapter.
//!
//! This adapter implements the `SeedRepository` port. The wipe and the inserts
//! run in a single transaction, so a failed seed leaves the tables untouched.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};

use crate::domain::ports::{SeedOutcome, SeedRepository, SeedRepositoryError};
use crate::domain::{Post, SeedPlan, User};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{NewPostRow, NewUserRow, PostRow, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::{posts, users};

/// Diesel-backed implementation of the seed repository.
#[derive(Clone)]
pub struct DieselSeedRepository {
    pool: DbPool,
}

impl DieselSeedRepository {
    /// Create a new seeding repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// use blog_backend::outbound::persistence::{DbPool, DieselSeedRepository, PoolConfig};
    ///
    /// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
    /// let pool = DbPool::new(PoolConfig::new("postgres://localhost/blog")).await?;
    /// let repository = DieselSeedRepository::new(pool);
    /// # let _ = repository;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> SeedRepositoryError {
    map_basic_pool_error(error, SeedRepositoryError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> SeedRepositoryError {
    map_basic_diesel_error(
        error,
        SeedRepositoryError::query,
        SeedRepositoryError::connection,
    )
}

/// Reject plans whose posts point past the user list.
fn check_author_indices(plan: &SeedPlan) -> Result<(), SeedRepositoryError> {
    match plan.dangling_author() {
        Some(index) => Err(SeedRepositoryError::unknown_author(index)),
        None => Ok(()),
    }
}

#[async_trait]
impl SeedRepository for DieselSeedRepository {
    async fn reseed(&self, plan: &SeedPlan) -> Result<SeedOutcome, SeedRepositoryError> {
        check_author_indices(plan)?;

        let user_rows: Vec<NewUserRow<'_>> = plan
            .users
            .iter()
            .map(|user| NewUserRow {
                email: user.email.as_str(),
                name: user.name.as_deref(),
            })
            .collect();
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let (inserted_users, inserted_posts) = conn
            .transaction(|conn| {
                async move {
                    diesel::delete(posts::table).execute(conn).await?;
                    diesel::delete(users::table).execute(conn).await?;

                    // Insert one at a time so the returned ids follow plan order.
                    let mut created_users = Vec::with_capacity(user_rows.len());
                    for row in &user_rows {
                        let created: UserRow = diesel::insert_into(users::table)
                            .values(row)
                            .returning(UserRow::as_returning())
                            .get_result(conn)
                            .await?;
                        created_users.push(created);
                    }

                    let post_rows: Vec<NewPostRow<'_>> = plan
                        .posts
                        .iter()
                        .filter_map(|post| {
                            created_users.get(post.author).map(|author| NewPostRow {
                                title: post.title.as_str(),
                                content: post.content.as_deref(),
                                published: post.published,
                                author_id: author.id,
                            })
                        })
                        .collect();

                    let mut created_posts = Vec::with_capacity(post_rows.len());
                    for row in &post_rows {
                        let created: PostRow = diesel::insert_into(posts::table)
                            .values(row)
                            .returning(PostRow::as_returning())
                            .get_result(conn)
                            .await?;
                        created_posts.push(created);
                    }

                    Ok::<_, diesel::result::Error>((created_users, created_posts))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(SeedOutcome {
            users: inserted_users.into_iter().map(User::from).collect(),
            posts: inserted_posts.into_iter().map(Post::from).collect(),
        })
    }
}
