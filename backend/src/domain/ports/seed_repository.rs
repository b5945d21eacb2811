//! Port abstraction for replacing stored data with a seed plan.
//!
//! Adapters clear posts before users so the author reference never dangles,
//! then insert the plan's users and posts. Database adapters run the whole
//! replacement in one transaction.

use async_trait::async_trait;

use crate::domain::{Post, SeedPlan, User};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by seed repository adapters.
    pub enum SeedRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "seed repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "seed repository query failed: {message}",
        /// A post referenced a user index outside the plan.
        UnknownAuthor { index: usize } => "seed post references unknown author index {index}",
    }
}

/// Records inserted by a seed run, in plan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedOutcome {
    /// Inserted users.
    pub users: Vec<User>,
    /// Inserted posts.
    pub posts: Vec<Post>,
}

/// Port for wiping and reseeding the user and post tables.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SeedRepository: Send + Sync {
    /// Delete every post and user, then insert `plan`.
    async fn reseed(&self, plan: &SeedPlan) -> Result<SeedOutcome, SeedRepositoryError>;
}
