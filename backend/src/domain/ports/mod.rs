//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) are implemented by outbound adapters; driving
//! ports (`*Command`, `*Query`) are implemented by the domain services and
//! called by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod post_repository;
mod posts_command;
mod posts_query;
mod seed_repository;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use post_repository::MockPostRepository;
pub use post_repository::{PostPersistenceError, PostRepository};
#[cfg(test)]
pub use posts_command::MockPostsCommand;
pub use posts_command::PostsCommand;
#[cfg(test)]
pub use posts_query::MockPostsQuery;
pub use posts_query::PostsQuery;
#[cfg(test)]
pub use seed_repository::MockSeedRepository;
pub use seed_repository::{SeedOutcome, SeedRepository, SeedRepositoryError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::UsersCommand;
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
