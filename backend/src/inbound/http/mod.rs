//! HTTP inbound adapter exposing REST endpoints.

pub mod error;
pub mod health;
pub mod info;
pub mod posts;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Base path shared by the users and posts endpoints.
pub const API_BASE_PATH: &str = "/api/v1";

/// Register the users and posts handlers on a scope mounted at
/// [`API_BASE_PATH`].
///
/// Fixed post paths (`published`, `search`, `author/...`) are registered
/// before `posts/{id}` so they are not captured as identifiers.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use blog_backend::inbound::http::{API_BASE_PATH, configure_api};
///
/// let app = App::new().service(web::scope(API_BASE_PATH).configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(info::api_info)
        .service(users::list_users)
        .service(users::create_user)
        .service(users::get_user_posts)
        .service(users::get_user)
        .service(users::update_user)
        .service(users::delete_user)
        .service(posts::list_posts)
        .service(posts::list_published_posts)
        .service(posts::search_posts)
        .service(posts::list_published_posts_by_author)
        .service(posts::list_posts_by_author)
        .service(posts::create_post)
        .service(posts::publish_post)
        .service(posts::unpublish_post)
        .service(posts::get_post)
        .service(posts::update_post)
        .service(posts::delete_post);
}
