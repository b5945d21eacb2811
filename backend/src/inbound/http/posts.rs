//! Posts API handlers.
//!
//! ```text
//! GET    /api/v1/posts
//! GET    /api/v1/posts/published
//! GET    /api/v1/posts/search?q=rust
//! GET    /api/v1/posts/author/{authorId}[/published]
//! GET    /api/v1/posts/{id}
//! POST   /api/v1/posts {"title":"Hello","content":"...","authorId":"..."}
//! PUT    /api/v1/posts/{id}
//! DELETE /api/v1/posts/{id}
//! PATCH  /api/v1/posts/{id}/publish
//! PATCH  /api/v1/posts/{id}/unpublish
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    Entity, Error, NewPost, Post, PostChanges, PostId, PostWithAuthor, ServiceError, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{map_author_lookup_error, map_service_error};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{AUTHOR_ID, TITLE, check_title_length, require};

/// Request body for `POST /api/v1/posts`.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Required, at most 200 characters.
    #[schema(example = "Getting Started with Rust")]
    pub title: Option<String>,
    /// Optional body text; at least 10 characters are needed to publish.
    pub content: Option<String>,
    /// Required; must reference an existing user.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub author_id: Option<String>,
}

/// Request body for `PUT /api/v1/posts/{id}`. Absent fields are unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    /// Replacement title, checked like a new post's title.
    pub title: Option<String>,
    /// Replacement body text.
    pub content: Option<String>,
    /// Publication flag, set without the content check applied by publish.
    pub published: Option<bool>,
}

/// Response body for `DELETE /api/v1/posts/{id}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeletePostResponse {
    /// Confirmation text.
    #[schema(example = "Post deleted successfully")]
    pub message: String,
    /// The post as it was before deletion.
    pub post: Post,
}

/// Query string for `GET /api/v1/posts/search`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Case-insensitive text matched against titles and content. Missing or
    /// blank returns every post.
    pub q: Option<String>,
}

fn post_id(raw: &str) -> ApiResult<PostId> {
    PostId::new(raw).map_err(|_| post_not_found())
}

fn post_not_found() -> Error {
    Error::not_found(ServiceError::NotFound(Entity::Post).to_string())
}

fn author_not_found() -> Error {
    Error::not_found(ServiceError::AuthorNotFound.to_string())
}

/// List every post with its author.
#[utoipa::path(
    get,
    path = "/api/v1/posts",
    responses(
        (status = 200, description = "Posts", body = [PostWithAuthor]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPosts"
)]
#[get("/posts")]
pub async fn list_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PostWithAuthor>>> {
    let posts = state
        .posts_query
        .list_posts()
        .await
        .map_err(|err| map_service_error(err, "Failed to fetch posts"))?;
    Ok(web::Json(posts))
}

/// List published posts.
#[utoipa::path(
    get,
    path = "/api/v1/posts/published",
    responses(
        (status = 200, description = "Published posts", body = [PostWithAuthor]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPublishedPosts"
)]
#[get("/posts/published")]
pub async fn list_published_posts(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<PostWithAuthor>>> {
    let posts = state
        .posts_query
        .list_published()
        .await
        .map_err(|err| map_service_error(err, "Failed to fetch published posts"))?;
    Ok(web::Json(posts))
}

/// Search titles and content.
#[utoipa::path(
    get,
    path = "/api/v1/posts/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching posts", body = [PostWithAuthor]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "searchPosts"
)]
#[get("/posts/search")]
pub async fn search_posts(
    state: web::Data<HttpState>,
    params: web::Query<SearchParams>,
) -> ApiResult<web::Json<Vec<PostWithAuthor>>> {
    let query = params.into_inner().q.unwrap_or_default();
    let posts = state
        .posts_query
        .search(&query)
        .await
        .map_err(|err| map_service_error(err, "Failed to search posts"))?;
    Ok(web::Json(posts))
}

/// List posts by one author.
#[utoipa::path(
    get,
    path = "/api/v1/posts/author/{authorId}",
    params(("authorId" = String, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Posts by the author", body = [PostWithAuthor]),
        (status = 404, description = "Author not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPostsByAuthor"
)]
#[get("/posts/author/{author_id}")]
pub async fn list_posts_by_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PostWithAuthor>>> {
    let author_id = UserId::new(path.as_str()).map_err(|_| author_not_found())?;
    let posts = state
        .posts_query
        .list_by_author(&author_id)
        .await
        .map_err(|err| map_author_lookup_error(err, "Failed to fetch posts by author"))?;
    Ok(web::Json(posts))
}

/// List published posts by one author.
#[utoipa::path(
    get,
    path = "/api/v1/posts/author/{authorId}/published",
    params(("authorId" = String, Path, description = "Author identifier")),
    responses(
        (status = 200, description = "Published posts by the author", body = [PostWithAuthor]),
        (status = 404, description = "Author not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "listPublishedPostsByAuthor"
)]
#[get("/posts/author/{author_id}/published")]
pub async fn list_published_posts_by_author(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<PostWithAuthor>>> {
    let author_id = UserId::new(path.as_str()).map_err(|_| author_not_found())?;
    let posts = state
        .posts_query
        .list_published_by_author(&author_id)
        .await
        .map_err(|err| {
            map_author_lookup_error(err, "Failed to fetch published posts by author")
        })?;
    Ok(web::Json(posts))
}

/// Fetch one post with its author.
#[utoipa::path(
    get,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post", body = PostWithAuthor),
        (status = 404, description = "Post not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "getPost"
)]
#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostWithAuthor>> {
    let id = post_id(&path)?;
    state
        .posts_query
        .get_post(&id)
        .await
        .map_err(|err| map_service_error(err, "Failed to fetch post"))?
        .map(web::Json)
        .ok_or_else(post_not_found)
}

/// Create an unpublished post.
#[utoipa::path(
    post,
    path = "/api/v1/posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = PostWithAuthor),
        (status = 400, description = "Validation failed, bad title or unknown author", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "createPost"
)]
#[post("/posts")]
pub async fn create_post(
    state: web::Data<HttpState>,
    payload: web::Json<CreatePostRequest>,
) -> ApiResult<HttpResponse> {
    let CreatePostRequest {
        title,
        content,
        author_id,
    } = payload.into_inner();
    let title = require(title, TITLE)?;
    let author_id = require(author_id, AUTHOR_ID)?;
    check_title_length(Some(&title))?;
    let author_id = UserId::new(&author_id)
        .map_err(|_| map_service_error(ServiceError::AuthorNotFound, "Failed to create post"))?;

    let post = state
        .posts
        .create_post(NewPost {
            title,
            content,
            author_id,
        })
        .await
        .map_err(|err| map_service_error(err, "Failed to create post"))?;
    Ok(HttpResponse::Created().json(post))
}

/// Apply a partial update to a post.
#[utoipa::path(
    put,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = PostWithAuthor),
        (status = 400, description = "Validation failed or bad title", body = Error),
        (status = 404, description = "Post not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "updatePost"
)]
#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> ApiResult<web::Json<PostWithAuthor>> {
    let UpdatePostRequest {
        title,
        content,
        published,
    } = payload.into_inner();
    check_title_length(title.as_deref())?;
    let id = post_id(&path)?;

    let post = state
        .posts
        .update_post(
            &id,
            PostChanges {
                title,
                content,
                published,
            },
        )
        .await
        .map_err(|err| map_service_error(err, "Failed to update post"))?;
    Ok(web::Json(post))
}

/// Delete a post.
#[utoipa::path(
    delete,
    path = "/api/v1/posts/{id}",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post deleted", body = DeletePostResponse),
        (status = 404, description = "Post not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "deletePost"
)]
#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletePostResponse>> {
    let id = post_id(&path)?;
    let post = state
        .posts
        .delete_post(&id)
        .await
        .map_err(|err| map_service_error(err, "Failed to delete post"))?;
    Ok(web::Json(DeletePostResponse {
        message: "Post deleted successfully".to_owned(),
        post,
    }))
}

/// Publish a post with enough content.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/publish",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post published", body = PostWithAuthor),
        (status = 400, description = "Content too short", body = Error),
        (status = 404, description = "Post not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "publishPost"
)]
#[patch("/posts/{id}/publish")]
pub async fn publish_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostWithAuthor>> {
    let id = post_id(&path)?;
    let post = state
        .posts
        .publish_post(&id)
        .await
        .map_err(|err| map_service_error(err, "Failed to publish post"))?;
    Ok(web::Json(post))
}

/// Withdraw a post from the published listings.
#[utoipa::path(
    patch,
    path = "/api/v1/posts/{id}/unpublish",
    params(("id" = String, Path, description = "Post identifier")),
    responses(
        (status = 200, description = "Post unpublished", body = PostWithAuthor),
        (status = 404, description = "Post not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["posts"],
    operation_id = "unpublishPost"
)]
#[patch("/posts/{id}/unpublish")]
pub async fn unpublish_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<PostWithAuthor>> {
    let id = post_id(&path)?;
    let post = state
        .posts
        .unpublish_post(&id)
        .await
        .map_err(|err| map_service_error(err, "Failed to unpublish post"))?;
    Ok(web::Json(post))
}

#[cfg(test)]
#[path = "posts_tests.rs"]
mod tests;
