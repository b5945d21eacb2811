//! Users API handlers.
//!
//! ```text
//! GET    /api/v1/users
//! GET    /api/v1/users/{id}
//! POST   /api/v1/users {"email":"alice@example.com","name":"Alice"}
//! PUT    /api/v1/users/{id} {"name":"Alice Smith"}
//! DELETE /api/v1/users/{id}
//! GET    /api/v1/users/{id}/posts
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Entity, Error, NewUser, ServiceError, User, UserChanges, UserId, UserWithPosts};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::map_service_error;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{EMAIL, require};

/// Request body for `POST /api/v1/users`.
///
/// Example JSON:
/// `{"email":"alice@example.com","name":"Alice Johnson"}`
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    /// Required; checked for uniqueness and format by the service.
    #[schema(example = "alice@example.com")]
    pub email: Option<String>,
    /// Optional display name.
    #[schema(example = "Alice Johnson")]
    pub name: Option<String>,
}

/// Request body for `PUT /api/v1/users/{id}`. Absent fields are unchanged.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    /// Replacement email; rechecked only when it differs from the current one.
    pub email: Option<String>,
    /// Replacement display name.
    pub name: Option<String>,
}

/// Response body for `DELETE /api/v1/users/{id}`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DeleteUserResponse {
    /// Confirmation text.
    #[schema(example = "User deleted successfully")]
    pub message: String,
    /// The user as it was before deletion.
    pub user: User,
}

/// Resolve a path segment to a user id; anything unparseable cannot name a
/// stored user.
fn user_id(raw: &str) -> ApiResult<UserId> {
    UserId::new(raw).map_err(|_| not_found())
}

fn not_found() -> Error {
    Error::not_found(ServiceError::NotFound(Entity::User).to_string())
}

/// List every user with their posts.
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users", body = [UserWithPosts]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserWithPosts>>> {
    let users = state
        .users_query
        .list_users()
        .await
        .map_err(|err| map_service_error(err, "Failed to fetch users"))?;
    Ok(web::Json(users))
}

/// Fetch one user with their posts.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserWithPosts),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserWithPosts>> {
    let id = user_id(&path)?;
    state
        .users_query
        .get_user(&id)
        .await
        .map_err(|err| map_service_error(err, "Failed to fetch user"))?
        .map(web::Json)
        .ok_or_else(not_found)
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserWithPosts),
        (status = 400, description = "Validation failed, duplicate or malformed email", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<CreateUserRequest>,
) -> ApiResult<HttpResponse> {
    let CreateUserRequest { email, name } = payload.into_inner();
    let email = require(email, EMAIL)?;
    let user = state
        .users
        .create_user(NewUser { email, name })
        .await
        .map_err(|err| map_service_error(err, "Failed to create user"))?;
    Ok(HttpResponse::Created().json(user))
}

/// Apply a partial update to a user.
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserWithPosts),
        (status = 400, description = "Email in use or malformed", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> ApiResult<web::Json<UserWithPosts>> {
    let id = user_id(&path)?;
    let UpdateUserRequest { email, name } = payload.into_inner();
    let user = state
        .users
        .update_user(&id, UserChanges { email, name })
        .await
        .map_err(|err| map_service_error(err, "Failed to update user"))?;
    Ok(web::Json(user))
}

/// Delete a user who authors no posts.
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 400, description = "User still has posts", body = Error),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    let id = user_id(&path)?;
    let user = state
        .users
        .delete_user(&id)
        .await
        .map_err(|err| map_service_error(err, "Failed to delete user"))?;
    Ok(web::Json(DeleteUserResponse {
        message: "User deleted successfully".to_owned(),
        user,
    }))
}

/// Fetch a user together with the posts they authored.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/posts",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User with posts", body = UserWithPosts),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUserPosts"
)]
#[get("/users/{id}/posts")]
pub async fn get_user_posts(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserWithPosts>> {
    let id = user_id(&path)?;
    state
        .users_query
        .get_user_posts(&id)
        .await
        .map_err(|err| map_service_error(err, "Failed to fetch user posts"))?
        .map(web::Json)
        .ok_or_else(not_found)
}

#[cfg(test)]
#[path = "users_tests.rs"]
mod tests;
