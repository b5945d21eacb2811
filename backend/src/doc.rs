//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (info, users,
//!   posts, health)
//! - **Schemas**: the domain records, request and response bodies, and the
//!   shared error payload
//!
//! The generated specification is served by Swagger UI at `/api/v1-docs/` and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode, Post, PostWithAuthor, User, UserWithPosts};
use crate::inbound::http::health::HealthReport;
use crate::inbound::http::info::ApiInfo;
use crate::inbound::http::posts::{CreatePostRequest, DeletePostResponse, UpdatePostRequest};
use crate::inbound::http::users::{CreateUserRequest, DeleteUserResponse, UpdateUserRequest};

/// Path at which the generated document is served.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
/// Path at which Swagger UI is mounted.
pub const SWAGGER_UI_PATH: &str = "/api/v1-docs/{_:.*}";

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Blog API",
        description = "REST interface for managing users and their blog posts.",
        license(name = "MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::info::api_info,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::get_user_posts,
        crate::inbound::http::posts::list_posts,
        crate::inbound::http::posts::list_published_posts,
        crate::inbound::http::posts::search_posts,
        crate::inbound::http::posts::list_posts_by_author,
        crate::inbound::http::posts::list_published_posts_by_author,
        crate::inbound::http::posts::get_post,
        crate::inbound::http::posts::create_post,
        crate::inbound::http::posts::update_post,
        crate::inbound::http::posts::delete_post,
        crate::inbound::http::posts::publish_post,
        crate::inbound::http::posts::unpublish_post,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        User,
        UserWithPosts,
        Post,
        PostWithAuthor,
        Error,
        ErrorCode,
        CreateUserRequest,
        UpdateUserRequest,
        DeleteUserResponse,
        CreatePostRequest,
        UpdatePostRequest,
        DeletePostResponse,
        ApiInfo,
        HealthReport,
    )),
    tags(
        (name = "info", description = "API metadata"),
        (name = "users", description = "Operations related to users"),
        (name = "posts", description = "Operations related to blog posts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying OpenAPI path registration and schema structure.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("/api/v1")]
    #[case("/api/v1/users")]
    #[case("/api/v1/users/{id}")]
    #[case("/api/v1/users/{id}/posts")]
    #[case("/api/v1/posts")]
    #[case("/api/v1/posts/published")]
    #[case("/api/v1/posts/search")]
    #[case("/api/v1/posts/{id}")]
    #[case("/api/v1/posts/{id}/publish")]
    #[case("/api/v1/posts/{id}/unpublish")]
    #[case("/api/v1/posts/author/{authorId}")]
    #[case("/api/v1/posts/author/{authorId}/published")]
    #[case("/health")]
    #[case("/health/ready")]
    #[case("/health/live")]
    fn every_endpoint_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }

    #[rstest]
    fn error_schema_has_required_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error_schema = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error_schema, "code");
        assert_object_schema_has_field(error_schema, "message");
        assert_object_schema_has_field(error_schema, "traceId");
    }

    #[rstest]
    #[case("CreateUserRequest")]
    #[case("UpdateUserRequest")]
    #[case("DeleteUserResponse")]
    #[case("CreatePostRequest")]
    #[case("UpdatePostRequest")]
    #[case("DeletePostResponse")]
    fn request_and_response_fields_are_described(#[case] name: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let RefOr::T(Schema::Object(schema)) = schemas.get(name).expect("schema") else {
            panic!("{name} should be an object schema");
        };

        for (field, property) in &schema.properties {
            if let RefOr::T(Schema::Object(inline)) = property {
                assert!(
                    inline.description.as_deref().is_some_and(|text| !text.is_empty()),
                    "{name}.{field} has no description"
                );
            }
        }
    }

    #[rstest]
    fn user_schema_uses_camel_case() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user_schema = schemas.get("User").expect("User schema");

        assert_object_schema_has_field(user_schema, "email");
        assert_object_schema_has_field(user_schema, "createdAt");
    }
}
