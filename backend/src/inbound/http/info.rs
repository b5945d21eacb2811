//! API information endpoint.

use actix_web::{get, web};
use serde::{Deserialize, Serialize};

/// Response body for `GET /api/v1`.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ApiInfo {
    #[schema(example = "Blog API")]
    pub message: String,
    #[schema(example = "1.0.0")]
    pub version: String,
}

/// Describe the API and its version.
#[utoipa::path(
    get,
    path = "/api/v1",
    responses((status = 200, description = "API information", body = ApiInfo)),
    tags = ["info"],
    operation_id = "apiInfo"
)]
#[get("")]
pub async fn api_info() -> web::Json<ApiInfo> {
    web::Json(ApiInfo {
        message: "Blog API".to_owned(),
        version: env!("CARGO_PKG_VERSION").to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inbound::http::{API_BASE_PATH, configure_api};
    use actix_web::{App, test as actix_test};
    use rstest::rstest;

    #[rstest]
    #[actix_web::test]
    async fn reports_message_and_version() {
        let app = actix_test::init_service(
            App::new().service(web::scope(API_BASE_PATH).configure(configure_api)),
        )
        .await;

        let request = actix_test::TestRequest::get().uri("/api/v1").to_request();
        let info: ApiInfo = actix_test::call_and_read_body_json(&app, request).await;

        assert_eq!(info.message, "Blog API");
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
    }
}
