use actix_web::{web, HttpResponse};
use utoipa::OpenApi;

use crate::api::shared::{APIError, ErrorResponse};
use crate::api::{health, videos};
use crate::db::models::{NewVideo, Video, VideoChanges};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Videos API",
        version = "0.1.0",
        description = "Create, read, update and delete video records."
    ),
    paths(
        videos::get_video,
        videos::put_video,
        videos::patch_video,
        videos::delete_video,
        health::health_check,
    ),
    components(schemas(Video, NewVideo, VideoChanges, ErrorResponse, APIError)),
    tags(
        (name = "videos", description = "Operations on videos"),
        (name = "health", description = "Service health checks"),
    )
)]
pub struct ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/openapi.json", web::get().to(openapi_json));
}

async fn openapi_json() -> HttpResponse {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn documents_every_video_route() {
        let doc = serde_json::to_value(ApiDoc::openapi()).unwrap();
        let item = &doc["paths"]["/videos/{video_id}"];

        for method in ["get", "put", "patch", "delete"] {
            assert!(item[method].is_object(), "missing {method}");
        }
        assert!(item["put"]["responses"]["201"].is_object());
        assert!(item["delete"]["responses"]["204"].is_object());
        assert!(doc["components"]["schemas"]["Video"].is_object());
    }

    #[actix_web::test]
    async fn serves_document() {
        let app = test::init_service(App::new().configure(configure)).await;
        let req = test::TestRequest::get().uri("/openapi.json").to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["info"]["title"], "Videos API");
    }
}
