pub mod args;
pub mod docs;
pub mod health;
pub mod shared;
pub mod videos;

use actix_web::web;

/// Registers every route. `/openapi.json` is only served with `docs_enabled`.
pub fn configure(cfg: &mut web::ServiceConfig, docs_enabled: bool) {
    cfg.configure(videos::configure).configure(health::configure);
    if docs_enabled {
        cfg.configure(docs::configure);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};

    #[actix_web::test]
    async fn docs_route_follows_flag() {
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, false))).await;
        let req = test::TestRequest::get().uri("/openapi.json").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

        let app = test::init_service(App::new().configure(|cfg| configure(cfg, true))).await;
        let req = test::TestRequest::get().uri("/openapi.json").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn health_is_served_without_docs() {
        let app = test::init_service(App::new().configure(|cfg| configure(cfg, false))).await;
        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }
}
