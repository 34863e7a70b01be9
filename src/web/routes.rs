use actix_cors::Cors;
use actix_web::http::header;
use actix_web::web;
use crate::web::handlers;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/generate-bulldog", web::post().to(handlers::generate_bulldog))
        .route("/describe-and-generate", web::post().to(handlers::describe_and_generate))
        .route("/health", web::get().to(handlers::health_check));
}

/// Any origin when `allowed_origins` is empty, otherwise only those listed.
pub fn cors(allowed_origins: &[String]) -> Cors {
    if allowed_origins.is_empty() {
        return Cors::permissive();
    }

    allowed_origins
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::testing::FakeUpstream;
    use crate::AppState;
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;
    use std::sync::Arc;

    fn state() -> web::Data<AppState> {
        let upstream = Arc::new(FakeUpstream::working("a man", "img"));
        web::Data::new(AppState::new(None, upstream))
    }

    fn allow_origin<B>(resp: &actix_web::dev::ServiceResponse<B>) -> Option<String> {
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    }

    #[actix_web::test]
    async fn any_origin_is_allowed_by_default() {
        let app = test::init_service(
            App::new()
                .wrap(cors(&[]))
                .app_data(state())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/generate-bulldog")
            .insert_header((header::ORIGIN, "http://localhost:5173"))
            .set_json(json!({ "instances": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        // No key configured, but the error still carries CORS headers.
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(allow_origin(&resp).as_deref(), Some("http://localhost:5173"));
    }

    #[actix_web::test]
    async fn preflight_from_listed_origin_succeeds() {
        let origins = vec!["https://app.example".to_string()];
        let app = test::init_service(
            App::new()
                .wrap(cors(&origins))
                .app_data(state())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/describe-and-generate")
            .insert_header((header::ORIGIN, "https://app.example"))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "POST"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(allow_origin(&resp).as_deref(), Some("https://app.example"));
    }

    #[actix_web::test]
    async fn listed_origin_is_echoed_on_requests() {
        let origins = vec!["https://app.example".to_string()];
        let app = test::init_service(
            App::new()
                .wrap(cors(&origins))
                .app_data(state())
                .configure(configure),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/health")
            .insert_header((header::ORIGIN, "https://app.example"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(allow_origin(&resp).as_deref(), Some("https://app.example"));
    }
}
