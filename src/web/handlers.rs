use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Responder, ResponseError};
use log::{error, warn};
use serde_json::{json, Value};

use crate::error::ProxyError;
use crate::web::models::{DescribeRequest, ErrorBody};
use crate::AppState;

const RELAY_TRANSPORT_ERROR: &str = "Proxy server error during image generation.";
const DESCRIBE_TRANSPORT_ERROR: &str = "Proxy server error during describe and generate process.";

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Text-to-image pass-through
pub async fn generate_bulldog(data: web::Data<AppState>, body: web::Json<Value>) -> HttpResponse {
    match data.relay.forward(&body).await {
        Ok(reply) => {
            let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::OK);
            HttpResponse::build(status)
                .content_type("application/json")
                .body(reply.body)
        }
        Err(e) => error_response(e, "generate-bulldog", RELAY_TRANSPORT_ERROR),
    }
}

// Describe an uploaded photo, then generate a new image from the description
pub async fn describe_and_generate(
    data: web::Data<AppState>,
    req: web::Json<DescribeRequest>,
) -> HttpResponse {
    match data.orchestrator.run(req.into_inner()).await {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(e) => error_response(e, "describe-and-generate", DESCRIBE_TRANSPORT_ERROR),
    }
}

fn error_response(err: ProxyError, endpoint: &str, transport_message: &str) -> HttpResponse {
    if err.is_transport() {
        error!("Proxy server error for {}: {}", endpoint, err);
    } else {
        warn!("{} rejected: {}", endpoint, err);
    }

    HttpResponse::build(err.status_code()).json(ErrorBody {
        error: err.public_message(transport_message),
    })
}

/// JSON extractor settings shared by both endpoints: a body limit large
/// enough for inline images and `{error}` bodies for unparseable input.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(json_error)
}

fn json_error(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected request body for {}: {}", req.path(), err);
    let response = HttpResponse::build(err.status_code()).json(ErrorBody {
        error: format!("Invalid JSON body: {}", err),
    });
    InternalError::from_response(err, response).into()
}
