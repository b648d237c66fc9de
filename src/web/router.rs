//! Router configuration for Web API.

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;
use utoipa::OpenApi;

use super::handlers::{
    delete_video, download_video, list_videos, method_not_allowed, route_not_found,
    upload_video, AppState,
};
use super::openapi::ApiDoc;

/// Create the file API router.
pub fn create_router(app_state: Arc<AppState>) -> Router {
    let body_limit = usize::try_from(app_state.max_upload_size).unwrap_or(usize::MAX);

    Router::new()
        .route(
            "/files",
            get(list_videos)
                .post(upload_video)
                .fallback(method_not_allowed),
        )
        .route(
            "/files/:id",
            get(download_video)
                .delete(delete_video)
                .fallback(method_not_allowed),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(app_state)
}

/// Create a health check router.
pub fn create_health_router() -> Router {
    Router::new().route("/health", get(health_check).fallback(method_not_allowed))
}

/// Create the router serving the OpenAPI document.
pub fn create_openapi_router() -> Router {
    Router::new().route(
        ApiDoc::openapi_json_path(),
        get(openapi_json).fallback(method_not_allowed),
    )
}

/// Create the complete application: file API, health check and OpenAPI
/// document, with every request traced. Unknown paths get the JSON error body.
pub fn create_app(app_state: Arc<AppState>) -> Router {
    create_router(app_state)
        .merge(create_health_router())
        .merge(create_openapi_router())
        .fallback(route_not_found)
        .layer(
            ServiceBuilder::new().layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            ),
        )
}

/// Health check handler.
async fn health_check() -> &'static str {
    "OK"
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
