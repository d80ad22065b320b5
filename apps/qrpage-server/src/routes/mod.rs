//! API routes

pub mod paging;

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    dto::paging::{ErrorResponse, ManifestResponse},
    handlers, AppState,
};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::paging::index_handler,
        handlers::paging::segment_handler,
        handlers::paging::manifest_handler,
        health_handler
    ),
    components(
        schemas(ManifestResponse, ErrorResponse)
    ),
    tags(
        (name = "paging", description = "Payload paging endpoints"),
        (name = "health", description = "Health check endpoints")
    ),
    info(
        title = "qrpage API",
        version = "0.1.0",
        description = "Serves a file as a sequence of QR code pages, one segment per request"
    )
)]
pub struct ApiDoc;

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(paging::routes())
        .route("/health", axum::routing::get(health_handler))
        .with_state(state)
}

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = String)
    ),
    tag = "health"
)]
async fn health_handler() -> &'static str {
    "OK"
}
