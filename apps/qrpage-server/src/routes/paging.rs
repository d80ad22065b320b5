//! Paging routes

use axum::{routing::get, Router};

use crate::{
    handlers::paging::{index_handler, manifest_handler, segment_handler},
    AppState,
};

/// Create paging routes
///
/// Static paths take priority over `/:index`, so `/manifest` and `/health`
/// are never parsed as segment numbers.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/manifest", get(manifest_handler))
        .route("/:index", get(segment_handler))
}
