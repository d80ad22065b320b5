//! Paging handlers: viewer page, segment images and manifest

use axum::{
    extract::{Path, State},
    http::{header, HeaderName, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use qrpage_domain::paging::{PagingError, SegmentIndex};
use tracing::{debug, error, info, warn};

use crate::{
    dto::paging::{ErrorResponse, ManifestResponse},
    AppState,
};

/// Viewer page served at `/`
const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Response header carrying the served segment index
pub const SEGMENT_INDEX_HEADER: &str = "x-segment-index";

/// Response header carrying the total number of segments
pub const SEGMENT_COUNT_HEADER: &str = "x-segment-count";

/// Headers telling the client never to cache a page
fn no_cache_headers() -> [(HeaderName, &'static str); 3] {
    [
        (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
    ]
}

/// Serve the viewer page
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Viewer page", content_type = "text/html", body = String)
    ),
    tag = "paging"
)]
pub async fn index_handler() -> impl IntoResponse {
    (no_cache_headers(), Html(INDEX_HTML))
}

/// Serve one segment of the payload as a QR code image
#[utoipa::path(
    get,
    path = "/{index}",
    params(
        ("index" = String, Path, description = "1-based segment index")
    ),
    responses(
        (status = 200, description = "QR code image of the segment",
            content_type = "image/png", body = [u8]),
        (status = 400, description = "Bad request - index is not a number or is below 1",
            body = ErrorResponse),
        (status = 404, description = "No more data - index is past the last segment",
            body = ErrorResponse),
        (status = 500, description = "Encoding failed", body = ErrorResponse)
    ),
    tag = "paging"
)]
pub async fn segment_handler(
    State(state): State<AppState>,
    Path(raw_index): Path<String>,
) -> Response {
    let index: SegmentIndex = match raw_index.parse() {
        Ok(index) => index,
        Err(err) => return error_response(err),
    };

    // QR + PNG generation is CPU-bound
    let service = state.paging_service.clone();
    let result = tokio::task::spawn_blocking(move || service.render(index))
        .await
        .unwrap_or_else(|err| {
            Err(PagingError::internal_error(format!(
                "render task failed: {}",
                err
            )))
        });

    match result {
        Ok(rendered) => {
            info!(
                index = %rendered.index,
                start = rendered.range.start,
                end = rendered.range.end,
                image_size = rendered.image.len(),
                "Served segment"
            );
            (
                StatusCode::OK,
                no_cache_headers(),
                [
                    (header::CONTENT_TYPE, rendered.content_type.to_string()),
                    (
                        HeaderName::from_static(SEGMENT_INDEX_HEADER),
                        rendered.index.to_string(),
                    ),
                    (
                        HeaderName::from_static(SEGMENT_COUNT_HEADER),
                        rendered.segment_count.to_string(),
                    ),
                ],
                rendered.image,
            )
                .into_response()
        }
        Err(err) => error_response(err),
    }
}

/// Describe the session: payload length, segment size and count
#[utoipa::path(
    get,
    path = "/manifest",
    responses(
        (status = 200, description = "Session manifest", body = ManifestResponse)
    ),
    tag = "paging"
)]
pub async fn manifest_handler(State(state): State<AppState>) -> impl IntoResponse {
    let manifest = ManifestResponse::from(state.paging_service.manifest());
    (no_cache_headers(), Json(manifest))
}

/// Turn a per-request paging error into a response
fn error_response(err: PagingError) -> Response {
    let status = match &err {
        PagingError::InvalidIndex(_) | PagingError::IndexOutOfRange(_) => StatusCode::BAD_REQUEST,
        PagingError::NoMoreData { .. } => StatusCode::NOT_FOUND,
        PagingError::EncodingCapacityExceeded { .. }
        | PagingError::EncodingFailed(_)
        | PagingError::SourceUnavailable(_)
        | PagingError::InvalidConfiguration(_)
        | PagingError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    match &err {
        PagingError::NoMoreData { .. } => debug!(error = %err, "Client reached end of payload"),
        err if err.is_client_error() => warn!(error = %err, "Rejected segment request"),
        err => error!(error = ?err, "Failed to serve segment"),
    }

    (
        status,
        no_cache_headers(),
        Json(ErrorResponse {
            error: err.to_string(),
            code: err.code().to_string(),
        }),
    )
        .into_response()
}
