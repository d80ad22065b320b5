//! DTOs for paging endpoints

use chrono::{DateTime, Utc};
use qrpage_domain::paging::Manifest;
use serde::Serialize;
use utoipa::ToSchema;

/// Session summary returned by `/manifest`
#[derive(Debug, Serialize, ToSchema)]
pub struct ManifestResponse {
    /// Payload length in bytes
    #[schema(example = 10)]
    pub length: usize,
    /// Bytes carried by each QR code (the last one may carry fewer)
    #[schema(example = 4)]
    pub segment_size: usize,
    /// Number of QR codes needed for the whole payload
    #[schema(example = 3)]
    pub segment_count: u64,
    /// MIME type of the segment images
    #[schema(example = "image/png")]
    pub content_type: String,
    /// When the payload was loaded
    pub loaded_at: DateTime<Utc>,
}

impl From<Manifest> for ManifestResponse {
    fn from(manifest: Manifest) -> Self {
        Self {
            length: manifest.length,
            segment_size: manifest.segment_size,
            segment_count: manifest.segment_count,
            content_type: manifest.content_type.to_string(),
            loaded_at: manifest.loaded_at,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error description
    #[schema(example = "no more data: part 4 is past the last part (3)")]
    pub error: String,
    /// Machine-readable error code
    #[schema(example = "no_more_data")]
    pub code: String,
}
