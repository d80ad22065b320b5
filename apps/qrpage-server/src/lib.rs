//! qrpage server
//!
//! HTTP service that serves a single file as a sequence of QR code images.
//! A viewer page at `/` shows segment 1, 2, 3, ... until the server answers
//! "no more data", and a camera on the receiving device scans each code.

pub mod config;
pub mod dto;
pub mod handlers;
pub mod routes;
pub mod source;
pub mod telemetry;

use std::sync::Arc;

use qrpage_domain::PagingService;
use qrpage_qr::QrSegmentEncoder;

pub use routes::create_router;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub paging_service: Arc<PagingService<QrSegmentEncoder>>,
}
