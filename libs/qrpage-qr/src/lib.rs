//! QR code adapter for qrpage
//!
//! Implements the domain's `SegmentEncoder` port with the `qrcode` crate and
//! writes the result as a greyscale PNG.

mod error;
pub mod infrastructure;

pub use error::QrAdapterError;
pub use infrastructure::{ErrorCorrection, QrEncoderConfig, QrSegmentEncoder};
