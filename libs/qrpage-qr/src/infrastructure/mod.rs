//! Infrastructure implementations of the domain ports

mod qr_encoder;

pub use qr_encoder::{ErrorCorrection, QrEncoderConfig, QrSegmentEncoder};
