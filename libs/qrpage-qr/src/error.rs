//! Error types for the QR adapter

use thiserror::Error;

/// Errors raised while configuring the QR adapter
///
/// Encoding failures are reported as domain `PagingError`s; this type only
/// covers adapter-level configuration parsing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QrAdapterError {
    /// The error correction level name is not recognised
    #[error("unknown error correction level '{0}', expected one of: low, medium, quartile, high")]
    UnknownErrorCorrection(String),
}

impl QrAdapterError {
    /// Create an unknown error correction error
    pub fn unknown_error_correction(name: impl Into<String>) -> Self {
        Self::UnknownErrorCorrection(name.into())
    }
}
