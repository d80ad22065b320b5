//! Domain errors for paging operations
//!
//! This module defines every failure the paging core can report, from startup
//! (loading the payload, validating configuration) to per-request segment
//! resolution and encoding. Adapters convert their own error types into these.

use thiserror::Error;

/// Errors that can occur while loading, resolving or encoding segments
///
/// Startup errors (`SourceUnavailable`, `InvalidConfiguration`) are fatal.
/// Everything else is scoped to a single request and is turned into a
/// response by the transport layer.
#[derive(Error, Debug)]
pub enum PagingError {
    /// The payload bytes could not be obtained from the source
    #[error("Payload source unavailable: {0}")]
    SourceUnavailable(String),

    /// The paging configuration is unusable (e.g. zero segment size)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// The requested index is missing or not an integer
    #[error("no/wrong image part number provided: {0}")]
    InvalidIndex(String),

    /// The requested index is below 1
    #[error("id has to be >= 1, but was: {0}")]
    IndexOutOfRange(String),

    /// The requested index starts at or beyond the end of the payload
    #[error("no more data: part {index} is past the last part ({segment_count})")]
    NoMoreData { index: u64, segment_count: u64 },

    /// The segment is larger than the encoder can represent
    #[error("Segment size ({size} bytes) exceeds encoder capacity ({max} bytes)")]
    EncodingCapacityExceeded { size: usize, max: usize },

    /// The encoder failed for a reason other than capacity
    #[error("error encoding segment: {0}")]
    EncodingFailed(String),

    /// An unexpected internal error occurred
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl PagingError {
    /// Create a source unavailable error with a message
    pub fn source_unavailable(msg: impl Into<String>) -> Self {
        Self::SourceUnavailable(msg.into())
    }

    /// Create an invalid configuration error with a message
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    /// Create an invalid index error with a message
    pub fn invalid_index(msg: impl Into<String>) -> Self {
        Self::InvalidIndex(msg.into())
    }

    /// Create an index out of range error for the raw requested value
    pub fn index_out_of_range(requested: impl Into<String>) -> Self {
        Self::IndexOutOfRange(requested.into())
    }

    /// Create a no more data error
    pub fn no_more_data(index: u64, segment_count: u64) -> Self {
        Self::NoMoreData {
            index,
            segment_count,
        }
    }

    /// Create an encoding capacity exceeded error
    pub fn capacity_exceeded(size: usize, max: usize) -> Self {
        Self::EncodingCapacityExceeded { size, max }
    }

    /// Create an encoding failure with a message
    pub fn encoding_failed(msg: impl Into<String>) -> Self {
        Self::EncodingFailed(msg.into())
    }

    /// Create an internal error with a message
    pub fn internal_error(msg: impl Into<String>) -> Self {
        Self::InternalError(msg.into())
    }

    /// Stable machine-readable code, used in error response bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::SourceUnavailable(_) => "source_unavailable",
            Self::InvalidConfiguration(_) => "invalid_configuration",
            Self::InvalidIndex(_) => "invalid_index",
            Self::IndexOutOfRange(_) => "index_out_of_range",
            Self::NoMoreData { .. } => "no_more_data",
            Self::EncodingCapacityExceeded { .. } => "encoding_capacity_exceeded",
            Self::EncodingFailed(_) => "encoding_failed",
            Self::InternalError(_) => "internal",
        }
    }

    /// Whether the error was caused by the request rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidIndex(_) | Self::IndexOutOfRange(_) | Self::NoMoreData { .. }
        )
    }

    /// Whether the error can only happen before serving begins
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::SourceUnavailable(_) | Self::InvalidConfiguration(_)
        )
    }
}

/// Result type alias for paging operations
pub type Result<T> = std::result::Result<T, PagingError>;
