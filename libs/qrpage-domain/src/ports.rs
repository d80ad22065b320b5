//! Ports (trait definitions) for external dependencies
//!
//! The domain needs two things from the outside world: the payload bytes, read
//! once at startup, and an encoder that turns a segment into an image. Both
//! are expressed here as traits and implemented by adapter crates.
//!
//! ## Static Dispatch
//!
//! `PayloadSource` uses a native `impl Future` return type instead of
//! `async_trait`, so implementations are monomorphized with no boxing.

use std::future::Future;

use bytes::Bytes;

use crate::paging::PagingError;

/// Port for obtaining the payload bytes
///
/// Implementations read from a file, stdin, memory, etc. and must convert any
/// I/O failure into `PagingError::SourceUnavailable`. Failures are not retried.
pub trait PayloadSource: Send + Sync {
    /// Read the complete payload
    ///
    /// # Errors
    ///
    /// Returns `PagingError::SourceUnavailable` if the bytes cannot be obtained
    fn read(&self) -> impl Future<Output = Result<Bytes, PagingError>> + Send;

    /// Human-readable description of where the bytes come from, for logs
    fn describe(&self) -> String;
}

/// Port for the optical-code encoder (the Encoding Gateway)
///
/// Encoding is CPU-bound and synchronous; callers on an async runtime should
/// move it to a blocking thread.
#[cfg_attr(test, mockall::automock)]
pub trait SegmentEncoder: Send + Sync {
    /// Largest segment, in bytes, the encoder can represent with its settings
    fn max_payload_len(&self) -> usize;

    /// MIME type of the produced images (e.g. "image/png")
    fn content_type(&self) -> &'static str;

    /// Encode a segment into image bytes
    ///
    /// # Errors
    ///
    /// - `PagingError::EncodingCapacityExceeded` if `segment` is longer than
    ///   `max_payload_len()`
    /// - `PagingError::EncodingFailed` for any other encoder failure
    fn encode(&self, segment: &[u8]) -> Result<Vec<u8>, PagingError>;
}
