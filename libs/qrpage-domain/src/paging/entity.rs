//! Domain entities for payload paging
//!
//! A Payload is the immutable byte buffer loaded once per session. A Segment
//! is a read-only view of one contiguous, addressable slice of that buffer.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::ops::Range;

use super::ids::{SegmentIndex, SegmentSize};

/// The full byte buffer transferred during a session
///
/// Payloads are:
/// - **Immutable**: the bytes are fixed at load time
/// - **Cheap to share**: backed by `Bytes`, so clones and segment views never copy
/// - **Possibly empty**: a zero-length payload is legal and has no segments
///
/// # Example
///
/// ```rust
/// use qrpage_domain::paging::{Payload, SegmentSize};
///
/// let payload = Payload::new(vec![0u8; 10]);
/// let size = SegmentSize::new(4).unwrap();
/// assert_eq!(payload.segment_count(size), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Payload {
    /// Raw payload bytes
    bytes: Bytes,

    /// Timestamp when the payload was loaded
    loaded_at: DateTime<Utc>,
}

impl Payload {
    /// Create a Payload from the given bytes
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Create a Payload with an explicit load timestamp
    pub fn from_parts(bytes: Bytes, loaded_at: DateTime<Utc>) -> Self {
        Self { bytes, loaded_at }
    }

    /// Number of bytes in the payload
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload has no bytes at all
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The underlying bytes
    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    /// Get the load timestamp
    pub fn loaded_at(&self) -> &DateTime<Utc> {
        &self.loaded_at
    }

    /// Number of segments needed to cover the payload: `ceil(len / size)`
    pub fn segment_count(&self, size: SegmentSize) -> u64 {
        self.len().div_ceil(size.get()) as u64
    }

    /// Zero-copy view of `range`; the caller guarantees the range is in bounds
    pub(crate) fn slice(&self, range: Range<usize>) -> Bytes {
        self.bytes.slice(range)
    }
}

/// A read-only view of one addressable slice of the payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    index: SegmentIndex,
    start: usize,
    data: Bytes,
}

impl Segment {
    pub(crate) fn new(index: SegmentIndex, start: usize, data: Bytes) -> Self {
        Self { index, start, data }
    }

    /// The 1-based index this segment was resolved for
    pub fn index(&self) -> SegmentIndex {
        self.index
    }

    /// Offset of the first byte in the payload
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset one past the last byte in the payload
    pub fn end(&self) -> usize {
        self.start + self.data.len()
    }

    /// `[start, end)` within the payload
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Number of bytes in this segment
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false for a segment returned by the resolver
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The segment's bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Consume the segment, returning its bytes
    pub fn into_bytes(self) -> Bytes {
        self.data
    }
}
