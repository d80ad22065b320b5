//! Payload store - the session's immutable buffer and segment size

use super::{Payload, Result, SegmentSize};
use crate::ports::PayloadSource;

/// Owns the payload and the segment size for the lifetime of the process
///
/// Nothing in the store changes after construction, so it can be shared by
/// any number of concurrent readers without locking.
#[derive(Debug, Clone)]
pub struct PayloadStore {
    payload: Payload,
    segment_size: SegmentSize,
}

impl PayloadStore {
    /// Create a store from an already loaded payload
    pub fn new(payload: Payload, segment_size: SegmentSize) -> Self {
        Self {
            payload,
            segment_size,
        }
    }

    /// Read the payload from `source` and build the store
    ///
    /// # Errors
    ///
    /// Propagates `PagingError::SourceUnavailable` from the source unchanged
    pub async fn load<S>(source: &S, segment_size: SegmentSize) -> Result<Self>
    where
        S: PayloadSource,
    {
        let bytes = source.read().await?;
        Ok(Self::new(Payload::new(bytes), segment_size))
    }

    /// The loaded payload
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The configured segment size
    pub fn segment_size(&self) -> SegmentSize {
        self.segment_size
    }

    /// Number of segments covering the payload
    pub fn segment_count(&self) -> u64 {
        self.payload.segment_count(self.segment_size)
    }
}
