//! Paging service - resolve a segment and hand it to the encoder
//!
//! This module contains the request-level orchestration: parse the index,
//! resolve the byte range, encode it, and describe the session as a manifest.

use std::ops::Range;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    PagingError, PayloadStore, Result, Segment, SegmentIndex, SegmentResolver, SegmentSize,
};
use crate::ports::{PayloadSource, SegmentEncoder};

/// Configuration for the paging service
#[derive(Debug, Clone, Default)]
pub struct PagingConfig {
    /// Bytes per segment, fixed for the lifetime of the process (default: 1024)
    pub segment_size: SegmentSize,
}

impl PagingConfig {
    /// Build a configuration from a raw segment size
    ///
    /// # Errors
    ///
    /// Returns `PagingError::InvalidConfiguration` if `segment_size` is 0
    pub fn new(segment_size: usize) -> Result<Self> {
        Ok(Self {
            segment_size: SegmentSize::new(segment_size)?,
        })
    }
}

/// An encoded segment, ready to be sent to the client
#[derive(Debug, Clone)]
pub struct RenderedSegment {
    /// Index that was requested
    pub index: SegmentIndex,
    /// Byte range of the payload carried by the image
    pub range: Range<usize>,
    /// Total number of segments in the session
    pub segment_count: u64,
    /// MIME type of `image`
    pub content_type: &'static str,
    /// Encoded image bytes
    pub image: Vec<u8>,
}

/// Summary of the session a client needs before paging through it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    /// Payload length in bytes
    pub length: usize,
    /// Bytes per segment
    pub segment_size: usize,
    /// Number of segments, `ceil(length / segment_size)`
    pub segment_count: u64,
    /// MIME type of segment images
    pub content_type: &'static str,
    /// When the payload was loaded
    pub loaded_at: DateTime<Utc>,
}

/// Service serving payload segments as encoded images
///
/// The service owns the resolver and the encoder and is immutable once
/// built, so a single instance can be shared behind an `Arc` by all request
/// handlers.
///
/// ## Static Dispatch
///
/// The service is generic over any `SegmentEncoder` implementation; each
/// concrete encoder gets its own monomorphized copy.
pub struct PagingService<E> {
    resolver: SegmentResolver,
    encoder: E,
}

impl<E> PagingService<E>
where
    E: SegmentEncoder,
{
    /// Create a service, checking that every segment fits the encoder
    ///
    /// # Errors
    ///
    /// Returns `PagingError::InvalidConfiguration` if the segment size is
    /// larger than `encoder.max_payload_len()`
    pub fn new(resolver: SegmentResolver, encoder: E) -> Result<Self> {
        let segment_size = resolver.store().segment_size().get();
        let max = encoder.max_payload_len();

        if segment_size > max {
            return Err(PagingError::invalid_configuration(format!(
                "segment size ({} bytes) exceeds encoder capacity ({} bytes)",
                segment_size, max
            )));
        }

        Ok(Self { resolver, encoder })
    }

    /// Load the payload from `source` and build the service
    ///
    /// # Errors
    ///
    /// - `PagingError::SourceUnavailable` if the payload cannot be read
    /// - `PagingError::InvalidConfiguration` if the segment size does not fit the encoder
    pub async fn load<S>(source: &S, config: PagingConfig, encoder: E) -> Result<Self>
    where
        S: PayloadSource,
    {
        let store = PayloadStore::load(source, config.segment_size).await?;
        Self::new(SegmentResolver::new(store), encoder)
    }

    /// Resolve a segment without encoding it
    pub fn resolve(&self, index: SegmentIndex) -> Result<Segment> {
        self.resolver.resolve(index)
    }

    /// Resolve and encode the segment at `index`
    ///
    /// # Errors
    ///
    /// - `PagingError::NoMoreData` if the index is past the last segment
    /// - `PagingError::EncodingCapacityExceeded` / `EncodingFailed` from the encoder
    pub fn render(&self, index: SegmentIndex) -> Result<RenderedSegment> {
        let segment = self.resolver.resolve(index)?;
        let image = self.encoder.encode(segment.data())?;

        Ok(RenderedSegment {
            index,
            range: segment.range(),
            segment_count: self.segment_count(),
            content_type: self.encoder.content_type(),
            image,
        })
    }

    /// Parse a raw index (e.g. a path parameter), then resolve and encode it
    ///
    /// # Errors
    ///
    /// - `PagingError::InvalidIndex` if `raw` is not an integer
    /// - `PagingError::IndexOutOfRange` if `raw` is below 1
    /// - everything `render` can return
    pub fn render_str(&self, raw: &str) -> Result<RenderedSegment> {
        self.render(raw.parse()?)
    }

    /// Describe the session
    pub fn manifest(&self) -> Manifest {
        let store = self.resolver.store();
        Manifest {
            length: store.payload().len(),
            segment_size: store.segment_size().get(),
            segment_count: store.segment_count(),
            content_type: self.encoder.content_type(),
            loaded_at: *store.payload().loaded_at(),
        }
    }

    /// Number of segments in the session
    pub fn segment_count(&self) -> u64 {
        self.resolver.store().segment_count()
    }

    /// The configured segment size
    pub fn segment_size(&self) -> SegmentSize {
        self.resolver.store().segment_size()
    }
}
