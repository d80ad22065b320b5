//! Segment resolver - maps a 1-based index to a byte range of the payload
//!
//! For a segment size `S` and payload length `L`, index `n` covers
//! `[S * (n - 1), min(S * n, L))`. An index whose start is at or past `L` is
//! exhausted. Resolution is a pure function of the store and the index.

use super::{PagingError, PayloadStore, Result, Segment, SegmentIndex};

/// Resolves segment indices against a payload store
///
/// The resolver holds no mutable state and caches nothing: ranges are
/// recomputed on every call, and identical inputs always give identical
/// results for the lifetime of the store.
#[derive(Debug, Clone)]
pub struct SegmentResolver {
    store: PayloadStore,
}

impl SegmentResolver {
    /// Create a resolver over the given store
    pub fn new(store: PayloadStore) -> Self {
        Self { store }
    }

    /// The underlying store
    pub fn store(&self) -> &PayloadStore {
        &self.store
    }

    /// Resolve an already validated index
    ///
    /// # Errors
    ///
    /// Returns `PagingError::NoMoreData` if the index starts at or beyond the
    /// end of the payload (always the case for an empty payload)
    pub fn resolve(&self, index: SegmentIndex) -> Result<Segment> {
        let size = self.store.segment_size().get();
        let payload = self.store.payload();
        let exhausted = || PagingError::no_more_data(index.get(), self.store.segment_count());

        // Overflowing the offset means the index is past any possible payload
        let start = usize::try_from(index.get() - 1)
            .ok()
            .and_then(|preceding| preceding.checked_mul(size))
            .ok_or_else(exhausted)?;

        if start >= payload.len() {
            return Err(exhausted());
        }

        // Final segment is truncated to the payload length
        let end = start.saturating_add(size).min(payload.len());

        Ok(Segment::new(index, start, payload.slice(start..end)))
    }

    /// Parse a raw index (e.g. a path parameter) and resolve it
    ///
    /// # Errors
    ///
    /// - `PagingError::InvalidIndex` if `raw` is not an integer
    /// - `PagingError::IndexOutOfRange` if `raw` is below 1
    /// - `PagingError::NoMoreData` if the index is past the last segment
    pub fn resolve_str(&self, raw: &str) -> Result<Segment> {
        let index: SegmentIndex = raw.parse()?;
        self.resolve(index)
    }

    /// Iterate over every segment in order, starting at index 1
    pub fn segments(&self) -> Segments<'_> {
        Segments {
            resolver: self,
            next: Some(SegmentIndex::FIRST),
        }
    }
}

/// Iterator over all segments of a payload, produced by [`SegmentResolver::segments`]
pub struct Segments<'a> {
    resolver: &'a SegmentResolver,
    next: Option<SegmentIndex>,
}

impl Iterator for Segments<'_> {
    type Item = Segment;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        match self.resolver.resolve(index) {
            Ok(segment) => {
                self.next = (index.get() < u64::MAX).then_some(index.next());
                Some(segment)
            }
            Err(_) => {
                self.next = None;
                None
            }
        }
    }
}
