use std::fmt;
use std::num::{IntErrorKind, NonZeroU64, NonZeroUsize};
use std::str::FromStr;

use super::error::PagingError;

/// 1-based position of a segment in the payload
///
/// SegmentIndex wraps a non-zero integer so that a resolved index can never be
/// zero. Parsing from request text classifies failures: anything that is not
/// an integer is `InvalidIndex`, integers below 1 are `IndexOutOfRange`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentIndex(NonZeroU64);

impl SegmentIndex {
    /// The first segment
    pub const FIRST: Self = Self(NonZeroU64::MIN);

    /// Create a SegmentIndex from a signed value, rejecting anything below 1
    pub fn new(value: i64) -> Result<Self, PagingError> {
        u64::try_from(value)
            .ok()
            .and_then(NonZeroU64::new)
            .map(Self)
            .ok_or_else(|| PagingError::index_out_of_range(value.to_string()))
    }

    /// Get the index as a plain integer (always >= 1)
    pub fn get(&self) -> u64 {
        self.0.get()
    }

    /// The index that follows this one, saturating at the maximum
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl FromStr for SegmentIndex {
    type Err = PagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(PagingError::invalid_index("missing part number"));
        }

        // Only plain decimal digits address a segment
        if s.starts_with('+') {
            return Err(PagingError::invalid_index(format!("{:?}: sign not allowed", s)));
        }

        if s.starts_with('-') {
            return match s.parse::<i64>() {
                Ok(_) => Err(PagingError::index_out_of_range(s)),
                Err(err) if *err.kind() == IntErrorKind::NegOverflow => {
                    Err(PagingError::index_out_of_range(s))
                }
                Err(err) => Err(PagingError::invalid_index(format!("{:?}: {}", s, err))),
            };
        }

        match s.parse::<u64>() {
            Ok(value) => NonZeroU64::new(value)
                .map(Self)
                .ok_or_else(|| PagingError::index_out_of_range(s)),
            // A numeric index too large for u64 is necessarily past the end
            Err(err) if *err.kind() == IntErrorKind::PosOverflow => Ok(Self(NonZeroU64::MAX)),
            Err(err) => Err(PagingError::invalid_index(format!("{:?}: {}", s, err))),
        }
    }
}

impl fmt::Display for SegmentIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NonZeroU64> for SegmentIndex {
    fn from(value: NonZeroU64) -> Self {
        Self(value)
    }
}

impl From<SegmentIndex> for u64 {
    fn from(index: SegmentIndex) -> Self {
        index.get()
    }
}

/// Number of payload bytes carried by each segment (the last may be shorter)
///
/// Validated once at configuration time: a zero size is rejected with
/// `InvalidConfiguration` before any request is served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentSize(NonZeroUsize);

impl SegmentSize {
    /// Default segment size in bytes
    pub const DEFAULT: Self = match NonZeroUsize::new(1024) {
        Some(size) => Self(size),
        None => unreachable!(),
    };

    /// Create a SegmentSize, rejecting zero
    pub fn new(bytes: usize) -> Result<Self, PagingError> {
        NonZeroUsize::new(bytes).map(Self).ok_or_else(|| {
            PagingError::invalid_configuration("segment size must be greater than 0")
        })
    }

    /// Get the size in bytes
    pub fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for SegmentSize {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for SegmentSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<usize> for SegmentSize {
    type Error = PagingError;

    fn try_from(bytes: usize) -> Result<Self, Self::Error> {
        Self::new(bytes)
    }
}
