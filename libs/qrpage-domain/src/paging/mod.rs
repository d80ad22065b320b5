//! Paging domain module
//!
//! This module contains the core of the transfer protocol: the immutable
//! payload, the segment addressing scheme, and the service that turns a
//! requested index into an encoded image.

mod entity;
mod error;
mod ids;
mod resolver;
mod service;
mod store;

pub use entity::{Payload, Segment};
pub use error::{PagingError, Result};
pub use ids::{SegmentIndex, SegmentSize};
pub use resolver::{SegmentResolver, Segments};
pub use service::{Manifest, PagingConfig, PagingService, RenderedSegment};
pub use store::PayloadStore;
