//! # qrpage Domain Layer
//!
//! This crate contains the pure paging logic for qrpage: a payload is split
//! into fixed-size, 1-based segments, and each segment is handed to an
//! optical-code encoder on request. It follows hexagonal architecture
//! principles:
//!
//! - **Entities**: `Payload`, `Segment`
//! - **Ports**: trait definitions for external dependencies (`PayloadSource`, `SegmentEncoder`)
//! - **Services**: `SegmentResolver` and `PagingService`
//!
//! ## Architecture
//!
//! This layer has NO dependencies on infrastructure concerns (files, QR
//! libraries, HTTP). Those are provided by adapter crates implementing the
//! ports.
//!
//! ## Example
//!
//! ```rust
//! use qrpage_domain::paging::{Payload, PayloadStore, SegmentResolver, SegmentSize};
//!
//! let store = PayloadStore::new(
//!     Payload::new(b"0123456789".to_vec()),
//!     SegmentSize::new(4).unwrap(),
//! );
//! let resolver = SegmentResolver::new(store);
//!
//! let last = resolver.resolve_str("3").unwrap();
//! assert_eq!(last.data(), b"89");
//! assert!(resolver.resolve_str("4").is_err());
//! ```

pub mod paging;
pub mod ports;

// Re-export commonly used types
pub use paging::{PagingError, PagingService, Payload, Segment, SegmentIndex, SegmentResolver};
pub use ports::{PayloadSource, SegmentEncoder};
