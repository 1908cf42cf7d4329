//! netrange - network range compiler
//!
//! Turns human-authored, line-oriented text describing sets of IPv4/IPv6
//! addresses, ports, protocol numbers, traffic directions and network areas
//! into canonical, deduplicated, sorted numeric interval sets, plus the
//! exact binary layout size so the result can be transferred into the
//! fixed-capacity buffer of a downstream packet-filtering engine.
//!
//! # Architecture
//!
//! - [`addr`] - IPv4/IPv6 text ↔ numeric conversion and CIDR mask arithmetic
//! - [`tables`] - symbolic name tables (protocols, services, directions, areas)
//! - [`merge`] - ordered interval accumulation and sweep merging
//! - [`range`] - per-domain documents with the shared parse/serialize driver
//! - [`capacity`] - fixed-capacity consumer buffer arithmetic
//! - [`zone`] - address extraction from downloaded zone texts
//!
//! # Example
//!
//! ```
//! use netrange::{IpRange, RangeText};
//!
//! let mut range = IpRange::new();
//! assert!(range.from_text("10.0.0.0-10.0.0.255\n10.0.1.0/24\n"));
//! // Touching blocks merge into one contiguous pair
//! assert_eq!(range.to_text(), "10.0.0.0-10.0.1.255\n");
//! assert!(range.check_size());
//! ```
//!
//! # Contracts
//!
//! - Parsing is fail-fast and atomic per call: the first malformed line
//!   aborts `from_text` with a 1-based line number and the offending tokens
//! - Merged pairs are disjoint and non-adjacent; CIDR is accepted on input
//!   but never produced on output
//! - `size_to_write()` equals the byte count the binary writer produces

// Allow pedantic clippy warnings that are not worth fixing for this codebase
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::missing_errors_doc)]

pub mod addr;
pub mod capacity;
pub mod error;
pub mod merge;
pub(crate) mod parse;
pub mod range;
pub mod tables;
pub mod zone;

// Re-export commonly used types
pub use error::{LineError, LineErrorKind, ParseError, ParseOutcome};
pub use merge::Pair;
pub use range::{AreaRange, DirRange, IpRange, PortRange, ProtoRange, RangeText};
pub use tables::{Area, Direction, ProtocolType};
