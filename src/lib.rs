//! PrefixSet - a compact, read-optimized set of 32-bit hash prefixes.
//!
//! This crate stores a sorted set of unsigned 32-bit integers (truncated
//! hash values used for URL-blacklist membership testing) in a
//! delta-compressed layout, and can persist it to a checksummed binary
//! file.
//!
//! # Features
//!
//! - **Delta compression**: runs of nearby values cost 2 bytes each
//!   instead of 4
//! - **Streaming construction**: [`PrefixSetBuilder`] compresses a sorted
//!   stream incrementally, bounding peak memory
//! - **Binary file format**: versioned, MD5-checksummed single-file
//!   persistence with memory-mapped loading
//! - **Thread-safe reads**: a finished set is immutable and safe to share
//!   across threads
//!
//! # Quick Start
//!
//! ```
//! use prefixset::PrefixSetBuilder;
//!
//! let mut builder = PrefixSetBuilder::new();
//! for prefix in [5u32, 10, 11, 70000, 70001] {
//!     builder.add_prefix(prefix);
//! }
//! let set = builder.build();
//!
//! assert!(set.contains(10));
//! assert!(!set.contains(9));
//! assert_eq!(set.prefixes(), vec![5, 10, 11, 70000, 70001]);
//! ```
//!
//! # Persistence
//!
//! ```no_run
//! use prefixset::{PrefixSet, PrefixSetBuilder};
//! use std::path::Path;
//!
//! # fn main() -> prefixset::Result<()> {
//! let set = PrefixSetBuilder::from_prefixes(&[5, 10, 11]).build();
//! set.write_file(Path::new("prefixes.pset"))?;
//!
//! let reloaded = PrefixSet::load_file(Path::new("prefixes.pset"))?;
//! assert!(reloaded.contains(10));
//! # Ok(())
//! # }
//! ```
//!
//! Loading rejects any malformed, truncated, or checksum-mismatched file
//! with a typed error; corruption never panics and never yields a partial
//! set.
//!
//! # Contract
//!
//! The builder requires strictly ascending input. An exact duplicate of
//! the immediately preceding value is silently dropped; anything else out
//! of order is a caller bug and trips a debug assertion.

mod builder;
mod error;
mod set;

pub mod binary;

// Re-export core types
pub use builder::PrefixSetBuilder;
pub use error::{Error, Result};
pub use set::PrefixSet;
