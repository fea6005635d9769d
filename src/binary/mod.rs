//! Binary file format for prefix set persistence.
//!
//! # File Structure
//!
//! ```text
//! +----------------------+
//! |  HEADER (16 bytes)   |  magic, version, index_size, deltas_size
//! +----------------------+
//! |  INDEX               |  index_size x (u32 prefix, u32 delta offset)
//! +----------------------+
//! |  DELTAS              |  deltas_size x u16
//! +----------------------+
//! |  MD5 DIGEST (16 B)   |  over header + index + deltas
//! +----------------------+
//! ```
//!
//! All integers are little-endian. The loader validates size, magic,
//! version, declared counts, and digest before returning a set; any
//! failure yields an error and never a partial set.

mod format;
pub mod reader;
pub mod writer;


pub use format::*;
