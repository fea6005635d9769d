//! Prefix set file reader with memory-mapping support.

use md5::{Digest, Md5};
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

use super::format::*;
use crate::builder::PrefixSetBuilder;
use crate::set::{IndexEntry, PrefixSet};
use crate::{Error, Result};

/// Load a prefix set file.
///
/// The file is memory-mapped and parsed with bounds-checked reads, so a
/// damaged file of any shape yields an error rather than a panic.
pub fn read_file(path: &Path) -> Result<PrefixSet> {
    let file = File::open(path)?;
    let mmap = unsafe { Mmap::map(&file)? };
    read_bytes(&mmap).map_err(|err| {
        log::warn!("rejected prefix set file {}: {}", path.display(), err);
        err
    })
}

/// Parse a serialized prefix set from bytes.
///
/// Validation order: minimum size, magic, version, exact total size for
/// the declared counts, digest, index offsets. The first failure wins
/// and no partial set is returned.
pub fn read_bytes(data: &[u8]) -> Result<PrefixSet> {
    if data.len() < HEADER_SIZE + DIGEST_SIZE {
        return Err(Error::Truncated {
            expected: HEADER_SIZE + DIGEST_SIZE,
            actual: data.len(),
        });
    }

    let header_bytes: &[u8; HEADER_SIZE] = data[..HEADER_SIZE].try_into().unwrap();
    let header = FileHeader::decode(header_bytes);
    header.validate()?;

    // Check for bogus sizes before allocating any space.
    let expected = header.expected_file_size();
    if data.len() != expected {
        return Err(Error::SizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    let payload_end = expected - DIGEST_SIZE;
    let mut hasher = Md5::new();
    hasher.update(&data[..payload_end]);
    if hasher.finalize().as_slice() != &data[payload_end..] {
        return Err(Error::ChecksumMismatch);
    }

    let deltas_count = header.deltas_size as usize;

    let mut index = Vec::with_capacity(header.index_size as usize);
    let mut cursor = HEADER_SIZE;
    let mut last_offset = 0usize;
    for _ in 0..header.index_size {
        let prefix = read_u32(data, cursor);
        let offset = read_u32(data, cursor + 4) as usize;
        cursor += INDEX_ENTRY_SIZE;

        // The digest guarantees integrity, not sanity. Offsets must stay
        // monotonic and inside the delta array for the query path to
        // slice safely.
        if offset < last_offset || offset > deltas_count {
            return Err(Error::CorruptIndex);
        }
        last_offset = offset;

        index.push(IndexEntry { prefix, offset });
    }

    let mut deltas = Vec::with_capacity(deltas_count);
    for _ in 0..deltas_count {
        deltas.push(u16::from_le_bytes([data[cursor], data[cursor + 1]]));
        cursor += DELTA_SIZE;
    }

    // Version 1 files sorted the index under signed comparison. Pull out
    // the plain prefixes, re-sort unsigned, and rebuild fresh rather
    // than trusting the old order.
    if header.version == LEGACY_VERSION {
        let legacy = PrefixSet::from_parts(index, deltas);
        let mut prefixes = legacy.prefixes();
        prefixes.sort_unstable();
        log::debug!(
            "migrated legacy v1 prefix set file: {} prefixes re-sorted",
            prefixes.len()
        );
        return Ok(PrefixSetBuilder::from_prefixes(&prefixes).build());
    }

    log::debug!(
        "loaded prefix set: {} index entries, {} deltas",
        index.len(),
        deltas.len()
    );
    Ok(PrefixSet::from_parts(index, deltas))
}

fn read_u32(data: &[u8], at: usize) -> u32 {
    u32::from_le_bytes(data[at..at + 4].try_into().unwrap())
}
