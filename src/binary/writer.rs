//! Prefix set file writer.

use md5::{Digest, Md5};
use std::fs;
use std::path::Path;

use super::format::*;
use crate::set::PrefixSet;
use crate::{Error, Result};

/// Serialize `set` into its on-disk image, digest included.
///
/// Always emits the current format version. Fails if either vector
/// length does not fit the 32-bit size fields; nothing is ever silently
/// truncated.
pub fn serialize(set: &PrefixSet) -> Result<Vec<u8>> {
    let index = set.index();
    let deltas = set.deltas();

    let index_size = u32::try_from(index.len()).map_err(|_| Error::SetTooLarge {
        len: index.len(),
    })?;
    let deltas_size = u32::try_from(deltas.len()).map_err(|_| Error::SetTooLarge {
        len: deltas.len(),
    })?;

    let header = FileHeader::new(index_size, deltas_size);
    let mut buffer = Vec::with_capacity(header.expected_file_size());

    buffer.extend_from_slice(&header.encode());

    for entry in index {
        buffer.extend_from_slice(&entry.prefix.to_le_bytes());
        // Offsets point into |deltas|, so they fit u32 whenever the
        // delta count does.
        buffer.extend_from_slice(&(entry.offset as u32).to_le_bytes());
    }

    for &delta in deltas {
        buffer.extend_from_slice(&delta.to_le_bytes());
    }

    let mut hasher = Md5::new();
    hasher.update(&buffer);
    let digest = hasher.finalize();
    buffer.extend_from_slice(&digest);

    log::debug!(
        "serialized prefix set: {} index entries, {} deltas, {} bytes",
        index.len(),
        deltas.len(),
        buffer.len()
    );
    Ok(buffer)
}

/// Serialize `set` and write it to `path`.
pub fn write_file(set: &PrefixSet, path: &Path) -> Result<()> {
    let data = serialize(set)?;
    fs::write(path, data)?;
    Ok(())
}
