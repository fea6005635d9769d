//! Binary format constants and the file header.

use crate::{Error, Result};

/// Magic value identifying a prefix set file.
pub const MAGIC: u32 = 0x864088dd;

/// Current format version.
///
/// Version 2 shares the version 1 layout; only the index sort order
/// changed, from signed to unsigned prefix comparison.
pub const VERSION: u32 = 2;

/// Legacy version with the index sorted under signed comparison.
/// Accepted for read only; the loader rebuilds such sets under unsigned
/// ordering.
pub const LEGACY_VERSION: u32 = 1;

/// Header size in bytes.
pub const HEADER_SIZE: usize = 16;

/// MD5 digest size in bytes.
pub const DIGEST_SIZE: usize = 16;

/// On-disk size of one index entry: u32 prefix + u32 delta offset.
pub const INDEX_ENTRY_SIZE: usize = 8;

/// On-disk size of one delta value.
pub const DELTA_SIZE: usize = 2;

/// Binary file header (16 bytes, little-endian).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Magic value: [`MAGIC`]
    pub magic: u32,
    /// Format version
    pub version: u32,
    /// Number of index entries
    pub index_size: u32,
    /// Number of delta values
    pub deltas_size: u32,
}

impl FileHeader {
    /// Create a current-version header for the given counts.
    pub fn new(index_size: u32, deltas_size: u32) -> Self {
        Self {
            magic: MAGIC,
            version: VERSION,
            index_size,
            deltas_size,
        }
    }

    /// Decode a header from the first [`HEADER_SIZE`] bytes of a file.
    pub fn decode(data: &[u8; HEADER_SIZE]) -> Self {
        let word = |i: usize| u32::from_le_bytes(data[i * 4..i * 4 + 4].try_into().unwrap());
        Self {
            magic: word(0),
            version: word(1),
            index_size: word(2),
            deltas_size: word(3),
        }
    }

    /// Encode the header to its on-disk byte layout.
    pub fn encode(&self) -> [u8; HEADER_SIZE] {
        let mut bytes = [0u8; HEADER_SIZE];
        bytes[0..4].copy_from_slice(&self.magic.to_le_bytes());
        bytes[4..8].copy_from_slice(&self.version.to_le_bytes());
        bytes[8..12].copy_from_slice(&self.index_size.to_le_bytes());
        bytes[12..16].copy_from_slice(&self.deltas_size.to_le_bytes());
        bytes
    }

    /// Validate the header magic and version.
    pub fn validate(&self) -> Result<()> {
        if self.magic != MAGIC {
            return Err(Error::InvalidMagic);
        }
        if self.version != VERSION && self.version != LEGACY_VERSION {
            return Err(Error::UnsupportedVersion(self.version));
        }
        Ok(())
    }

    /// Total file size implied by the declared counts.
    pub fn expected_file_size(&self) -> usize {
        HEADER_SIZE
            + self.index_size as usize * INDEX_ENTRY_SIZE
            + self.deltas_size as usize * DELTA_SIZE
            + DIGEST_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_roundtrip() {
        let header = FileHeader::new(17, 4242);
        let decoded = FileHeader::decode(&header.encode());
        assert_eq!(header, decoded);
    }

    #[test]
    fn test_header_validation() {
        let header = FileHeader::new(0, 0);
        assert!(header.validate().is_ok());

        let mut bad = header;
        bad.magic = 0xdeadbeef;
        assert!(matches!(bad.validate(), Err(Error::InvalidMagic)));

        let mut legacy = header;
        legacy.version = LEGACY_VERSION;
        assert!(legacy.validate().is_ok());

        let mut future = header;
        future.version = VERSION + 1;
        assert!(matches!(
            future.validate(),
            Err(Error::UnsupportedVersion(3))
        ));
    }

    #[test]
    fn test_expected_file_size() {
        let header = FileHeader::new(2, 3);
        assert_eq!(
            header.expected_file_size(),
            HEADER_SIZE + 2 * INDEX_ENTRY_SIZE + 3 * DELTA_SIZE + DIGEST_SIZE
        );
    }

    #[test]
    fn test_encode_is_little_endian() {
        let bytes = FileHeader::new(1, 2).encode();
        assert_eq!(&bytes[0..4], &[0xdd, 0x88, 0x40, 0x86]);
        assert_eq!(&bytes[4..8], &[2, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[1, 0, 0, 0]);
        assert_eq!(&bytes[12..16], &[2, 0, 0, 0]);
    }
}
