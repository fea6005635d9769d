//! Delta-compressed prefix set and its query path.
//!
//! The set stores sorted 32-bit prefixes as runs: one literal `u32` base
//! per run in `index`, followed by 16-bit deltas in `deltas`. Cumulative
//! addition of a run's deltas onto its base reconstructs the run's
//! remaining members. A run breaks when the gap to the next prefix does
//! not fit a `u16`, or at [`PrefixSet::MAX_RUN`] deltas, which bounds the
//! linear scan after the binary search.

use std::path::Path;

use crate::binary::{reader, writer};
use crate::Result;

/// One run of the compressed layout: a literal set member plus the
/// position in the delta array where the run's deltas begin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IndexEntry {
    /// Base prefix, itself a member of the set.
    pub prefix: u32,
    /// Offset of the run's first delta in `deltas`.
    pub offset: usize,
}

// Vector growth doubles capacity, which can briefly hold ~200% of the
// final delta array near the end of a large build. Prefixes cover the
// 32-bit space roughly uniformly, so once the running base passes this
// threshold the final count can be extrapolated and reserved in one step.
// 1 << 30 keeps the estimate's error under the 1% slop added below.
const ESTIMATE_THRESHOLD: u32 = 1 << 30;

fn estimate_final_count(current_prefix: u32, current_count: usize) -> usize {
    // estimated_count / current_count == u32::MAX / current_prefix,
    // with 2^32 close enough as the numerator for large sets.
    let estimated = (((current_count as u64) << 32) / u64::from(current_prefix)) as usize;
    estimated + estimated / 100
}

/// Immutable, delta-compressed set of unsigned 32-bit prefixes.
///
/// Created by [`crate::PrefixSetBuilder::build`] or [`PrefixSet::load_file`].
/// All operations on a finished set are read-only, so a shared reference
/// may be queried from any number of threads.
#[derive(Debug, Default)]
pub struct PrefixSet {
    index: Vec<IndexEntry>,
    deltas: Vec<u16>,
}

impl PrefixSet {
    /// Maximum number of deltas in a single run.
    ///
    /// Caps the per-query scan cost; a longer stretch of small gaps is
    /// simply split across several index entries.
    pub const MAX_RUN: usize = 100;

    /// Take ownership of raw storage produced by the builder or reader.
    pub(crate) fn from_parts(index: Vec<IndexEntry>, deltas: Vec<u16>) -> Self {
        Self { index, deltas }
    }

    /// Returns whether `prefix` is a member of the set.
    ///
    /// Binary search locates the run that could contain `prefix`, then a
    /// scan bounded by [`Self::MAX_RUN`] accumulates deltas until the
    /// value is met or passed.
    pub fn contains(&self, prefix: u32) -> bool {
        // First index position strictly after |prefix|.
        let pos = self.index.partition_point(|entry| entry.prefix <= prefix);

        // |prefix| comes before anything in the set.
        if pos == 0 {
            return false;
        }

        let entry = self.index[pos - 1];

        // Every index base is a member.
        if entry.prefix == prefix {
            return true;
        }

        let bound = match self.index.get(pos) {
            Some(next) => next.offset,
            None => self.deltas.len(),
        };

        // Scan forward accumulating deltas while a match is possible.
        let mut current = entry.prefix;
        for &delta in &self.deltas[entry.offset..bound] {
            current = current.wrapping_add(u32::from(delta));
            if current >= prefix {
                return current == prefix;
            }
        }

        false
    }

    /// Reconstructs every member in storage order.
    ///
    /// For a set built through the builder or loaded from a current-format
    /// file, this is ascending unsigned order.
    pub fn prefixes(&self) -> Vec<u32> {
        let mut prefixes = Vec::with_capacity(self.len());

        for (ii, entry) in self.index.iter().enumerate() {
            // This run's deltas end at the next entry's offset, or at the
            // end of the delta array.
            let bound = match self.index.get(ii + 1) {
                Some(next) => next.offset,
                None => self.deltas.len(),
            };

            let mut current = entry.prefix;
            prefixes.push(current);
            for &delta in &self.deltas[entry.offset..bound] {
                current = current.wrapping_add(u32::from(delta));
                prefixes.push(current);
            }
        }

        prefixes
    }

    /// Number of members in the set.
    pub fn len(&self) -> usize {
        self.index.len() + self.deltas.len()
    }

    /// Returns whether the set has no members.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Load a set from a file written by [`Self::write_file`].
    ///
    /// Any malformed, truncated, size-mismatched, or checksum-mismatched
    /// file yields an error; a partial set is never returned. Legacy
    /// version-1 files are accepted and rebuilt under unsigned ordering.
    pub fn load_file(path: &Path) -> Result<Self> {
        reader::read_file(path)
    }

    /// Load a set from an in-memory serialized image.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        reader::read_bytes(data)
    }

    /// Serialize the set to `path` in the current format.
    ///
    /// Fails without truncating if either vector length does not fit the
    /// 32-bit on-disk size fields.
    pub fn write_file(&self, path: &Path) -> Result<()> {
        writer::write_file(self, path)
    }

    /// Serialize the set to an in-memory image.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        writer::serialize(self)
    }

    /// Append one run: a literal base prefix plus its encoded deltas.
    ///
    /// Only the builder and the file reader feed this; both guarantee
    /// `base` is greater than every prefix already stored.
    pub(crate) fn push_run(&mut self, base: u32, run: &[u16]) {
        // Preempt organic capacity doubling once a strong estimate of the
        // final delta count can be made.
        if base > ESTIMATE_THRESHOLD && self.deltas.capacity() < self.deltas.len() + run.len() {
            let target = estimate_final_count(base, self.deltas.len());
            self.deltas
                .reserve(target.saturating_sub(self.deltas.len()));
        }

        self.index.push(IndexEntry {
            prefix: base,
            offset: self.deltas.len(),
        });
        self.deltas.extend_from_slice(run);
    }

    /// Drop surplus growth capacity before publishing the immutable set.
    pub(crate) fn shrink(&mut self) {
        self.index.shrink_to_fit();
        self.deltas.shrink_to_fit();
    }

    pub(crate) fn index(&self) -> &[IndexEntry] {
        &self.index
    }

    pub(crate) fn deltas(&self) -> &[u16] {
        &self.deltas
    }
}
