//! Streaming construction of a [`PrefixSet`] from a sorted prefix stream.

use crate::set::PrefixSet;

/// Streaming compressor that turns a strictly ascending sequence of
/// prefixes into a finished [`PrefixSet`].
///
/// Prefixes are buffered and periodically encoded into runs, so the full
/// uncompressed input is never held in memory. Input must be strictly
/// ascending; an exact duplicate of the previous value is dropped
/// silently, anything else out of order is a caller bug.
///
/// [`PrefixSetBuilder::build`] consumes the builder, so a builder
/// produces exactly one set.
#[derive(Debug, Default)]
pub struct PrefixSetBuilder {
    set: PrefixSet,
    buffer: Vec<u32>,
}

impl PrefixSetBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder pre-loaded from a sorted slice.
    ///
    /// The slice must satisfy the same ordering contract as repeated
    /// [`Self::add_prefix`] calls.
    pub fn from_prefixes(prefixes: &[u32]) -> Self {
        let mut builder = Self::new();
        for &prefix in prefixes {
            builder.add_prefix(prefix);
        }
        builder
    }

    /// Buffer one prefix, emitting a run once enough input is queued.
    ///
    /// `prefix` must be greater than every previously added value, except
    /// that repeating the immediately preceding value is a no-op.
    pub fn add_prefix(&mut self, prefix: u32) {
        match self.buffer.last() {
            None => {
                debug_assert!(self.set.index().is_empty());
                debug_assert!(self.set.deltas().is_empty());
            }
            Some(&last) => {
                // Drop duplicates.
                if last == prefix {
                    return;
                }
                debug_assert!(last < prefix, "prefixes must be strictly ascending");
            }
        }
        self.buffer.push(prefix);

        // Flush once a full run can be constructed. +1 for the index
        // item, and +1 to keep at least one value behind for duplicate
        // detection against the next insert.
        if self.buffer.len() > PrefixSet::MAX_RUN + 2 {
            self.emit_run();
        }
    }

    /// Flush remaining buffered prefixes and hand over the finished set.
    pub fn build(mut self) -> PrefixSet {
        while !self.buffer.is_empty() {
            self.emit_run();
        }

        // The set is read-only from here on, so release surplus growth
        // capacity.
        self.set.shrink();
        self.set
    }

    /// Encode the longest valid run at the front of the buffer into one
    /// index entry plus deltas, and drop the consumed values.
    fn emit_run(&mut self) {
        let base = self.buffer[0];
        let mut run = [0u16; PrefixSet::MAX_RUN];
        let mut run_len = 0;

        let mut prev = base;
        let mut consumed = 1;
        for &next in &self.buffer[1..] {
            if run_len == PrefixSet::MAX_RUN {
                break;
            }
            debug_assert!(next > prev);

            // Wrapping is deliberate: under the ordering contract the
            // true difference never wraps, and sorted u32 values can be
            // more than i32::MAX apart.
            let delta = next.wrapping_sub(prev);

            // Break the run if the delta doesn't fit 16 bits.
            let Ok(delta16) = u16::try_from(delta) else {
                break;
            };

            run[run_len] = delta16;
            run_len += 1;
            prev = next;
            consumed += 1;
        }

        self.set.push_run(base, &run[..run_len]);
        self.buffer.drain(..consumed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder() {
        let set = PrefixSetBuilder::new().build();
        assert!(set.is_empty());
    }

    #[test]
    fn test_single_prefix() {
        let mut builder = PrefixSetBuilder::new();
        builder.add_prefix(42);
        let set = builder.build();

        assert!(set.contains(42));
        assert!(!set.contains(41));
        assert!(!set.contains(43));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_adjacent_duplicate_is_noop() {
        let mut builder = PrefixSetBuilder::new();
        builder.add_prefix(7);
        builder.add_prefix(7);
        builder.add_prefix(9);
        builder.add_prefix(9);
        let set = builder.build();

        assert_eq!(set.prefixes(), vec![7, 9]);
    }

    #[test]
    fn test_run_splits_on_large_gap() {
        // Gap of exactly u16::MAX continues the run; one more splits it.
        let continues = [0u32, u16::MAX as u32];
        let set = PrefixSetBuilder::from_prefixes(&continues).build();
        assert_eq!(set.index().len(), 1);
        assert_eq!(set.deltas().len(), 1);

        let splits = [0u32, u16::MAX as u32 + 1];
        let set = PrefixSetBuilder::from_prefixes(&splits).build();
        assert_eq!(set.index().len(), 2);
        assert_eq!(set.deltas().len(), 0);
        assert!(set.contains(0));
        assert!(set.contains(u16::MAX as u32 + 1));
        assert_eq!(set.prefixes(), splits);
    }

    #[test]
    fn test_run_splits_at_max_length() {
        // MAX_RUN + 2 consecutive values: base + MAX_RUN deltas in the
        // first run, the remainder starts a second index entry.
        let count = PrefixSet::MAX_RUN as u32 + 2;
        let prefixes: Vec<u32> = (0..count).collect();
        let set = PrefixSetBuilder::from_prefixes(&prefixes).build();

        assert_eq!(set.index().len(), 2);
        assert_eq!(set.deltas().len(), PrefixSet::MAX_RUN);
        assert_eq!(set.prefixes(), prefixes);
    }

    #[test]
    fn test_incremental_matches_batch() {
        let prefixes: Vec<u32> = (0..10_000u32).map(|i| i * 337).collect();

        let mut incremental = PrefixSetBuilder::new();
        for &p in &prefixes {
            incremental.add_prefix(p);
        }

        let batch = PrefixSetBuilder::from_prefixes(&prefixes);

        assert_eq!(incremental.build().prefixes(), batch.build().prefixes());
    }

    #[test]
    fn test_wide_spread_values() {
        // Values scattered across the whole u32 space, all gaps too wide
        // for deltas: every member becomes its own index entry.
        let prefixes: Vec<u32> = (0..64u32).map(|i| i << 26).collect();
        let set = PrefixSetBuilder::from_prefixes(&prefixes).build();

        assert_eq!(set.index().len(), prefixes.len());
        assert_eq!(set.deltas().len(), 0);
        assert_eq!(set.prefixes(), prefixes);
    }
}
