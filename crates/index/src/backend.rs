//! Unsynchronized storage behind [`SimhashIndex`](crate::SimhashIndex).
//!
//! One hash map per fraction slot, keyed by the fraction's integer value.
//! Buckets keep insertion order and are never deduplicated.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};
use simhash::Fingerprint;

use crate::fraction::FractionLayout;

/// Snapshot of index occupancy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    /// Number of `store` calls applied, duplicates included.
    pub fingerprints: usize,
    pub fraction_count: usize,
    /// Distinct keys per fraction slot.
    pub buckets_per_fraction: Vec<usize>,
    /// Longest candidate list across all slots.
    pub largest_bucket: usize,
}

#[derive(Debug)]
pub(crate) struct FractionTables {
    tables: Vec<HashMap<u64, Vec<Fingerprint>>>,
    stored: usize,
}

impl FractionTables {
    pub(crate) fn new(fraction_count: usize) -> Self {
        Self {
            tables: (0..fraction_count).map(|_| HashMap::new()).collect(),
            stored: 0,
        }
    }

    /// Append `fp` to its bucket in every fraction slot.
    pub(crate) fn insert(&mut self, layout: &FractionLayout, fp: Fingerprint) {
        for (table, key) in self.tables.iter_mut().zip(layout.keys(fp)) {
            table.entry(key).or_default().push(fp);
        }
        self.stored += 1;
    }

    /// First stored fingerprint sharing a fraction with `fp` and lying
    /// strictly closer than `threshold`.
    ///
    /// Slots are visited in ascending order and buckets in insertion order.
    pub(crate) fn find_within(
        &self,
        layout: &FractionLayout,
        fp: Fingerprint,
        threshold: u32,
    ) -> Option<Fingerprint> {
        self.tables
            .iter()
            .zip(layout.keys(fp))
            .filter_map(|(table, key)| table.get(&key))
            .flat_map(|bucket| bucket.iter().copied())
            .find(|candidate| fp.hamming(*candidate) < threshold)
    }

    pub(crate) fn len(&self) -> usize {
        self.stored
    }

    pub(crate) fn stats(&self) -> IndexStats {
        IndexStats {
            fingerprints: self.stored,
            fraction_count: self.tables.len(),
            buckets_per_fraction: self.tables.iter().map(|t| t.len()).collect(),
            largest_bucket: self
                .tables
                .iter()
                .flat_map(|t| t.values().map(Vec::len))
                .max()
                .unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FractionLayout {
        FractionLayout::new(4).unwrap()
    }

    #[test]
    fn insert_fans_out_to_every_slot() {
        let layout = layout();
        let mut tables = FractionTables::new(4);
        tables.insert(&layout, Fingerprint::new(0x0001_0002_0003_0004));

        let stats = tables.stats();
        assert_eq!(stats.fingerprints, 1);
        assert_eq!(stats.buckets_per_fraction, vec![1, 1, 1, 1]);
        assert_eq!(stats.largest_bucket, 1);
    }

    #[test]
    fn repeated_insert_duplicates_bucket_entries() {
        let layout = layout();
        let mut tables = FractionTables::new(4);
        let fp = Fingerprint::new(42);
        tables.insert(&layout, fp);
        tables.insert(&layout, fp);

        let stats = tables.stats();
        assert_eq!(stats.fingerprints, 2);
        assert_eq!(stats.buckets_per_fraction, vec![1, 1, 1, 1]);
        assert_eq!(stats.largest_bucket, 2);
    }

    #[test]
    fn find_within_respects_strict_threshold() {
        let layout = layout();
        let mut tables = FractionTables::new(4);
        tables.insert(&layout, Fingerprint::new(0));

        let two_bits = Fingerprint::new(0b11);
        assert_eq!(tables.find_within(&layout, two_bits, 3), Some(Fingerprint::new(0)));
        assert_eq!(tables.find_within(&layout, two_bits, 2), None);
    }

    #[test]
    fn find_within_ignores_fingerprints_without_shared_fraction() {
        let layout = layout();
        let mut tables = FractionTables::new(4);
        tables.insert(&layout, Fingerprint::new(0));

        // One bit flipped in each fraction: distance 4, no shared slice.
        let spread = Fingerprint::new(1 | 1 << 16 | 1 << 32 | 1 << 48);
        assert_eq!(tables.find_within(&layout, spread, 64), None);
    }

    #[test]
    fn empty_tables_stats() {
        let stats = FractionTables::new(8).stats();
        assert_eq!(stats.fingerprints, 0);
        assert_eq!(stats.buckets_per_fraction, vec![0; 8]);
        assert_eq!(stats.largest_bucket, 0);
    }
}
