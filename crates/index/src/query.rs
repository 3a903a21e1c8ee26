use simhash::Fingerprint;

use crate::SimhashIndex;

/// Duplicate lookups
impl SimhashIndex {
    /// True when some stored fingerprint sharing at least one fraction with
    /// `fp` lies at Hamming distance strictly below the threshold.
    ///
    /// A fingerprint that was already stored is a duplicate of itself, so
    /// callers that want "duplicate of something else" must query before
    /// storing (or use [`check_and_store`](Self::check_and_store)).
    pub fn is_duplicate(&self, fp: Fingerprint) -> bool {
        let hit = self
            .read()
            .find_within(&self.layout, fp, self.cfg.hamming_threshold);
        if let Some(candidate) = hit {
            tracing::debug!(
                fingerprint = %fp,
                matched = %candidate,
                distance = fp.hamming(candidate),
                "near-duplicate found"
            );
        }
        hit.is_some()
    }

    /// Query then store under one write lock. Returns the verdict as it was
    /// before `fp` was inserted.
    pub fn check_and_store(&self, fp: Fingerprint) -> bool {
        let mut tables = self.write();
        let duplicate = tables
            .find_within(&self.layout, fp, self.cfg.hamming_threshold)
            .is_some();
        tables.insert(&self.layout, fp);
        tracing::trace!(fingerprint = %fp, duplicate, "checked and stored fingerprint");
        duplicate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IndexConfig, RecallPolicy};

    fn default_index() -> SimhashIndex {
        SimhashIndex::new(IndexConfig::default()).unwrap()
    }

    #[test]
    fn empty_index_has_no_duplicates() {
        let index = default_index();
        assert!(!index.is_duplicate(Fingerprint::ZERO));
    }

    #[test]
    fn store_then_query_finds_self() {
        for threshold in 1..=4 {
            let index =
                SimhashIndex::new(IndexConfig::new().with_hamming_threshold(threshold)).unwrap();
            let fp = Fingerprint::new(0x1234_5678_9abc_def0);
            index.store(fp);
            assert!(index.is_duplicate(fp), "threshold={threshold}");
        }
    }

    #[test]
    fn zero_threshold_never_matches() {
        let index = SimhashIndex::new(IndexConfig::new().with_hamming_threshold(0)).unwrap();
        let fp = Fingerprint::new(99);
        index.store(fp);
        assert!(!index.is_duplicate(fp));
    }

    #[test]
    fn all_zero_versus_all_one_is_not_duplicate() {
        let index = default_index();
        index.store(Fingerprint::new(0x0000_0000_0000_0000));
        assert!(!index.is_duplicate(Fingerprint::new(0xFFFF_FFFF_FFFF_FFFF)));
    }

    #[test]
    fn distance_at_threshold_is_not_duplicate() {
        let index = default_index();
        index.store(Fingerprint::ZERO);
        assert!(index.is_duplicate(Fingerprint::new(0b11)));
        assert!(!index.is_duplicate(Fingerprint::new(0b111)));
    }

    #[test]
    fn pigeonhole_recall_with_spread_bits() {
        // Flip bits in different fractions so only one slice still agrees.
        let index = default_index();
        let base = Fingerprint::new(0xa5a5_5a5a_0f0f_f0f0);
        index.store(base);
        let near = Fingerprint::new(base.value() ^ (1 | 1 << 20));
        assert_eq!(base.hamming(near), 2);
        assert!(index.is_duplicate(near));
    }

    struct SplitMix64(u64);

    impl SplitMix64 {
        fn next_u64(&mut self) -> u64 {
            self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = self.0;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        }

        /// Mask with exactly `bits` distinct bits set.
        fn flip_mask(&mut self, bits: u32) -> u64 {
            let mut mask = 0u64;
            while mask.count_ones() < bits {
                mask |= 1 << (self.next_u64() % 64);
            }
            mask
        }
    }

    #[test]
    fn lookup_agrees_with_linear_scan() {
        let shapes = [
            (1usize, 1u32),
            (2, 2),
            (4, 3),
            (4, 4),
            (8, 5),
            (8, 8),
            (16, 12),
            (32, 20),
        ];
        let mut rng = SplitMix64(0x5eed);

        for (fraction_count, threshold) in shapes {
            let cfg = IndexConfig::new()
                .with_fraction_count(fraction_count)
                .with_hamming_threshold(threshold);
            let index = SimhashIndex::new(cfg).unwrap();
            let stored: Vec<Fingerprint> =
                (0..64).map(|_| Fingerprint::new(rng.next_u64())).collect();
            for &fp in &stored {
                index.store(fp);
            }

            for i in 0..256 {
                let query = if i % 2 == 0 {
                    let base = stored[(rng.next_u64() % stored.len() as u64) as usize];
                    let flips = (rng.next_u64() % u64::from(threshold)) as u32;
                    Fingerprint::new(base.value() ^ rng.flip_mask(flips))
                } else {
                    Fingerprint::new(rng.next_u64())
                };
                let expected = stored.iter().any(|s| s.hamming(query) < threshold);
                assert_eq!(
                    index.is_duplicate(query),
                    expected,
                    "fractions={fraction_count} threshold={threshold} query={query}"
                );
                if i % 2 == 0 {
                    assert!(expected);
                }
            }
        }
    }

    #[test]
    fn warn_policy_can_miss_spread_neighbours() {
        let cfg = IndexConfig::new()
            .with_hamming_threshold(6)
            .with_recall_policy(RecallPolicy::Warn);
        let index = SimhashIndex::new(cfg).unwrap();
        index.store(Fingerprint::ZERO);
        let spread = Fingerprint::new(1 | 1 << 16 | 1 << 32 | 1 << 48);
        assert_eq!(spread.hamming(Fingerprint::ZERO), 4);
        assert!(!index.is_duplicate(spread));
    }

    #[test]
    fn check_and_store_reports_prior_state() {
        let index = default_index();
        let fp = Fingerprint::new(0xdead_beef);
        assert!(!index.check_and_store(fp));
        assert!(index.check_and_store(fp));
        assert_eq!(index.len(), 2);
    }
}
