//! # Fractioned simhash index
//!
//! Stores 64-bit fingerprints so that "is there a stored fingerprint within
//! Hamming distance `< threshold` of this one?" can be answered without
//! scanning every stored fingerprint.
//!
//! ## How it works
//!
//! Each fingerprint is cut into `fraction_count` equal contiguous slices.
//! `store` appends the full fingerprint to one bucket per slice, keyed by the
//! slice value. A query only compares against fingerprints that agree
//! exactly on at least one slice.
//!
//! Two fingerprints at distance `d` that share no slice must differ in every
//! slice, so `d >= fraction_count`. Hence when
//! `hamming_threshold <= fraction_count`, every stored fingerprint with
//! `d < hamming_threshold` shares a slice with the query and is found.
//! Larger thresholds lose recall; [`RecallPolicy`] decides whether such a
//! configuration is rejected or only logged.
//!
//! ## Concurrency
//!
//! A single `RwLock` guards all fraction slots. Queries share the read lock,
//! `store` takes the write lock, so a fingerprint becomes visible in all
//! slots at once.
//!
//! ## Example Usage
//!
//! ```
//! use index::{IndexConfig, SimhashIndex};
//! use simhash::Fingerprint;
//!
//! let index = SimhashIndex::new(IndexConfig::default()).unwrap();
//! index.store(Fingerprint::new(0b1000));
//!
//! assert!(index.is_duplicate(Fingerprint::new(0b1011)));
//! assert!(!index.is_duplicate(Fingerprint::new(u64::MAX)));
//! ```

mod backend;
mod fraction;
mod query;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use simhash::{Fingerprint, FINGERPRINT_BITS};
use thiserror::Error;

use crate::backend::FractionTables;
pub use crate::backend::IndexStats;
pub use crate::fraction::FractionLayout;

/// Default number of fractions per fingerprint.
pub const DEFAULT_FRACTION_COUNT: usize = 4;

/// Default Hamming threshold; a match needs distance strictly below it.
pub const DEFAULT_HAMMING_THRESHOLD: u32 = 3;

/// What to do when `hamming_threshold > fraction_count`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecallPolicy {
    /// Refuse to build the index.
    #[default]
    Reject,
    /// Build it anyway and log a warning.
    Warn,
}

/// Config for initializing the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Number of equal slices; must divide 64.
    pub fraction_count: usize,
    /// Fingerprints at distance strictly below this are duplicates.
    pub hamming_threshold: u32,
    #[serde(default)]
    pub recall_policy: RecallPolicy,
}

impl IndexConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fraction_count(mut self, fraction_count: usize) -> Self {
        self.fraction_count = fraction_count;
        self
    }

    pub fn with_hamming_threshold(mut self, hamming_threshold: u32) -> Self {
        self.hamming_threshold = hamming_threshold;
        self
    }

    pub fn with_recall_policy(mut self, recall_policy: RecallPolicy) -> Self {
        self.recall_policy = recall_policy;
        self
    }

    /// True when every sub-threshold neighbour is guaranteed to be found.
    pub fn has_full_recall(&self) -> bool {
        self.hamming_threshold as usize <= self.fraction_count
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), IndexError> {
        let bits = FINGERPRINT_BITS as usize;
        if self.fraction_count == 0 || bits % self.fraction_count != 0 {
            return Err(IndexError::InvalidFractionCount {
                fraction_count: self.fraction_count,
            });
        }
        if !self.has_full_recall() && self.recall_policy == RecallPolicy::Reject {
            return Err(IndexError::ThresholdExceedsFractions {
                threshold: self.hamming_threshold,
                fraction_count: self.fraction_count,
            });
        }
        Ok(())
    }
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            fraction_count: DEFAULT_FRACTION_COUNT,
            hamming_threshold: DEFAULT_HAMMING_THRESHOLD,
            recall_policy: RecallPolicy::Reject,
        }
    }
}

/// Construction-time configuration errors. Runtime operations never fail.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IndexError {
    #[error("fraction count {fraction_count} does not evenly divide 64 bits")]
    InvalidFractionCount { fraction_count: usize },
    #[error(
        "hamming threshold {threshold} exceeds fraction count {fraction_count}; \
         near-duplicates would be missed"
    )]
    ThresholdExceedsFractions { threshold: u32, fraction_count: usize },
}

/// In-memory fractioned fingerprint index.
#[derive(Debug)]
pub struct SimhashIndex {
    cfg: IndexConfig,
    layout: FractionLayout,
    tables: RwLock<FractionTables>,
}

impl SimhashIndex {
    /// Validate `cfg` and build an empty index.
    pub fn new(cfg: IndexConfig) -> Result<Self, IndexError> {
        cfg.validate()?;
        let layout = FractionLayout::new(cfg.fraction_count)?;
        if !cfg.has_full_recall() {
            tracing::warn!(
                threshold = cfg.hamming_threshold,
                fraction_count = cfg.fraction_count,
                "hamming threshold exceeds fraction count; recall is not guaranteed"
            );
        }
        Ok(Self {
            tables: RwLock::new(FractionTables::new(layout.fraction_count())),
            layout,
            cfg,
        })
    }

    /// Append `fp` to every fraction slot. Storing the same fingerprint
    /// twice keeps two entries.
    pub fn store(&self, fp: Fingerprint) {
        self.write().insert(&self.layout, fp);
        tracing::trace!(fingerprint = %fp, "stored fingerprint");
    }

    pub fn split(&self, fp: Fingerprint) -> Vec<String> {
        self.layout.split(fp)
    }

    /// Number of `store` calls applied so far.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> IndexStats {
        self.read().stats()
    }

    pub fn config(&self) -> &IndexConfig {
        &self.cfg
    }

    pub fn layout(&self) -> &FractionLayout {
        &self.layout
    }

    // Writers only ever append, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, FractionTables> {
        self.tables
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, FractionTables> {
        self.tables
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
