//! Configuration and error types for simhash fingerprinting.
//!
//! Nothing here performs I/O; the fingerprint is a pure function of
//! `(tokens, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hasher::{FingerprintHasher, Murmur3Hasher, Xxh3Hasher, MURMUR3_DEFAULT_SEED};

/// Token hash function used to feed the bit accumulators.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HasherKind {
    /// MurmurHash3 64-bit.
    #[default]
    Murmur3,
    /// xxh3-64.
    Xxh3,
}

impl HasherKind {
    /// Seed used when the config leaves `seed` unset.
    pub fn default_seed(self) -> u64 {
        match self {
            HasherKind::Murmur3 => MURMUR3_DEFAULT_SEED,
            HasherKind::Xxh3 => 0,
        }
    }

    pub fn build(self, seed: Option<u64>) -> Box<dyn FingerprintHasher> {
        let seed = seed.unwrap_or_else(|| self.default_seed());
        match self {
            HasherKind::Murmur3 => Box::new(Murmur3Hasher::new(seed)),
            HasherKind::Xxh3 => Box::new(Xxh3Hasher::new(seed)),
        }
    }
}

/// Configuration for the simhash stage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimhashConfig {
    /// Configuration schema version.
    ///
    /// Any change that can alter fingerprints (hasher, seed handling) must
    /// bump this so previously stored fingerprints are not compared against
    /// incompatible ones.
    pub version: u32,
    /// Token hash function.
    pub hasher: HasherKind,
    /// Hash seed; `None` uses the hasher's default.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Reduce the bit accumulators in parallel with rayon.
    pub use_parallel: bool,
    /// Minimum token count before the parallel path is taken.
    pub parallel_threshold: usize,
}

impl SimhashConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hasher(mut self, hasher: HasherKind) -> Self {
        self.hasher = hasher;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, use_parallel: bool) -> Self {
        self.use_parallel = use_parallel;
        self
    }

    pub fn with_parallel_threshold(mut self, parallel_threshold: usize) -> Self {
        self.parallel_threshold = parallel_threshold;
        self
    }

    /// Seed actually fed to the hasher.
    pub fn effective_seed(&self) -> u64 {
        self.seed.unwrap_or_else(|| self.hasher.default_seed())
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), SimhashError> {
        if self.version < 1 {
            return Err(SimhashError::InvalidConfigVersion {
                version: self.version,
            });
        }
        if self.use_parallel && self.parallel_threshold == 0 {
            return Err(SimhashError::InvalidParallelThreshold);
        }
        Ok(())
    }
}

impl Default for SimhashConfig {
    fn default() -> Self {
        Self {
            version: 1,
            hasher: HasherKind::Murmur3,
            seed: None,
            use_parallel: false,
            parallel_threshold: 4096,
        }
    }
}

/// Errors returned when building a simhasher.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimhashError {
    #[error("invalid config version {version}; expected >= 1")]
    InvalidConfigVersion { version: u32 },
    #[error("parallel_threshold must be >= 1 when use_parallel is set")]
    InvalidParallelThreshold,
}
