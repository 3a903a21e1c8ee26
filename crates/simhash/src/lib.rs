//! # Simhash fingerprinting
//!
//! Computes a 64-bit similarity-preserving fingerprint from a stream of
//! canonical tokens. Documents that share most of their tokens end up with
//! fingerprints at a small Hamming distance.
//!
//! ## Contract
//!
//! - Consumes tokens only; normalization and segmentation happen upstream.
//! - Pure function of `(tokens, config)`: no I/O, no clocks, no global state.
//! - Token order does not matter. The result depends on the multiset of
//!   tokens only.
//!
//! ## Algorithm
//!
//! 1. Hash each token to 64 bits with a [`FingerprintHasher`]
//!    (MurmurHash3 by default).
//! 2. Keep one signed accumulator per bit position. For every token hash,
//!    add 1 where the bit is set and subtract 1 where it is clear.
//! 3. Output bit `i` is 1 iff accumulator `i` is strictly positive. An empty
//!    token stream therefore yields `0`.
//!
//! ## Example Usage
//!
//! ```
//! use simhash::{Simhasher, SimhashConfig};
//!
//! let hasher = Simhasher::new(SimhashConfig::default()).unwrap();
//! let a = hasher.fingerprint(&["the", "quick", "brown", "fox"]);
//! let b = hasher.fingerprint(&["fox", "brown", "quick", "the"]);
//! assert_eq!(a, b);
//! ```

mod accumulate;
pub mod config;
pub mod fingerprint;
pub mod hasher;

pub use crate::accumulate::{fingerprint_tokens, fingerprint_tokens_parallel};
pub use crate::config::{HasherKind, SimhashConfig, SimhashError};
pub use crate::fingerprint::{hamming, Fingerprint, FINGERPRINT_BITS};
pub use crate::hasher::{
    murmur3_64, FingerprintHasher, Murmur3Hasher, Xxh3Hasher, MURMUR3_DEFAULT_SEED,
};

/// Human-readable algorithm identifier.
pub const SIMHASH_ALGORITHM: &str = "simhash64_v1";

/// A configured fingerprint calculator.
#[derive(Debug)]
pub struct Simhasher {
    hasher: Box<dyn FingerprintHasher>,
    cfg: SimhashConfig,
}

impl Simhasher {
    /// Build a simhasher using the hash function named by `cfg.hasher`.
    pub fn new(cfg: SimhashConfig) -> Result<Self, SimhashError> {
        cfg.validate()?;
        let hasher = cfg.hasher.build(cfg.seed);
        tracing::debug!(
            hasher = ?cfg.hasher,
            seed = cfg.effective_seed(),
            parallel = cfg.use_parallel,
            "simhasher ready"
        );
        Ok(Self { hasher, cfg })
    }

    /// Build a simhasher around a caller-supplied hash function. `cfg.hasher`
    /// and `cfg.seed` are ignored.
    pub fn with_hasher<H>(hasher: H, cfg: SimhashConfig) -> Result<Self, SimhashError>
    where
        H: FingerprintHasher + 'static,
    {
        cfg.validate()?;
        Ok(Self {
            hasher: Box::new(hasher),
            cfg,
        })
    }

    /// Compute the fingerprint of a token sequence. Never fails.
    pub fn fingerprint<S>(&self, tokens: &[S]) -> Fingerprint
    where
        S: AsRef<str> + Sync,
    {
        if self.cfg.use_parallel && tokens.len() >= self.cfg.parallel_threshold {
            fingerprint_tokens_parallel(tokens, self.hasher.as_ref())
        } else {
            fingerprint_tokens(tokens, self.hasher.as_ref())
        }
    }

    pub fn config(&self) -> &SimhashConfig {
        &self.cfg
    }
}

impl Default for Simhasher {
    fn default() -> Self {
        let cfg = SimhashConfig::default();
        Self {
            hasher: cfg.hasher.build(cfg.seed),
            cfg,
        }
    }
}
