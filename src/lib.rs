//! Umbrella crate for simhash near-duplicate detection.
//!
//! Ties the tokenizer ([`canonical`]), the fingerprint calculator
//! ([`simhash`]) and the fractioned index ([`index`]) together behind
//! [`SimhashEngine`].
//!
//! ```
//! use simdup::SimhashEngine;
//!
//! let engine = SimhashEngine::new(4, 3).unwrap();
//! let fp = engine.fingerprint(&["the", "quick", "fox"]);
//! assert!(!engine.is_duplicate(fp));
//! engine.store(fp);
//! assert!(engine.is_duplicate(fp));
//! ```

pub mod config;
mod engine;

pub use canonical::{
    CanonicalError, CanonicalizeConfig, CanonicalizedDocument, Token, canonicalize,
};
pub use index::{
    DEFAULT_FRACTION_COUNT, DEFAULT_HAMMING_THRESHOLD, FractionLayout, IndexConfig, IndexError,
    IndexStats, RecallPolicy, SimhashIndex,
};
pub use simhash::{
    FINGERPRINT_BITS, Fingerprint, FingerprintHasher, HasherKind, Murmur3Hasher, SimhashConfig,
    SimhashError, Simhasher, Xxh3Hasher, hamming,
};

pub use crate::config::{ConfigLoadError, SimdupConfig};
pub use crate::engine::{SimhashEngine, Verdict};

use thiserror::Error;

/// Errors raised while building or driving a [`SimhashEngine`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("canonicalization failure: {0}")]
    Canonical(#[from] CanonicalError),
    #[error("simhash configuration failure: {0}")]
    Simhash(#[from] SimhashError),
    #[error("index configuration failure: {0}")]
    Index(#[from] IndexError),
}
