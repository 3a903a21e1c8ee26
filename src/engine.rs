//! The duplicate-detection engine: a simhasher plus the fractioned index it
//! feeds.

use canonical::{CanonicalizeConfig, canonicalize};
use index::{IndexConfig, SimhashIndex};
use serde::Serialize;
use simhash::{Fingerprint, SimhashConfig, Simhasher};

use crate::config::SimdupConfig;
use crate::EngineError;

/// Result of running one document through [`SimhashEngine::process_text`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub fingerprint: Fingerprint,
    /// True when a near-duplicate was already stored.
    pub duplicate: bool,
    pub token_count: usize,
}

/// Owns the fingerprint calculator and the index. Configuration is fixed at
/// construction.
///
/// The engine is `Sync`; share it behind an `Arc` to check and store from
/// several threads.
#[derive(Debug)]
pub struct SimhashEngine {
    canonical: CanonicalizeConfig,
    simhasher: Simhasher,
    index: SimhashIndex,
}

impl SimhashEngine {
    /// Engine with default tokenizer and hasher and the given index shape.
    pub fn new(fraction_count: usize, hamming_threshold: u32) -> Result<Self, EngineError> {
        let index_cfg = IndexConfig::new()
            .with_fraction_count(fraction_count)
            .with_hamming_threshold(hamming_threshold);
        Self::from_parts(
            CanonicalizeConfig::default(),
            Simhasher::new(SimhashConfig::default())?,
            SimhashIndex::new(index_cfg)?,
        )
    }

    pub fn from_config(cfg: &SimdupConfig) -> Result<Self, EngineError> {
        let engine = Self::from_parts(
            cfg.canonical_config(),
            Simhasher::new(cfg.simhash_config())?,
            SimhashIndex::new(cfg.index_config())?,
        )?;
        tracing::info!(
            name = cfg.name.as_deref().unwrap_or("unnamed"),
            fraction_count = engine.index.config().fraction_count,
            hamming_threshold = engine.index.config().hamming_threshold,
            hasher = ?engine.simhasher.config().hasher,
            "simhash engine configured"
        );
        Ok(engine)
    }

    /// Assemble an engine from already-built components.
    pub fn from_parts(
        canonical: CanonicalizeConfig,
        simhasher: Simhasher,
        index: SimhashIndex,
    ) -> Result<Self, EngineError> {
        canonical.validate()?;
        Ok(Self {
            canonical,
            simhasher,
            index,
        })
    }

    /// Fingerprint of an already tokenized document.
    pub fn fingerprint<S>(&self, tokens: &[S]) -> Fingerprint
    where
        S: AsRef<str> + Sync,
    {
        self.simhasher.fingerprint(tokens)
    }

    /// Tokenize `text` with the engine's canonical config, then fingerprint.
    pub fn fingerprint_text(&self, text: &str) -> Result<Fingerprint, EngineError> {
        let doc = canonicalize(text, &self.canonical)?;
        Ok(self.simhasher.fingerprint(doc.tokens.as_slice()))
    }

    /// Query only; the index is not modified.
    pub fn is_duplicate(&self, fp: Fingerprint) -> bool {
        self.index.is_duplicate(fp)
    }

    pub fn store(&self, fp: Fingerprint) {
        self.index.store(fp);
    }

    /// Atomic query-then-store. Returns whether `fp` was a near-duplicate of
    /// something stored earlier.
    pub fn check_and_store(&self, fp: Fingerprint) -> bool {
        self.index.check_and_store(fp)
    }

    /// Tokenize, fingerprint, check and store one document.
    pub fn process_text(&self, text: &str) -> Result<Verdict, EngineError> {
        let doc = canonicalize(text, &self.canonical)?;
        let fingerprint = self.simhasher.fingerprint(doc.tokens.as_slice());
        let duplicate = self.index.check_and_store(fingerprint);
        tracing::debug!(
            fingerprint = %fingerprint,
            tokens = doc.tokens.len(),
            duplicate,
            "processed document"
        );
        Ok(Verdict {
            fingerprint,
            duplicate,
            token_count: doc.tokens.len(),
        })
    }

    pub fn index(&self) -> &SimhashIndex {
        &self.index
    }

    pub fn canonical_config(&self) -> &CanonicalizeConfig {
        &self.canonical
    }

    pub fn simhash_config(&self) -> &SimhashConfig {
        self.simhasher.config()
    }
}
