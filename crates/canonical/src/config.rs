//! Configuration types for the canonical text pipeline.
//!
//! [`CanonicalizeConfig`] controls how raw document text is normalized and
//! segmented before it reaches the fingerprinting stage.
//!
//! # Versioning
//!
//! The `version` field tracks tokenizer behavior. Any change that can alter
//! the token stream for a given input (and therefore the simhash) must be
//! accompanied by a version bump so stored fingerprints stay comparable.
//!
//! # Examples
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::default();
//! assert_eq!(config.version, 1);
//! assert!(config.normalize_unicode);
//! assert!(config.strip_punctuation);
//! assert!(config.lowercase);
//! ```
//!
//! Keeping punctuation attached to words:
//!
//! ```rust
//! use canonical::CanonicalizeConfig;
//!
//! let config = CanonicalizeConfig::new().with_strip_punctuation(false);
//! assert!(!config.strip_punctuation);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CanonicalError;

/// Configuration for the canonical text pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizeConfig {
    /// Semantic version of the tokenizer behavior.
    ///
    /// Must be >= 1. Version 0 is reserved and rejected with
    /// [`CanonicalError::InvalidConfig`].
    pub version: u32,

    /// If true, apply Unicode NFKC normalization before segmentation.
    ///
    /// With normalization enabled, `"Caf\u{00E9}"` and `"Cafe\u{0301}"`
    /// produce the same token and therefore the same token hash.
    pub normalize_unicode: bool,

    /// If true, segment on Unicode word boundaries and drop every segment
    /// made only of punctuation or whitespace.
    ///
    /// When false, tokens are whitespace-delimited runs and punctuation stays
    /// attached to the surrounding word (`"world!"`).
    pub strip_punctuation: bool,

    /// If true, apply locale-free Unicode lowercasing.
    pub lowercase: bool,
}

impl CanonicalizeConfig {
    /// Create a configuration with the default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }

    pub fn with_normalize_unicode(mut self, normalize_unicode: bool) -> Self {
        self.normalize_unicode = normalize_unicode;
        self
    }

    pub fn with_strip_punctuation(mut self, strip_punctuation: bool) -> Self {
        self.strip_punctuation = strip_punctuation;
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), CanonicalError> {
        if self.version == 0 {
            return Err(CanonicalError::InvalidConfig(
                "config version must be >= 1".into(),
            ));
        }
        Ok(())
    }
}

impl Default for CanonicalizeConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            strip_punctuation: true,
            lowercase: true,
        }
    }
}
