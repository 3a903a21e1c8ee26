//! YAML configuration file support.
//!
//! All stage configurations (canonical, simhash, index) can be written in a
//! single YAML file and loaded at runtime. Every field is optional and falls
//! back to the library default.
//!
//! ## Example YAML Configuration
//!
//! ```yaml
//! version: "1.0"
//! name: "news-dedup"
//!
//! canonical:
//!   version: 1
//!   normalize_unicode: true
//!   lowercase: true
//!   strip_punctuation: true
//!
//! simhash:
//!   version: 1
//!   hasher: "murmur3"
//!   seed: 104729
//!   use_parallel: false
//!   parallel_threshold: 4096
//!
//! index:
//!   fraction_count: 4
//!   hamming_threshold: 3
//!   recall_policy: "reject"
//! ```

use std::fs;
use std::path::Path;

use canonical::CanonicalizeConfig;
use index::{DEFAULT_FRACTION_COUNT, DEFAULT_HAMMING_THRESHOLD, IndexConfig, RecallPolicy};
use serde::{Deserialize, Serialize};
use simhash::{HasherKind, SimhashConfig};
use thiserror::Error;

/// Errors that can occur when loading YAML configuration files
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("unsupported config version: {0}")]
    UnsupportedVersion(String),
}

/// Top-level YAML configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimdupConfig {
    /// Configuration format version
    pub version: String,

    /// Optional configuration name/description
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub canonical: CanonicalYamlConfig,

    #[serde(default)]
    pub simhash: SimhashYamlConfig,

    #[serde(default)]
    pub index: IndexYamlConfig,
}

impl SimdupConfig {
    /// Load a YAML configuration file from the given path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let content = fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse YAML configuration from a string
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        let config: SimdupConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigLoadError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        match self.version.as_str() {
            "1.0" | "1" => Ok(()),
            v => Err(ConfigLoadError::UnsupportedVersion(v.to_string())),
        }?;

        self.canonical.validate()?;
        self.simhash.validate()?;
        self.index.validate()?;

        Ok(())
    }

    pub fn canonical_config(&self) -> CanonicalizeConfig {
        self.canonical.to_config()
    }

    pub fn simhash_config(&self) -> SimhashConfig {
        self.simhash.to_config()
    }

    pub fn index_config(&self) -> IndexConfig {
        self.index.to_config()
    }
}

impl Default for SimdupConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            name: None,
            canonical: CanonicalYamlConfig::default(),
            simhash: SimhashYamlConfig::default(),
            index: IndexYamlConfig::default(),
        }
    }
}

/// Canonicalization stage YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "true_value")]
    pub normalize_unicode: bool,

    #[serde(default = "true_value")]
    pub lowercase: bool,

    #[serde(default = "true_value")]
    pub strip_punctuation: bool,
}

impl CanonicalYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        if self.version == 0 {
            return Err(ConfigLoadError::Validation(
                "canonical.version must be >= 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn to_config(&self) -> CanonicalizeConfig {
        CanonicalizeConfig {
            version: self.version,
            normalize_unicode: self.normalize_unicode,
            strip_punctuation: self.strip_punctuation,
            lowercase: self.lowercase,
        }
    }
}

impl Default for CanonicalYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            normalize_unicode: true,
            lowercase: true,
            strip_punctuation: true,
        }
    }
}

/// Simhash stage YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimhashYamlConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub hasher: HasherKind,

    #[serde(default)]
    pub seed: Option<u64>,

    #[serde(default)]
    pub use_parallel: bool,

    #[serde(default = "default_parallel_threshold")]
    pub parallel_threshold: usize,
}

impl SimhashYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("simhash: {err}")))
    }

    pub fn to_config(&self) -> SimhashConfig {
        SimhashConfig {
            version: self.version,
            hasher: self.hasher,
            seed: self.seed,
            use_parallel: self.use_parallel,
            parallel_threshold: self.parallel_threshold,
        }
    }
}

impl Default for SimhashYamlConfig {
    fn default() -> Self {
        Self {
            version: 1,
            hasher: HasherKind::Murmur3,
            seed: None,
            use_parallel: false,
            parallel_threshold: default_parallel_threshold(),
        }
    }
}

/// Index YAML configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexYamlConfig {
    #[serde(default = "default_fraction_count")]
    pub fraction_count: usize,

    #[serde(default = "default_hamming_threshold")]
    pub hamming_threshold: u32,

    #[serde(default)]
    pub recall_policy: RecallPolicy,
}

impl IndexYamlConfig {
    fn validate(&self) -> Result<(), ConfigLoadError> {
        self.to_config()
            .validate()
            .map_err(|err| ConfigLoadError::Validation(format!("index: {err}")))
    }

    pub fn to_config(&self) -> IndexConfig {
        IndexConfig {
            fraction_count: self.fraction_count,
            hamming_threshold: self.hamming_threshold,
            recall_policy: self.recall_policy,
        }
    }
}

impl Default for IndexYamlConfig {
    fn default() -> Self {
        Self {
            fraction_count: DEFAULT_FRACTION_COUNT,
            hamming_threshold: DEFAULT_HAMMING_THRESHOLD,
            recall_policy: RecallPolicy::Reject,
        }
    }
}

// Helper functions for serde defaults
fn default_version() -> u32 {
    1
}
fn true_value() -> bool {
    true
}
fn default_parallel_threshold() -> usize {
    4096
}
fn default_fraction_count() -> usize {
    DEFAULT_FRACTION_COUNT
}
fn default_hamming_threshold() -> u32 {
    DEFAULT_HAMMING_THRESHOLD
}
