//! Canonical text layer for simhash deduplication.
//!
//! Turns raw document text into the token stream the fingerprinting stage
//! consumes.
//!
//! ## What we do
//!
//! - Unicode normalization (NFKC by default, configurable)
//! - Lowercasing
//! - Word segmentation on Unicode word boundaries, dropping punctuation and
//!   whitespace runs
//! - Byte offsets for every token in the canonical text
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock calls, no OS/locale dependence. Same text and config
//! give the same token stream on any machine.
//!
//! Han text has no spaces between words, so runs of ideographs are split
//! with the jieba dictionary segmenter in search mode. Other scripts follow
//! the Unicode word-boundary rules.

mod config;
mod document;
mod error;
mod pipeline;
mod segment;
mod token;

pub use crate::config::CanonicalizeConfig;
pub use crate::document::CanonicalizedDocument;
pub use crate::error::CanonicalError;
pub use crate::pipeline::canonicalize;
pub use crate::token::Token;
