//! Output of the canonical text pipeline.

use serde::{Deserialize, Serialize};

use crate::token::Token;

/// The canonical representation of a text document.
///
/// `canonical_text` is the token texts joined by single ASCII spaces, and
/// every [`Token`] carries byte offsets into it.
///
/// ```rust
/// use canonical::{canonicalize, CanonicalizeConfig};
///
/// let doc = canonicalize("Hello, world!", &CanonicalizeConfig::default()).unwrap();
/// assert_eq!(doc.canonical_text, "hello world");
/// assert_eq!(doc.tokens.len(), 2);
/// assert_eq!(&doc.canonical_text[doc.tokens[1].start..doc.tokens[1].end], "world");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CanonicalizedDocument {
    /// Normalized text, tokens separated by single spaces.
    pub canonical_text: String,
    /// Token stream with UTF-8 byte offsets into `canonical_text`.
    pub tokens: Vec<Token>,
    /// Tokenizer config version used to produce this document.
    pub canonical_version: u32,
}

impl CanonicalizedDocument {
    /// Token texts as string slices, in document order.
    pub fn token_texts(&self) -> Vec<&str> {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }

    /// True when the input produced no tokens at all.
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
