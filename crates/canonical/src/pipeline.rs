use std::borrow::Cow;

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::CanonicalizeConfig;
use crate::document::CanonicalizedDocument;
use crate::error::CanonicalError;
use crate::segment::{cut_han_run, is_han_segment};
use crate::token::Token;

/// Main entry point. Takes raw document text and config and returns the
/// canonical token stream.
///
/// Input that contains no word characters is valid and yields a document
/// with zero tokens.
pub fn canonicalize(
    input: &str,
    cfg: &CanonicalizeConfig,
) -> Result<CanonicalizedDocument, CanonicalError> {
    cfg.validate()?;

    // Unicode normalization is the first step, as it can affect word boundaries.
    let normalized: Cow<str> = if cfg.normalize_unicode {
        Cow::Owned(input.nfkc().collect::<String>())
    } else {
        Cow::Borrowed(input)
    };

    // Lowercasing can expand a single character into multiple, so it runs
    // before segmentation and offsets are taken from the cased text.
    let cased: Cow<str> = if cfg.lowercase {
        Cow::Owned(normalized.to_lowercase())
    } else {
        normalized
    };

    let mut canonical_text = String::with_capacity(cased.len());
    let mut tokens: Vec<Token> = Vec::with_capacity((cased.len() / 4).saturating_add(1));

    if cfg.strip_punctuation {
        // Byte range of the Han run currently being collected.
        let mut han_run: Option<(usize, usize)> = None;
        for (offset, segment) in cased.split_word_bound_indices() {
            let end = offset + segment.len();
            if is_han_segment(segment) {
                han_run = Some(han_run.map_or((offset, end), |(start, _)| (start, end)));
                continue;
            }
            if let Some((start, run_end)) = han_run.take() {
                push_han_run(&cased[start..run_end], &mut canonical_text, &mut tokens);
            }
            if is_word_segment(segment) {
                push_token(segment, &mut canonical_text, &mut tokens);
            }
        }
        if let Some((start, run_end)) = han_run {
            push_han_run(&cased[start..run_end], &mut canonical_text, &mut tokens);
        }
    } else {
        for segment in cased.split_whitespace() {
            push_token(segment, &mut canonical_text, &mut tokens);
        }
    }

    Ok(CanonicalizedDocument {
        canonical_text,
        tokens,
        canonical_version: cfg.version,
    })
}

/// A word-bound segment is kept when it holds at least one character that is
/// neither whitespace nor punctuation. ASCII symbols such as `$`, `+` or `|`
/// count as punctuation here even though Unicode files them as symbols.
fn is_word_segment(segment: &str) -> bool {
    segment.chars().any(|ch| {
        !ch.is_whitespace() && !ch.is_punctuation() && !ch.is_ascii_punctuation()
    })
}

fn push_han_run(run: &str, canonical_text: &mut String, tokens: &mut Vec<Token>) {
    for word in cut_han_run(run) {
        push_token(word, canonical_text, tokens);
    }
}

fn push_token(segment: &str, canonical_text: &mut String, tokens: &mut Vec<Token>) {
    if !canonical_text.is_empty() {
        canonical_text.push(' ');
    }
    let start = canonical_text.len();
    canonical_text.push_str(segment);
    tokens.push(Token {
        text: segment.to_string(),
        start,
        end: canonical_text.len(),
    });
}
