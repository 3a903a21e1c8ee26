//! Dictionary segmentation for Han text.
//!
//! Unicode word boundaries split ideographic text into single characters.
//! Runs of Han characters are handed to jieba in search mode instead, which
//! emits dictionary words plus the shorter words nested inside long ones.

use std::sync::OnceLock;

use jieba_rs::Jieba;

fn jieba() -> &'static Jieba {
    // Loading the bundled dictionary is expensive; it is read-only afterwards.
    static JIEBA: OnceLock<Jieba> = OnceLock::new();
    JIEBA.get_or_init(Jieba::new)
}

/// Search-mode words of a run of Han characters.
pub(crate) fn cut_han_run(run: &str) -> Vec<&str> {
    jieba().cut_for_search(run, true)
}

/// True when every character of `segment` is a CJK ideograph.
pub(crate) fn is_han_segment(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(is_han)
}

fn is_han(ch: char) -> bool {
    matches!(
        ch,
        '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2FA1F}'
            | '\u{30000}'..='\u{3134F}'
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn han_detection() {
        assert!(is_han_segment("世"));
        assert!(is_han_segment("世界"));
        assert!(!is_han_segment(""));
        assert!(!is_han_segment("，"));
        assert!(!is_han_segment("a世"));
        assert!(!is_han_segment("ひ"));
    }

    #[test]
    fn search_mode_keeps_nested_words() {
        let words = cut_han_run("京都大学");
        assert!(words.contains(&"京都大学"));
        assert!(words.contains(&"京都"));
        assert!(words.contains(&"大学"));
    }
}
