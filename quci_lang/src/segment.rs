//! 宽字符文本的分词：按 Unicode 词边界切分。

use quci_core::rule::TokenBoundaryResolver;
use unicode_segmentation::UnicodeSegmentation;

/// UAX #29 词边界分词器。对任何文本都给出切分结果。
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeBoundary;

impl TokenBoundaryResolver for UnicodeBoundary {
    fn tokens(&self, text: &str) -> Option<Vec<String>> {
        Some(text.split_word_bounds().map(str::to_string).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_cover_the_whole_text() {
        let tokens = UnicodeBoundary.tokens("hello, world").unwrap();
        assert_eq!(tokens.concat(), "hello, world");
    }

    #[test]
    fn latin_words_split_at_spaces() {
        let tokens = UnicodeBoundary.tokens("wake up").unwrap();
        assert!(tokens.contains(&"wake".to_string()));
        assert!(tokens.contains(&"up".to_string()));
    }

    #[test]
    fn empty_text_yields_empty_tokens() {
        assert_eq!(UnicodeBoundary.tokens(""), Some(Vec::new()));
    }
}
