//! `window`：取词窗口提取（光标位置 -> 有界文本窗口）。
//!
//! 两条路径：
//! - 单字节文字：以光标为中心做双向边界扫描，前向扫描受 `max_words`
//!   空格数限制（连续空格只计一次）
//! - 宽字符文字：不做后向扫描，从光标起取 `wide_limit` 个字符定长窗口；
//!   注入分词器时把起点对齐到最近的 token 起始，并在起点早于光标时
//!   额外携带从光标精确起始的 `sub_text`
//!
//! 偏移量一律按 `char` 计数。

use crate::classifier::CharClassifier;
use crate::model::char_class::{EXTEND_LEFT, EXTEND_RIGHT};
use crate::model::{ScriptKind, TextWindow};
use crate::rule::TokenBoundaryResolver;

/// 窗口提取器。
pub struct WindowExtractor<C> {
    classifier: C,
    /// 前向扫描最多跨越多少个词间隔
    max_words: usize,
    /// 宽字符窗口的定长上限（字符数）
    wide_limit: usize,
}

impl<C> WindowExtractor<C>
where
    C: CharClassifier,
{
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            max_words: 8,
            wide_limit: 40,
        }
    }

    /// 设置前向扫描的词数上限；0 会回退到 1。
    pub fn max_words(mut self, n: usize) -> Self {
        self.max_words = n.max(1);
        self
    }

    /// 设置宽字符窗口长度；0 会回退到 1。
    pub fn wide_limit(mut self, n: usize) -> Self {
        self.wide_limit = n.max(1);
        self
    }

    /// 从 `buffer` 的 `offset`（char 偏移）处提取窗口。
    ///
    /// 空缓冲区或越界偏移返回 `None`。
    pub fn extract(
        &self,
        buffer: &str,
        offset: usize,
        resolver: Option<&dyn TokenBoundaryResolver>,
    ) -> Option<TextWindow> {
        let chars: Vec<char> = buffer.chars().collect();
        let ch = *chars.get(offset)?;

        if self.classifier.is_single_byte(u32::from(ch)) {
            let start = search_start_index(&chars, offset, &self.classifier);
            let end = search_end_index(&chars, offset, self.max_words, &self.classifier);
            return Some(TextWindow {
                text: chars[start..end].iter().collect(),
                sub_text: None,
                script: ScriptKind::SingleByte,
                truncated_at_end: end >= chars.len(),
            });
        }

        let end = (offset + self.wide_limit).min(chars.len());
        let proper_start = match resolver.and_then(|r| r.tokens(buffer)) {
            Some(tokens) => token_aligned_start(&tokens, offset + 1),
            None => offset,
        };
        let sub_text = (proper_start != offset).then(|| chars[offset..end].iter().collect());
        Some(TextWindow {
            text: chars[proper_start..end].iter().collect(),
            sub_text,
            script: ScriptKind::Wide,
            truncated_at_end: offset + self.wide_limit >= chars.len(),
        })
    }

    /// 把外部提供的后续文本拼到窗口尾部并重新截断。
    ///
    /// - 单字节：除非后续以 `-` 开头（换行断词续接），否则補一个空格；
    ///   拼接后从 0 重新做前向边界扫描
    /// - 宽字符：直接拼接后硬截断到 `wide_limit`
    pub fn concat_following(&self, text: &str, following: &str, script: ScriptKind) -> String {
        if following.is_empty() {
            return text.to_owned();
        }
        match script {
            ScriptKind::SingleByte => {
                let joined = if following.starts_with('-') {
                    format!("{text}{following}")
                } else {
                    format!("{text} {following}")
                };
                let chars: Vec<char> = joined.chars().collect();
                let end = search_end_index(&chars, 0, self.max_words, &self.classifier);
                chars[..end].iter().collect()
            }
            ScriptKind::Wide => {
                let joined = format!("{text}{following}");
                joined.chars().take(self.wide_limit).collect()
            }
        }
    }
}

/// 后向扫描：从 `offset` 向左，遇到第一个不可左延伸的字符停下，
/// 返回其后继位置（含边界裁剪）。
fn search_start_index(chars: &[char], offset: usize, classifier: &dyn CharClassifier) -> usize {
    let mut i = offset;
    loop {
        if classifier.classify(u32::from(chars[i])) & EXTEND_LEFT == 0 {
            return i + 1;
        }
        if i == 0 {
            return 0;
        }
        i -= 1;
    }
}

/// 前向扫描：从 `offset + 1` 向右，遇到不可右延伸的字符、或词间隔
/// 达到 `max_words` 时停下。连续空格只计一个间隔。
fn search_end_index(
    chars: &[char],
    offset: usize,
    max_words: usize,
    classifier: &dyn CharClassifier,
) -> usize {
    let mut i = offset + 1;
    let mut space_count = 0usize;
    let mut last_was_space = false;
    loop {
        if i >= chars.len() {
            return chars.len();
        }
        let ch = chars[i];
        if ch == ' ' {
            if !last_was_space {
                space_count += 1;
            }
            last_was_space = true;
            if space_count >= max_words {
                return i;
            }
        } else {
            if classifier.classify(u32::from(ch)) & EXTEND_RIGHT == 0 {
                return i;
            }
            last_was_space = false;
        }
        i += 1;
    }
}

/// 在 token 序列中找 `cursor`（1 基的“至多到此”的位置）之前最近的
/// token 起点；找不到时回到 0。
fn token_aligned_start(tokens: &[String], cursor: usize) -> usize {
    let mut current = 0usize;
    for token in tokens {
        let len = token.chars().count();
        if cursor <= current + len {
            return current;
        }
        current += len;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::DefaultClassifier;

    struct FixedTokens(Vec<&'static str>);

    impl TokenBoundaryResolver for FixedTokens {
        fn tokens(&self, _text: &str) -> Option<Vec<String>> {
            Some(self.0.iter().map(|s| (*s).to_string()).collect())
        }
    }

    struct NoTokens;

    impl TokenBoundaryResolver for NoTokens {
        fn tokens(&self, _text: &str) -> Option<Vec<String>> {
            None
        }
    }

    fn extractor() -> WindowExtractor<DefaultClassifier> {
        WindowExtractor::new(DefaultClassifier)
    }

    #[test]
    fn window_contains_the_cursor_position() {
        let w = extractor().extract("foo bar baz", 5, None).unwrap();
        assert_eq!(w.text, "foo bar baz");
        assert_eq!(w.script, ScriptKind::SingleByte);
        assert!(w.truncated_at_end);
    }

    #[test]
    fn backward_scan_stops_at_boundary_character() {
        // 换行是硬边界，窗口从其后继开始
        let w = extractor().extract("aaa\nbbb ccc", 5, None).unwrap();
        assert_eq!(w.text, "bbb ccc");
    }

    #[test]
    fn forward_scan_stops_at_boundary_character() {
        let w = extractor().extract("aaa bbb\nccc", 1, None).unwrap();
        assert_eq!(w.text, "aaa bbb");
        assert!(!w.truncated_at_end);
    }

    #[test]
    fn forward_scan_honors_max_words() {
        let w = extractor()
            .max_words(2)
            .extract("one two three four five", 0, None)
            .unwrap();
        assert_eq!(w.text, "one two");
        assert!(!w.truncated_at_end);
    }

    #[test]
    fn consecutive_spaces_count_as_one_separation() {
        let w = extractor()
            .max_words(2)
            .extract("one  two  three", 0, None)
            .unwrap();
        assert_eq!(w.text, "one  two");
    }

    #[test]
    fn empty_buffer_and_out_of_range_offset_yield_none() {
        assert!(extractor().extract("", 0, None).is_none());
        assert!(extractor().extract("abc", 3, None).is_none());
    }

    #[test]
    fn wide_script_skips_backward_scan() {
        let w = extractor().extract("漢字窗口測試", 2, None).unwrap();
        assert_eq!(w.text, "窗口測試");
        assert_eq!(w.script, ScriptKind::Wide);
        assert!(w.sub_text.is_none());
    }

    #[test]
    fn wide_script_is_hard_truncated() {
        let text: String = std::iter::repeat('字').take(60).collect();
        let w = extractor().extract(&text, 0, None).unwrap();
        assert_eq!(w.text.chars().count(), 40);
        assert!(!w.truncated_at_end);
    }

    #[test]
    fn wide_truncation_flag_set_at_buffer_end() {
        let w = extractor().extract("漢字", 1, None).unwrap();
        assert!(w.truncated_at_end);
    }

    #[test]
    fn resolver_aligns_start_and_adds_sub_window() {
        // tokens: [漢字][窗口] 光标落在 "字"（offset 1），token 起点为 0
        let resolver = FixedTokens(vec!["漢字", "窗口"]);
        let w = extractor().extract("漢字窗口", 1, Some(&resolver)).unwrap();
        assert_eq!(w.text, "漢字窗口");
        assert_eq!(w.sub_text.as_deref(), Some("字窗口"));
    }

    #[test]
    fn resolver_at_token_start_has_no_sub_window() {
        let resolver = FixedTokens(vec!["漢字", "窗口"]);
        let w = extractor().extract("漢字窗口", 2, Some(&resolver)).unwrap();
        assert_eq!(w.text, "窗口");
        assert!(w.sub_text.is_none());
    }

    #[test]
    fn absent_resolver_capability_starts_at_cursor() {
        // 分词器返回 None 与压根未注入等价
        let w = extractor().extract("漢字窗口", 1, Some(&NoTokens)).unwrap();
        assert_eq!(w.text, "字窗口");
        assert!(w.sub_text.is_none());
    }

    #[test]
    fn concat_following_joins_latin_with_space() {
        let e = extractor();
        let out = e.concat_following("tail", "more text", ScriptKind::SingleByte);
        assert_eq!(out, "tail more text");
    }

    #[test]
    fn concat_following_joins_hyphen_continuation_directly() {
        let e = extractor();
        let out = e.concat_following("con", "-tinued here", ScriptKind::SingleByte);
        assert_eq!(out, "con-tinued here");
    }

    #[test]
    fn concat_following_retruncates_latin() {
        let e = extractor().max_words(2);
        let out = e.concat_following("one", "two three four", ScriptKind::SingleByte);
        assert_eq!(out, "one two");
    }

    #[test]
    fn concat_following_wide_is_direct_and_capped() {
        let e = extractor().wide_limit(4);
        let out = e.concat_following("漢字", "窗口測試", ScriptKind::Wide);
        assert_eq!(out, "漢字窗口");
    }
}
