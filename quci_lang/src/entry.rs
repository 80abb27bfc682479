//! 候选键生成：窗口文本到词典查询键序列。
//!
//! 逐语言一个生成器，按语言检测结果分派：
//! - 英文 / 瑞典文共用拉丁路径：断行连字修复 -> 切词 ->
//!   词形还原分支 + 短语连接，再补标识符拆分与大小写变体；
//!   两种语言各带自己的字母表与还原规则
//! - 宽字符：从窗口起点枚举前缀，最长优先
//!
//! 产出顺序即查询优先级：越靠前的候选越可能是用户想要的词头。

use quci_core::model::ScriptKind;
use quci_core::rule::{BaseFormProvider, NoRules, PhraseRuleProvider};
use quci_core::store::EntryBuilder;
use quci_core::text::{
    is_valid_char, link_words, repair_hyphenation_with, split_identifier, tokenize_with,
};

use crate::base::{EnglishBaseForms, SwedishBaseForms};
use crate::latin::{Language, detect_language, is_svensk_token_char};
use crate::phrase::EnglishPhraseRules;

/// 拉丁文候选键生成器。
pub struct LatinEntryBuilder<B, P> {
    base: B,
    phrase: P,
    min_phrase_len: usize,
    enable_phrasing: bool,
    min_word_length: usize,
    token_char: fn(char) -> bool,
}

impl<B, P> LatinEntryBuilder<B, P>
where
    B: BaseFormProvider,
    P: PhraseRuleProvider,
{
    pub fn new(base: B, phrase: P) -> Self {
        Self {
            base,
            phrase,
            min_phrase_len: 1,
            enable_phrasing: true,
            min_word_length: 2,
            token_char: is_valid_char,
        }
    }

    /// 注入语言自己的合法 token 字母表（切词与断词修复共用）。
    pub fn token_char(mut self, is_valid: fn(char) -> bool) -> Self {
        self.token_char = is_valid;
        self
    }

    /// 参与短语连接的最短前缀词数。
    pub fn min_phrase_len(mut self, n: usize) -> Self {
        self.min_phrase_len = n.max(1);
        self
    }

    /// 是否生成短语改写变体。
    pub fn enable_phrasing(mut self, on: bool) -> Self {
        self.enable_phrasing = on;
        self
    }

    fn build_latin(
        &self,
        text: &str,
        with_case_variants: bool,
        include_original: bool,
    ) -> Vec<String> {
        let repaired = repair_hyphenation_with(text, self.token_char);
        let words = tokenize_with(&repaired, self.token_char);
        let mut entries = link_words(
            &words,
            self.min_phrase_len,
            self.enable_phrasing,
            &self.base,
            &self.phrase,
        );

        // 首词形如标识符时补拆分段（camelCase、dotted.path 等）
        if let Some(first) = words.first() {
            if has_identifier_shape(first) {
                entries.extend(split_identifier(first, self.min_word_length));
            }
        }

        // 小写变体恒补；首字母大写变体按设置补
        let mut lowered: Vec<String> = Vec::new();
        for e in &entries {
            let low = e.to_lowercase();
            if low != *e {
                lowered.push(low);
            }
        }
        entries.extend(lowered);
        if with_case_variants {
            let mut capitalized: Vec<String> = Vec::new();
            for e in &entries {
                if let Some(c) = capitalize_first(e) {
                    capitalized.push(c);
                }
            }
            entries.extend(capitalized);
        }

        if include_original {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                entries.insert(0, trimmed.to_string());
            }
        }
        dedup_in_order(entries)
    }
}

impl<B, P> EntryBuilder for LatinEntryBuilder<B, P>
where
    B: BaseFormProvider,
    P: PhraseRuleProvider,
{
    fn build_entries(
        &self,
        text: &str,
        with_case_variants: bool,
        include_original: bool,
    ) -> (Vec<String>, ScriptKind) {
        (
            self.build_latin(text, with_case_variants, include_original),
            ScriptKind::SingleByte,
        )
    }
}

/// 宽字符候选键生成器：前缀枚举，最长优先。
pub struct WideEntryBuilder {
    max_len: usize,
}

impl Default for WideEntryBuilder {
    fn default() -> Self {
        Self { max_len: 12 }
    }
}

impl WideEntryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 前缀枚举的最大字符数。
    pub fn max_len(mut self, n: usize) -> Self {
        self.max_len = n.max(1);
        self
    }

    fn build_wide(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let limit = self.max_len.min(chars.len());
        let mut entries = Vec::with_capacity(limit);
        for len in (1..=limit).rev() {
            entries.push(chars[..len].iter().collect());
        }
        entries
    }
}

impl EntryBuilder for WideEntryBuilder {
    fn build_entries(
        &self,
        text: &str,
        _with_case_variants: bool,
        _include_original: bool,
    ) -> (Vec<String>, ScriptKind) {
        (self.build_wide(text), ScriptKind::Wide)
    }
}

/// 缺省生成器：按语言检测结果在英文/瑞典文/宽字符三条路径间分派
/// （逐语言一个生成器的查表结构）。
pub struct DefaultEntryBuilder {
    english: LatinEntryBuilder<EnglishBaseForms, EnglishPhraseRules>,
    svensk: LatinEntryBuilder<SwedishBaseForms, NoRules>,
    wide: WideEntryBuilder,
}

impl Default for DefaultEntryBuilder {
    fn default() -> Self {
        Self {
            english: LatinEntryBuilder::new(EnglishBaseForms, EnglishPhraseRules),
            svensk: LatinEntryBuilder::new(SwedishBaseForms, NoRules)
                .token_char(is_svensk_token_char),
            wide: WideEntryBuilder::default(),
        }
    }
}

impl DefaultEntryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min_phrase_len(mut self, n: usize) -> Self {
        self.english = self.english.min_phrase_len(n);
        self.svensk = self.svensk.min_phrase_len(n);
        self
    }

    pub fn enable_phrasing(mut self, on: bool) -> Self {
        self.english = self.english.enable_phrasing(on);
        self.svensk = self.svensk.enable_phrasing(on);
        self
    }

    pub fn wide_max_len(mut self, n: usize) -> Self {
        self.wide = self.wide.max_len(n);
        self
    }
}

impl EntryBuilder for DefaultEntryBuilder {
    fn build_entries(
        &self,
        text: &str,
        with_case_variants: bool,
        include_original: bool,
    ) -> (Vec<String>, ScriptKind) {
        match detect_language(text) {
            Language::English => (
                self.english
                    .build_latin(text, with_case_variants, include_original),
                ScriptKind::SingleByte,
            ),
            Language::Svenska => (
                self.svensk
                    .build_latin(text, with_case_variants, include_original),
                ScriptKind::SingleByte,
            ),
            Language::Wide => (self.wide.build_wide(text), ScriptKind::Wide),
        }
    }
}

fn has_identifier_shape(word: &str) -> bool {
    if word.chars().any(|c| matches!(c, '#' | '-' | '.' | '_')) {
        return true;
    }
    let mut prev_lower = false;
    for ch in word.chars() {
        if ch.is_ascii_uppercase() && prev_lower {
            return true;
        }
        prev_lower = ch.is_ascii_lowercase();
    }
    false
}

fn capitalize_first(s: &str) -> Option<String> {
    let mut chars = s.chars();
    let first = chars.next()?;
    if !first.is_ascii_lowercase() {
        return None;
    }
    let mut out = String::with_capacity(s.len());
    out.push(first.to_ascii_uppercase());
    out.push_str(chars.as_str());
    Some(out)
}

fn dedup_in_order(entries: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(entries.len());
    for e in entries {
        if !e.is_empty() && !out.contains(&e) {
            out.push(e);
        }
    }
    out
}
