//! 拉丁文字符分类与语言检测。
//!
//! 约定：
//! - `LatinClassifier` 是面向拉丁文阅读场景调校过的分类表：
//!   字母/数字双向延伸，空格只向右延伸（窗口从悬停词起始、
//!   向右吃进后续词），连字符与撇号双向延伸，其余标点是边界
//! - `detect_language` 整串判定，纯 ASCII 样文本归英文；
//!   仅多出瑞典文重音字母（Ä Å É Ö 及其小写）的归瑞典文；
//!   其余归宽字符路径。`detect_script` 是它到书写系统的投影

use quci_core::classifier::CharClassifier;
use quci_core::model::ScriptKind;
use quci_core::model::char_class;

/// 英文调校的字符分类器。
#[derive(Debug, Clone, Copy, Default)]
pub struct LatinClassifier;

impl CharClassifier for LatinClassifier {
    fn classify(&self, code: u32) -> u8 {
        match code {
            // 空格：只向右延伸，起点落在悬停词的开头
            0x20 => char_class::EXTEND_RIGHT,
            // 撇号、连字符（含不折行连字符）：词内字符
            0x27 | 0x2d | 0x2011 => char_class::EXTEND_BOTH,
            // ASCII 字母与数字
            0x30..=0x39 | 0x41..=0x5a | 0x61..=0x7a => char_class::EXTEND_BOTH,
            // Latin-1 增补字母区
            0xc0..=0xff => char_class::EXTEND_BOTH,
            _ => char_class::BOUNDARY,
        }
    }

    fn is_single_byte(&self, code: u32) -> bool {
        (0x20..=0x7e).contains(&code) || (0xa0..=0xff).contains(&code)
    }
}

/// 检测到的目标语言：决定候选生成走哪条流水线。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Svenska,
    Wide,
}

fn is_english_like(code: u32) -> bool {
    (0x20..=0x7e).contains(&code) || code == 0x2011 || code == 0x200c
}

fn is_svenska_like(code: u32) -> bool {
    is_english_like(code)
        || matches!(
            code,
            0xc4 // Ä
            | 0xc5 // Å
            | 0xc9 // É
            | 0xd6 // Ö
            | 0xe4 // ä
            | 0xe5 // å
            | 0xe9 // é
            | 0xf6 // ö
        )
}

/// 整串语言检测：空串按英文处理。
pub fn detect_language(text: &str) -> Language {
    if text.chars().all(|ch| is_english_like(ch as u32)) {
        return Language::English;
    }
    if text.chars().all(|ch| is_svenska_like(ch as u32)) {
        return Language::Svenska;
    }
    Language::Wide
}

/// 瑞典文候选的合法 token 字符：缺省字母表加上重音字母。
pub fn is_svensk_token_char(ch: char) -> bool {
    quci_core::text::is_valid_char(ch)
        || matches!(ch, 'Ä' | 'Å' | 'É' | 'Ö' | 'ä' | 'å' | 'é' | 'ö')
}

/// 整串书写系统检测：`detect_language` 到书写系统的投影。
pub fn detect_script(text: &str) -> ScriptKind {
    match detect_language(text) {
        Language::English | Language::Svenska => ScriptKind::SingleByte,
        Language::Wide => ScriptKind::Wide,
    }
}
