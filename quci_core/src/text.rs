//! `text`：候选键生成的文本原语。
//!
//! 流水线：修复换行断词 -> 切词 -> 组合短语候选（`link_words`）。
//! 另含两类独立工具：
//! - 标识符拆分（camelCase / `#-._` 复合词的大小写/分段展开）
//! - 释义内交叉引用标记提取（`<→...>` 与 `＝...`）

use crate::rule::{BaseFormProvider, PhraseRuleProvider};

/// 候选词的缺省合法 token 字符：可打印 ASCII（含连字符/下划线）。
/// 区域包可以用带 `_with` 后缀的变体注入更宽的字母表。
pub fn is_valid_char(ch: char) -> bool {
    ('\u{21}'..='\u{7e}').contains(&ch)
}

/// 修复换行断词：
///
/// - `aaa-bbb` -> `aaa-bbb`（紧跟合法字符，真复合词，保留连字符）
/// - `aaa-\nbbb` -> `aaabbb`（连字符与下一个合法字符之间是断行噪声，全部剔除）
/// - `aaa-%&*bbb` -> `aaabbb`
///
/// 不换行连字符（U+2011）先归一化为普通连字符。
pub fn repair_hyphenation(source: &str) -> String {
    repair_hyphenation_with(source, is_valid_char)
}

/// 同 `repair_hyphenation`，但用调用方给定的合法字符判定。
pub fn repair_hyphenation_with(source: &str, is_valid: fn(char) -> bool) -> String {
    let chars: Vec<char> = source
        .chars()
        .map(|c| if c == '\u{2011}' { '-' } else { c })
        .collect();
    let mut result = String::new();
    let mut i = 0usize;

    loop {
        if i >= chars.len() {
            break;
        }
        let Some(hyphen) = chars[i..].iter().position(|&c| c == '-').map(|p| p + i) else {
            result.extend(&chars[i..]);
            break;
        };
        if hyphen == chars.len() - 1 {
            result.extend(&chars[i..]);
            break;
        }

        result.extend(&chars[i..hyphen]);
        let mut found = false;
        for j in (hyphen + 1)..chars.len() {
            if is_valid(chars[j]) {
                if j == hyphen + 1 {
                    // 紧跟在连字符之后：真复合词
                    result.push('-');
                }
                i = j;
                found = true;
                break;
            }
        }
        if !found {
            // 连字符之后再无合法字符：在连字符处截断
            i = chars.len();
        }
    }
    result
}

/// 切词：提取合法 token 字符的极大连续段。
///
/// `American English` / `American.English` 切成两个词，
/// `American-English` / `American_English` 保持一个词
/// （连字符/下划线本身就在合法范围内）。
pub fn tokenize(s: &str) -> Vec<String> {
    tokenize_with(s, is_valid_char)
}

/// 同 `tokenize`，但用调用方给定的合法字符判定。
pub fn tokenize_with(s: &str, is_valid: fn(char) -> bool) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    for ch in s.chars() {
        if is_valid(ch) {
            current.push(ch);
        } else if !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// 标识符拆分：按 `# - . _` 与“小写->大写”转折切段，
/// 每段自身及其小写形式（若不同）都输出，段长须达到 `min_word_length`。
///
/// `camelCase` -> `["camel", "Case", "case"]`
/// `Material-UI` -> `["Material", "material", "UI", "ui"]`
pub fn split_identifier(s: &str, min_word_length: usize) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut prev_is_capital = true;

    for i in 0..chars.len() {
        let ch = chars[i];
        let is_capital = ch.is_ascii_uppercase();
        let mut word: Option<String> = None;
        if matches!(ch, '#' | '-' | '.' | '_') {
            word = Some(chars[start..i].iter().collect());
            start = i + 1;
            prev_is_capital = false;
        } else if is_capital && !prev_is_capital && start != i {
            word = Some(chars[start..i].iter().collect());
            start = i;
            prev_is_capital = false;
        } else {
            prev_is_capital = is_capital;
        }
        if let Some(w) = word {
            if !w.is_empty() && w.chars().count() >= min_word_length {
                push_with_lowered(&mut out, &w);
            }
        }
    }
    if start > 0 {
        let last: String = chars[start..].iter().collect();
        if !last.is_empty() {
            push_with_lowered(&mut out, &last);
        }
    }
    out
}

fn push_with_lowered(out: &mut Vec<String>, word: &str) {
    out.push(word.to_string());
    let lowered = word.to_lowercase();
    if lowered != word {
        out.push(lowered);
    }
}

/// 尾缀替换：`str` 以 `search` 结尾时替换为 `new`。
pub fn replace_trailing(s: &str, search: &str, new: &str) -> Option<String> {
    s.strip_suffix(search).map(|stem| format!("{stem}{new}"))
}

/// 按规则组做尾缀替换：每组取第一条命中且结果长度达到
/// `min_length` 的规则，各组的产出依次收集。
pub fn try_trailing_rules(s: &str, groups: &[&[(&str, &str)]], min_length: usize) -> Vec<String> {
    let mut words = Vec::new();
    for group in groups {
        for (search, new) in *group {
            if let Some(w) = replace_trailing(s, search, new) {
                if w.chars().count() >= min_length {
                    words.push(w);
                    break;
                }
            }
        }
    }
    words
}

/// 组合短语候选。
///
/// 1. 首词自身与其词形还原备选各自开一条分支
/// 2. 每条分支内，对长度 >= `min_phrase_len` 的每个前缀做空格连接；
///    开启短语改写时同时收集改写变体
/// 3. 分支内直接连接按“最长短语优先”输出；全部分支的改写变体
///    按构造顺序统一追加在末尾
pub fn link_words(
    words: &[String],
    min_phrase_len: usize,
    enable_phrasing: bool,
    base: &dyn BaseFormProvider,
    phrase: &dyn PhraseRuleProvider,
) -> Vec<String> {
    if words.is_empty() {
        return Vec::new();
    }
    let mut branches: Vec<Vec<String>> = vec![vec![words[0].clone()]];
    for alt in base.base_forms_of(&words[0]) {
        branches.push(vec![alt]);
    }

    let rest = &words[1..];
    let mut direct = Vec::new();
    let mut phrased = Vec::new();
    for mut branch in branches {
        branch.extend_from_slice(rest);
        let (mut linked, mut processed) =
            make_linked_words(&branch, min_phrase_len, enable_phrasing, phrase);
        linked.reverse();
        direct.append(&mut linked);
        phrased.append(&mut processed);
    }
    direct.append(&mut phrased);
    direct
}

fn make_linked_words(
    words: &[String],
    min_phrase_len: usize,
    enable_phrasing: bool,
    phrase: &dyn PhraseRuleProvider,
) -> (Vec<String>, Vec<String>) {
    let min = min_phrase_len.max(1);
    let mut linked = Vec::new();
    let mut processed = Vec::new();
    for i in 0..words.len() {
        if i + 1 < min {
            continue;
        }
        let prefix = &words[..=i];
        linked.push(prefix.join(" "));
        if enable_phrasing {
            for variant in phrase.phrase_variants_of(prefix) {
                processed.push(variant.join(" "));
            }
        }
    }
    (linked, processed)
}

/// 提取释义文本内嵌的交叉引用词头。
///
/// 两种标记，可任意重复出现：
/// - `<→...>`：尖括号内的文本（去首尾空白）；未闭合的开标记跳过，
///   扫描继续
/// - `＝...`：全角等号后的 ASCII 字母/数字/空格极大连续段
///   （去空白后为空则丢弃）
pub fn extract_ref_patterns(input: &str) -> Vec<String> {
    let chars: Vec<char> = input.chars().collect();
    let mut results = Vec::new();
    let mut i = 0usize;

    while i < chars.len() {
        if chars[i] == '<' && chars.get(i + 1) == Some(&'→') {
            let start = i + 2;
            if let Some(rel) = chars[start..].iter().position(|&c| c == '>') {
                let end = start + rel;
                let w: String = chars[start..end].iter().collect();
                results.push(w.trim().to_string());
                i = end + 1;
                continue;
            }
        }

        if chars[i] == '＝' {
            let start = i + 1;
            let mut end = start;
            while end < chars.len() {
                let ch = chars[end];
                if ch.is_ascii_alphanumeric() || ch == ' ' {
                    end += 1;
                } else {
                    break;
                }
            }
            let w: String = chars[start..end].iter().collect();
            let w = w.trim();
            if !w.is_empty() {
                results.push(w.to_string());
            }
            i = end;
            continue;
        }

        i += 1;
    }
    results
}
