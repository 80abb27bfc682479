//! 英文短语改写：把具体代词折叠成词典收录的形态。
//!
//! 两类改写：
//! - 动词短语内部的宾格代词整个去掉：`get him up` -> `get up`，
//!   只折叠第一个命中的内部代词
//! - 属格限定词换成词典的 `one's` 形态：`on my own` -> `on one's own`

use quci_core::rule::PhraseRuleProvider;

const OBJECT_PRONOUNS: &[&str] = &[
    "me", "you", "him", "her", "it", "us", "them", "myself", "yourself", "himself", "herself",
    "itself", "ourselves", "themselves", "oneself", "someone", "something",
];

const POSSESSIVES: &[&str] = &["my", "your", "his", "her", "its", "our", "their"];

/// 英文短语改写器。
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishPhraseRules;

impl PhraseRuleProvider for EnglishPhraseRules {
    fn phrase_variants_of(&self, words: &[String]) -> Vec<Vec<String>> {
        let mut variants = Vec::new();

        // 内部宾格代词折叠：首尾词保留，只看中间
        if words.len() >= 3 {
            for i in 1..words.len() - 1 {
                if OBJECT_PRONOUNS.contains(&words[i].as_str()) {
                    let mut collapsed = words.to_vec();
                    collapsed.remove(i);
                    variants.push(collapsed);
                    break;
                }
            }
        }

        // 属格限定词 -> one's
        if words.len() >= 2 {
            for i in 0..words.len() {
                if POSSESSIVES.contains(&words[i].as_str()) {
                    let mut replaced = words.to_vec();
                    replaced[i] = "one's".to_string();
                    variants.push(replaced);
                    break;
                }
            }
        }

        variants
    }
}
