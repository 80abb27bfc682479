//! 词形还原：按语言一张纯尾缀替换的规则表。
//!
//! 约定：
//! - 规则按组组织，一组内命中第一条即止；各组独立产出，
//!   所以同一个词可以同时给出多个还原备选
//! - 还原是启发式的：`playing` 会同时产出 `play` 与 `playe`，
//!   查不到的备选在词典侧自然落空，不做词表校验

use quci_core::rule::BaseFormProvider;
use quci_core::text::try_trailing_rules;

/// 英文还原结果的最短字符数，再短就几乎全是噪音。
const MIN_BASE_LENGTH: usize = 3;

/// 瑞典文常见双字符词干（gå、stå、tro）要求更短的下限。
const MIN_SVENSK_LENGTH: usize = 2;

/// 双写辅音 + ing（running -> run）。
const DOUBLED_ING: &[(&str, &str)] = &[
    ("bbing", "b"),
    ("dding", "d"),
    ("gging", "g"),
    ("mming", "m"),
    ("nning", "n"),
    ("pping", "p"),
    ("rring", "r"),
    ("tting", "t"),
];

/// 双写辅音 + ed（stopped -> stop）。
const DOUBLED_ED: &[(&str, &str)] = &[
    ("bbed", "b"),
    ("dded", "d"),
    ("gged", "g"),
    ("mmed", "m"),
    ("nned", "n"),
    ("pped", "p"),
    ("rred", "r"),
    ("tted", "t"),
];

const RULE_GROUPS: &[&[(&str, &str)]] = &[
    DOUBLED_ING,
    &[("ying", "ie")],
    &[("ing", "e")],
    &[("ing", "")],
    DOUBLED_ED,
    &[("ied", "y")],
    &[("ed", "e")],
    &[("ed", "")],
    &[("ies", "y")],
    &[("ves", "f")],
    &[("ves", "fe")],
    &[("es", "")],
    &[("s", "")],
    &[("ier", "y")],
    &[("er", "e")],
    &[("er", "")],
    &[("iest", "y")],
    &[("est", "e")],
    &[("est", "")],
];

/// 瑞典文尾缀规则：复数/定式名词尾、动词现在时与过去时尾、
/// 形容词中性与复数尾。
const SVENSK_RULE_GROUPS: &[&[(&str, &str)]] = &[
    &[("orna", "a")],
    &[("arna", "e")],
    &[("arna", "")],
    &[("erna", "")],
    &[("ande", "a")],
    &[("ade", "a")],
    &[("at", "a")],
    &[("or", "a")],
    &[("ar", "e")],
    &[("ar", "")],
    &[("er", "a")],
    &[("er", "")],
    &[("en", "")],
    &[("et", "")],
    &[("n", "")],
    &[("t", "")],
    &[("a", "")],
    &[("r", "")],
];

/// 英文尾缀还原器。
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishBaseForms;

impl BaseFormProvider for EnglishBaseForms {
    fn base_forms_of(&self, word: &str) -> Vec<String> {
        dedup_forms(try_trailing_rules(word, RULE_GROUPS, MIN_BASE_LENGTH), word)
    }
}

/// 瑞典文尾缀还原器。
#[derive(Debug, Clone, Copy, Default)]
pub struct SwedishBaseForms;

impl BaseFormProvider for SwedishBaseForms {
    fn base_forms_of(&self, word: &str) -> Vec<String> {
        dedup_forms(
            try_trailing_rules(word, SVENSK_RULE_GROUPS, MIN_SVENSK_LENGTH),
            word,
        )
    }
}

fn dedup_forms(forms: Vec<String>, word: &str) -> Vec<String> {
    let mut seen = Vec::new();
    for f in forms {
        if f != word && !seen.contains(&f) {
            seen.push(f);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forms(word: &str) -> Vec<String> {
        EnglishBaseForms.base_forms_of(word)
    }

    #[test]
    fn doubled_consonant_ing_restores_the_stem() {
        assert!(forms("running").contains(&"run".to_string()));
        assert!(forms("stopping").contains(&"stop".to_string()));
    }

    #[test]
    fn silent_e_and_plain_ing_both_appear() {
        let f = forms("making");
        assert!(f.contains(&"make".to_string()));
        assert!(f.contains(&"mak".to_string()));
    }

    #[test]
    fn ies_becomes_y() {
        assert!(forms("studies").contains(&"study".to_string()));
        assert!(forms("studied").contains(&"study".to_string()));
    }

    #[test]
    fn plural_ves_covers_both_stems() {
        let f = forms("knives");
        assert!(f.contains(&"knif".to_string()));
        assert!(f.contains(&"knife".to_string()));
    }

    #[test]
    fn too_short_results_are_dropped() {
        // "is" 去掉 s 剩 "i"，低于最短长度
        assert!(!forms("is").contains(&"i".to_string()));
    }

    #[test]
    fn unrelated_words_produce_nothing_equal_to_input() {
        assert!(!forms("apple").contains(&"apple".to_string()));
    }

    fn svensk(word: &str) -> Vec<String> {
        SwedishBaseForms.base_forms_of(word)
    }

    #[test]
    fn svensk_plural_suffixes_restore_the_stem() {
        assert!(svensk("flickor").contains(&"flicka".to_string()));
        assert!(svensk("pojkar").contains(&"pojke".to_string()));
        assert!(svensk("bilar").contains(&"bil".to_string()));
    }

    #[test]
    fn svensk_definite_forms_restore_the_stem() {
        assert!(svensk("huset").contains(&"hus".to_string()));
        assert!(svensk("bilen").contains(&"bil".to_string()));
    }

    #[test]
    fn svensk_verb_endings_restore_the_infinitive() {
        assert!(svensk("pratade").contains(&"prata".to_string()));
        assert!(svensk("pratat").contains(&"prata".to_string()));
        assert!(svensk("läser").contains(&"läsa".to_string()));
    }

    #[test]
    fn svensk_short_stems_survive_the_length_floor() {
        assert!(svensk("går").contains(&"gå".to_string()));
    }
}
