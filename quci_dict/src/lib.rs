//! TSV 词典存储。
//!
//! 格式（简化版）：
//!
//! - `headword<TAB>description`
//! - 允许 `#` 开头注释行与空行
//! - 同一词头重复出现时后者覆盖前者

use std::{collections::HashMap, fs, path::Path};

use quci_core::store::DescriptionStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DictError {
    #[error("无法读取词典文件: {0}")]
    Io(#[from] std::io::Error),
    #[error("TSV 第 {line} 行缺少 headword/description")]
    Parse { line: usize },
}

/// 内存 TSV 词典：词头到释义的精确匹配表。
#[derive(Debug)]
pub struct TsvStore {
    map: HashMap<String, String>,
}

impl TsvStore {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DictError> {
        let s = fs::read_to_string(path)?;
        Self::from_tsv_str(&s)
    }

    pub fn from_tsv_str(s: &str) -> Result<Self, DictError> {
        let mut map = HashMap::new();
        for (idx, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((head, desc)) = line.split_once('\t') else {
                return Err(DictError::Parse { line: idx + 1 });
            };
            let head = head.trim();
            let desc = desc.trim();
            if head.is_empty() || desc.is_empty() {
                return Err(DictError::Parse { line: idx + 1 });
            }
            map.insert(head.to_string(), desc.to_string());
        }
        log::info!("词典载入完成：{} 条", map.len());
        Ok(Self { map })
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl DescriptionStore for TsvStore {
    fn get_many(&self, keys: &[String]) -> HashMap<String, String> {
        keys.iter()
            .filter_map(|k| self.map.get(k).map(|v| (k.clone(), v.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_headword_and_description() {
        let store = TsvStore::from_tsv_str("apple\ta fruit\npear\tanother fruit\n").unwrap();
        assert_eq!(store.len(), 2);
        let found = store.get_many(&["apple".to_string()]);
        assert_eq!(found.get("apple").map(String::as_str), Some("a fruit"));
    }

    #[test]
    fn skips_comments_and_blank_lines() {
        let store = TsvStore::from_tsv_str("# 注释\n\napple\ta fruit\n").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn missing_keys_are_absent_from_the_result() {
        let store = TsvStore::from_tsv_str("apple\ta fruit\n").unwrap();
        let found = store.get_many(&["apple".to_string(), "pear".to_string()]);
        assert_eq!(found.len(), 1);
        assert!(!found.contains_key("pear"));
    }

    #[test]
    fn malformed_line_reports_its_number() {
        let err = TsvStore::from_tsv_str("apple\ta fruit\nbroken line\n").unwrap_err();
        match err {
            DictError::Parse { line } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicate_headwords_keep_the_last_description() {
        let store = TsvStore::from_tsv_str("apple\told\napple\tnew\n").unwrap();
        let found = store.get_many(&["apple".to_string()]);
        assert_eq!(found.get("apple").map(String::as_str), Some("new"));
    }

    #[test]
    fn descriptions_may_contain_further_tabs() {
        let store = TsvStore::from_tsv_str("apple\ta fruit\twith a tab\n").unwrap();
        let found = store.get_many(&["apple".to_string()]);
        assert_eq!(
            found.get("apple").map(String::as_str),
            Some("a fruit\twith a tab")
        );
    }
}
