//! `cache`：小容量结果缓存（组合键 -> 渲染结果 + 命中数）。
//!
//! 淘汰策略：按插入顺序（FIFO）。容量 0 表示整体停用
//! （`get` 恒 miss、`put` 无操作），调试构建用它保证行为确定。

use std::collections::{HashMap, VecDeque};

use crate::model::CacheEntry;

/// 有界 FIFO 缓存。
pub struct ShortCache<C> {
    capacity: usize,
    order: VecDeque<String>,
    entries: HashMap<String, CacheEntry<C>>,
}

impl<C> ShortCache<C> {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            order: VecDeque::with_capacity(capacity),
            entries: HashMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, key: &str) -> Option<&CacheEntry<C>> {
        self.entries.get(key)
    }

    /// 写入/更新条目；已存在的键原位刷新值，不改变其淘汰顺位。
    pub fn put(&mut self, key: &str, content: C, hit_count: usize) {
        if self.capacity == 0 {
            return;
        }
        let entry = CacheEntry { content, hit_count };
        if let Some(existing) = self.entries.get_mut(key) {
            *existing = entry;
            return;
        }
        if self.order.len() >= self.capacity {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.to_string());
        self.entries.insert(key.to_string(), entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let mut cache = ShortCache::new(4);
        cache.put("k", "content", 3);
        let e = cache.get("k").unwrap();
        assert_eq!(e.content, "content");
        assert_eq!(e.hit_count, 3);
        assert!(cache.get("other").is_none());
    }

    #[test]
    fn evicts_in_insertion_order() {
        let mut cache = ShortCache::new(2);
        cache.put("a", 1, 0);
        cache.put("b", 2, 0);
        cache.put("c", 3, 0);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
        assert!(cache.get("c").is_some());
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn refresh_does_not_grow_or_reorder() {
        let mut cache = ShortCache::new(2);
        cache.put("a", 1, 0);
        cache.put("b", 2, 0);
        cache.put("a", 10, 1);
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("a").unwrap().content, 10);
        // "a" 仍是最老条目
        cache.put("c", 3, 0);
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn capacity_zero_disables_everything() {
        let mut cache = ShortCache::new(0);
        cache.put("a", 1, 0);
        assert!(cache.get("a").is_none());
        assert!(cache.is_empty());
    }
}
