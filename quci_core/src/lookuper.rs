//! `lookuper`：查词编排器。
//!
//! 一次查词的完整链路：
//! 截断输入 -> 组合键 -> `last_key`/缓存短路 -> 候选生成 ->
//! 存储取释义（含一跳交叉引用扩展）-> 渲染 -> 阈值判定 ->
//! 世代护卫 -> UI 回调 + 缓存写入。
//!
//! 并发护卫：宿主事件（悬停）可能高频到来并与选区/钉选交错，
//! `LookupState` 的标志位决定一次请求是否被受理；世代令牌保证
//! 乱序完成的旧流水线不会覆盖新结果。

use std::collections::HashMap;

use crate::cache::ShortCache;
use crate::model::{LookupState, ScriptKind};
use crate::store::{
    ContentGenerator, ContentSink, DescriptionStore, EntryBuilder, NoSelection, SelectionProbe,
};
use crate::text::extract_ref_patterns;

/// 单条输入文本的最大长度（字符数）。
const TEXT_LENGTH_LIMIT: usize = 128;

/// 组合键分隔符：正常文本中不会出现的控制码。
const KEY_SEPARATOR: char = '\u{0001}';

/// 世代令牌：每条流水线起始时领取，完成时凭令牌申请落地。
///
/// 只有不低于“已落地最高令牌”的完成才允许更新 UI/缓存；
/// 更旧的完成被丢弃。
#[derive(Debug, Default)]
pub struct Generation {
    issued: u64,
    applied: u64,
}

impl Generation {
    /// 开启新流水线，领取单调递增令牌。
    pub fn begin(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// 凭令牌申请落地；过期令牌返回 false。
    pub fn try_apply(&mut self, token: u64) -> bool {
        if token < self.applied {
            return false;
        }
        self.applied = token;
        true
    }
}

/// 查词编排器。
///
/// 泛型参数沿用能力接口：`S` 是释义存储，`G` 是渲染生成器；
/// 候选生成 / UI 回调 / 选区探测以 trait object 注入。
pub struct Lookuper<S, G>
where
    G: ContentGenerator,
{
    store: S,
    generator: G,
    builder: Box<dyn EntryBuilder>,
    sink: Box<dyn ContentSink<G::Content>>,
    selection: Box<dyn SelectionProbe>,
    cache: ShortCache<G::Content>,
    state: LookupState,
    generation: Generation,
    /// 悬停查词是否附带首字母大写变体（来自用户设置）
    with_capitalized: bool,
}

impl<S, G> Lookuper<S, G>
where
    S: DescriptionStore,
    G: ContentGenerator,
{
    pub fn new(
        store: S,
        generator: G,
        builder: Box<dyn EntryBuilder>,
        sink: Box<dyn ContentSink<G::Content>>,
    ) -> Self {
        Self {
            store,
            generator,
            builder,
            sink,
            selection: Box::new(NoSelection),
            cache: ShortCache::new(100),
            state: LookupState::default(),
            generation: Generation::default(),
            with_capitalized: false,
        }
    }

    /// 设置缓存容量（0 停用缓存）。
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache = ShortCache::new(capacity);
        self
    }

    /// 悬停查词是否附带大小写变体。
    pub fn with_capitalized(mut self, on: bool) -> Self {
        self.with_capitalized = on;
        self
    }

    /// 注入外部选区探测。
    pub fn selection_probe(mut self, probe: Box<dyn SelectionProbe>) -> Self {
        self.selection = probe;
        self
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn set_suspended(&mut self, on: bool) {
        self.state.suspended = on;
    }

    pub fn set_half_locked(&mut self, on: bool) {
        self.state.half_locked = on;
    }

    fn can_update(&self) -> bool {
        if self.state.suspended {
            return false;
        }
        if self.state.half_locked && self.state.aimed {
            return false;
        }
        if !self.state.half_locked && self.selection.selection_active() {
            return false;
        }
        true
    }

    /// 悬停查词（单窗口）。返回是否更新了 UI。
    pub fn lookup(&mut self, text: &str) -> bool {
        self.lookup_all(&[text.to_string()])
    }

    /// 悬停查词（主窗口 + 可选窄窗口）。
    pub fn lookup_all(&mut self, texts: &[String]) -> bool {
        if !self.can_update() {
            return false;
        }
        self.update_all(texts, self.with_capitalized, false, true, 0)
    }

    /// 钉选查词：锁定到给定文本；空文本解除钉选。
    ///
    /// 必须至少命中 1 条，否则静默忽略且不触碰已有 UI。
    pub fn aimed_lookup(&mut self, text: &str) -> bool {
        if text.is_empty() {
            self.state.aimed = false;
            return false;
        }
        if self.state.last_key.as_deref() == Some(text) {
            return false;
        }
        self.state.aimed = true;
        let updated = self.update(text, true, true, false, 1);
        if !updated {
            // 一条都没命中：钉选请求静默失效
            self.state.aimed = false;
        }
        updated
    }

    /// 定制参数的单文本查词。
    pub fn update(
        &mut self,
        text: &str,
        with_capitalized: bool,
        include_original: bool,
        allow_short_words: bool,
        threshold: usize,
    ) -> bool {
        if text.is_empty() {
            return false;
        }
        self.update_all(
            &[text.to_string()],
            with_capitalized,
            include_original,
            allow_short_words,
            threshold,
        )
    }

    fn update_all(
        &mut self,
        source_texts: &[String],
        with_capitalized: bool,
        include_original: bool,
        allow_short_words: bool,
        threshold: usize,
    ) -> bool {
        let texts: Vec<String> = source_texts
            .iter()
            .map(|t| t.chars().take(TEXT_LENGTH_LIMIT).collect::<String>())
            .filter(|t| !t.is_empty())
            .collect();
        if texts.is_empty() {
            return false;
        }
        let key: String = texts.join(&KEY_SEPARATOR.to_string());
        let token = self.generation.begin();

        if !include_original {
            if self.state.last_key.as_deref() == Some(&key) {
                return false;
            }
            if let Some(entry) = self.cache.get(&key) {
                let (content, hit_count) = (entry.content.clone(), entry.hit_count);
                if !self.generation.try_apply(token) {
                    return false;
                }
                log::debug!("cache hit: {key:?} ({hit_count} hits)");
                self.sink.update(&content, hit_count);
                self.state.last_key = Some(key);
                return true;
            }
        }

        let mut all_entries: Vec<String> = Vec::new();
        let mut scripts: Vec<ScriptKind> = Vec::new();
        for text in &texts {
            let (entries, script) =
                self.builder
                    .build_entries(text, with_capitalized, include_original);
            log::debug!("candidates for {text:?}: {entries:?}");
            all_entries.extend(entries);
            scripts.push(script);
        }

        let (heads, descriptions) = fetch_descriptions(&self.store, &all_entries);
        let allow_short_words =
            allow_short_words && scripts.first() == Some(&ScriptKind::SingleByte);
        let (content, hit_count) = self
            .generator
            .generate(&heads, &descriptions, allow_short_words);

        if hit_count < threshold {
            return false;
        }
        if !self.generation.try_apply(token) {
            return false;
        }
        self.sink.update(&content, hit_count);
        self.state.last_key = Some(key.clone());
        if !include_original {
            // 钉选查词文本特异且少见，不进缓存
            self.cache.put(&key, content, hit_count);
        }
        true
    }
}

/// 取释义并做一跳交叉引用扩展。
///
/// 第一轮取词后扫描所有释义内的引用标记，凑出尚未取过的词头集合，
/// 非空则**恰好再取一轮**并合并；第二轮释义不再扫描（绝不递归）。
pub fn fetch_descriptions<S>(store: &S, entries: &[String]) -> (Vec<String>, HashMap<String, String>)
where
    S: DescriptionStore + ?Sized,
{
    let primary = store.get_many(entries);
    let mut heads: Vec<String> = entries
        .iter()
        .filter(|e| primary.contains_key(*e))
        .cloned()
        .collect();

    let refs = collect_ref_heads(&heads, &primary);
    if refs.is_empty() {
        return (heads, primary);
    }

    let secondary = store.get_many(&refs);
    let mut descriptions = primary;
    descriptions.extend(secondary);
    heads.extend(refs);
    (heads, descriptions)
}

/// 按词头顺序扫描释义，收集其中引用的、尚未取过的词头（保持首见顺序）。
fn collect_ref_heads(heads: &[String], descriptions: &HashMap<String, String>) -> Vec<String> {
    let mut refs: Vec<String> = Vec::new();
    for head in heads {
        let Some(desc) = descriptions.get(head) else {
            continue;
        };
        for r in extract_ref_patterns(desc) {
            if r.is_empty() || descriptions.contains_key(&r) || refs.contains(&r) {
                continue;
            }
            refs.push(r);
        }
    }
    refs
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn generation_discards_stale_completions() {
        let mut g = Generation::default();
        let t1 = g.begin();
        let t2 = g.begin();
        let t3 = g.begin();
        assert!(g.try_apply(t3));
        assert!(!g.try_apply(t2));
        assert!(!g.try_apply(t1));
    }

    #[test]
    fn generation_allows_in_order_completions() {
        let mut g = Generation::default();
        let t1 = g.begin();
        let t2 = g.begin();
        assert!(g.try_apply(t1));
        assert!(g.try_apply(t2));
    }

    /// 计数存根存储：记录 get_many 的调用次数。
    struct CountingStore {
        map: HashMap<String, String>,
        calls: AtomicUsize,
    }

    impl CountingStore {
        fn new(pairs: &[(&str, &str)]) -> Self {
            Self {
                map: pairs
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl DescriptionStore for CountingStore {
        fn get_many(&self, keys: &[String]) -> HashMap<String, String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            keys.iter()
                .filter_map(|k| self.map.get(k).map(|v| (k.clone(), v.clone())))
                .collect()
        }
    }

    #[test]
    fn fetch_resolves_references_in_one_extra_round() {
        let store = CountingStore::new(&[
            ("alpha", "see <→beta>"),
            ("beta", "see <→gamma>"),
            ("gamma", "the end"),
        ]);
        let entries = vec!["alpha".to_string()];
        let (heads, descriptions) = fetch_descriptions(&store, &entries);
        // beta 被一跳取到；beta 释义里的 gamma 不再扩展
        assert_eq!(heads, vec!["alpha", "beta"]);
        assert!(descriptions.contains_key("beta"));
        assert!(!descriptions.contains_key("gamma"));
        assert_eq!(store.calls(), 2);
    }

    #[test]
    fn fetch_without_references_is_a_single_round() {
        let store = CountingStore::new(&[("plain", "no markers here")]);
        let entries = vec!["plain".to_string(), "missing".to_string()];
        let (heads, descriptions) = fetch_descriptions(&store, &entries);
        assert_eq!(heads, vec!["plain"]);
        assert_eq!(descriptions.len(), 1);
        assert_eq!(store.calls(), 1);
    }

    #[test]
    fn fetch_deduplicates_reference_heads() {
        let store = CountingStore::new(&[
            ("a", "see <→x> and <→x> and ＝x"),
            ("b", "also <→x>"),
        ]);
        let entries = vec!["a".to_string(), "b".to_string()];
        let (heads, _descriptions) = fetch_descriptions(&store, &entries);
        assert_eq!(heads, vec!["a", "b", "x"]);
    }
}
