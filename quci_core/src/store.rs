//! `store`：查词编排所依赖的外部协作方接口。
//!
//! 核心不关心释义来自内存/文件/扩展存储，也不关心渲染成什么：
//! - `DescriptionStore`：词头 -> 释义 的批量取用（缺失键直接不在结果里）
//! - `ContentGenerator`：词头 + 释义 -> 可渲染结果 + 命中数
//! - `ContentSink`：把渲染结果交给外部 UI
//! - `EntryBuilder`：原始文本 -> 有序候选键列表 + 书写系统标记
//! - `SelectionProbe`：外部是否存在进行中的文本选区

use std::collections::HashMap;

use crate::model::ScriptKind;

/// 释义存储：批量取用，缺失的键在返回映射中不出现，永不报错。
pub trait DescriptionStore: Send + Sync {
    fn get_many(&self, keys: &[String]) -> HashMap<String, String>;
}

/// 渲染生成器：对核心而言是其输入的纯函数。
///
/// `allow_short_words` 为 false 时实现应跳过低置信的短词命中。
pub trait ContentGenerator: Send + Sync {
    type Content: Clone;

    fn generate(
        &self,
        heads: &[String],
        descriptions: &HashMap<String, String>,
        allow_short_words: bool,
    ) -> (Self::Content, usize);
}

/// UI 回调：接收渲染结果与命中数。
pub trait ContentSink<C> {
    fn update(&mut self, content: &C, hit_count: usize);
}

/// 候选键生成能力：由区域包实现（Latin 走切词/短语组合，
/// 宽字符走前缀枚举），同时报告检测到的书写系统。
pub trait EntryBuilder: Send + Sync {
    fn build_entries(
        &self,
        text: &str,
        with_case_variants: bool,
        include_original: bool,
    ) -> (Vec<String>, ScriptKind);
}

/// 外部选区探测。
pub trait SelectionProbe {
    fn selection_active(&self) -> bool;
}

/// 缺省探测：永远没有选区。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSelection;

impl SelectionProbe for NoSelection {
    fn selection_active(&self) -> bool {
        false
    }
}
