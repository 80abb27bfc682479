//! `rule`：候选生成所依赖的语言规则能力。
//!
//! 核心不内置任何具体语言知识，只定义三个接口：
//! - `BaseFormProvider`：词形还原（例如 running -> run）
//! - `PhraseRuleProvider`：短语改写（例如动词短语中的代词折叠）
//! - `TokenBoundaryResolver`：宽字符文本的分词能力（可整体缺席）
//!
//! 区域包（`quci_lang` 等）提供实现；`NoRules` 是合法的空实现。

/// 词形还原：返回一个词的若干备选基本形（可能为空）。
pub trait BaseFormProvider: Send + Sync {
    fn base_forms_of(&self, word: &str) -> Vec<String>;
}

/// 短语改写：对一个词序列前缀返回若干改写后的词序列（可能为空）。
pub trait PhraseRuleProvider: Send + Sync {
    fn phrase_variants_of(&self, words: &[String]) -> Vec<Vec<String>>;
}

/// 分词能力：把文本切成 token 序列。
///
/// 返回 `None` 表示本实现对该文本不提供切分；调用方必须把
/// “无分词器”当作一等降级路径处理，而不是隐式特性探测。
pub trait TokenBoundaryResolver: Send + Sync {
    fn tokens(&self, text: &str) -> Option<Vec<String>>;
}

/// 空规则集：不产生任何还原/改写结果。
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRules;

impl BaseFormProvider for NoRules {
    fn base_forms_of(&self, _word: &str) -> Vec<String> {
        Vec::new()
    }
}

impl PhraseRuleProvider for NoRules {
    fn phrase_variants_of(&self, _words: &[String]) -> Vec<Vec<String>> {
        Vec::new()
    }
}
