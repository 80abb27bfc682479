//! `Session`：对宿主（浏览器适配层/CLI）提供的会话对象。
//!
//! `Session` 自身不做取词判断，而是：
//! - 持有 `TextCapture`（定位 + 窗口提取）与查词编排器
//! - 把每次 `InputEvent` 依次交给 processors，直到被消费
//! - 最后输出 `Action` 列表
//!
//! 定位失败（外部几何能力抛错）在这里被记录并吞掉，绝不外传。

use thiserror::Error;

use crate::classifier::CharClassifier;
use crate::event::{Action, InputEvent};
use crate::lookuper::Lookuper;
use crate::processor::{
    HoverProcessor, PinProcessor, ProcessStatus, Processor, SelectionProcessor, SessionFacade,
    SuspendProcessor,
};
use crate::rule::TokenBoundaryResolver;
use crate::store::{ContentGenerator, DescriptionStore};
use crate::window::WindowExtractor;

/// 定位结果：光标命中的文本缓冲、缓冲内偏移、以及其后续文本
/// （宿主正在逐节点扫描时，当前缓冲之后的兄弟文本）。
#[derive(Debug, Clone)]
pub struct CaretHit {
    pub text: String,
    /// char 偏移
    pub offset: usize,
    pub following: Option<String>,
}

/// 外部几何能力的失败。调用方记录后按“无窗口”处理。
#[derive(Debug, Error)]
#[error("caret lookup failed: {0}")]
pub struct CaretError(pub String);

/// 外部 caret 几何能力：屏幕坐标 -> 文本位置。
pub trait CaretLocator {
    fn locate(&self, x: f64, y: f64) -> Result<Option<CaretHit>, CaretError>;
}

/// 取词前端：定位 + 窗口提取 + 后续文本拼接，产出查词文本列表。
pub struct TextCapture<C> {
    extractor: WindowExtractor<C>,
    locator: Box<dyn CaretLocator>,
    resolver: Option<Box<dyn TokenBoundaryResolver>>,
}

impl<C> TextCapture<C>
where
    C: CharClassifier,
{
    pub fn new(extractor: WindowExtractor<C>, locator: Box<dyn CaretLocator>) -> Self {
        Self {
            extractor,
            locator,
            resolver: None,
        }
    }

    /// 注入可选的分词能力（宽字符窗口的词对齐用）。
    pub fn resolver(mut self, resolver: Box<dyn TokenBoundaryResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// 屏幕坐标 -> 查词文本列表。任何失败都降级为空列表。
    pub fn capture(&self, x: f64, y: f64) -> Vec<String> {
        let hit = match self.locator.locate(x, y) {
            Ok(Some(hit)) => hit,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("{err}");
                return Vec::new();
            }
        };
        let Some(window) = self
            .extractor
            .extract(&hit.text, hit.offset, self.resolver.as_deref())
        else {
            return Vec::new();
        };

        let mut texts = vec![window.text.clone()];
        if let Some(sub) = &window.sub_text {
            texts.push(sub.clone());
        }
        if window.truncated_at_end {
            if let Some(following) = &hit.following {
                texts = texts
                    .iter()
                    .map(|t| self.extractor.concat_following(t, following, window.script))
                    .collect();
            }
        }
        texts
    }
}

/// 会话内核：capture 与 lookuper 的组合，承担 `SessionFacade`。
struct SessionInner<C, S, G>
where
    G: ContentGenerator,
{
    capture: TextCapture<C>,
    lookuper: Lookuper<S, G>,
}

impl<C, S, G> SessionFacade for SessionInner<C, S, G>
where
    C: CharClassifier,
    S: DescriptionStore,
    G: ContentGenerator,
{
    fn capture(&self, x: f64, y: f64) -> Vec<String> {
        self.capture.capture(x, y)
    }

    fn lookup_all(&mut self, texts: &[String]) -> bool {
        self.lookuper.lookup_all(texts)
    }

    fn aimed_lookup(&mut self, text: &str) -> bool {
        self.lookuper.aimed_lookup(text)
    }

    fn set_suspended(&mut self, on: bool) {
        self.lookuper.set_suspended(on);
    }

    fn set_half_locked(&mut self, on: bool) {
        self.lookuper.set_half_locked(on);
    }
}

/// 取词会话（一个 dialog 实例的状态机容器）。
pub struct Session<C, S, G>
where
    G: ContentGenerator,
{
    inner: SessionInner<C, S, G>,
    processors: Vec<Box<dyn Processor>>,
}

impl<C, S, G> Session<C, S, G>
where
    C: CharClassifier,
    S: DescriptionStore,
    G: ContentGenerator,
{
    /// 创建会话，并组装默认 processors 链。
    pub fn new(capture: TextCapture<C>, lookuper: Lookuper<S, G>) -> Self {
        Self {
            inner: SessionInner { capture, lookuper },
            processors: vec![
                Box::new(HoverProcessor),
                Box::new(PinProcessor),
                Box::new(SelectionProcessor),
                Box::new(SuspendProcessor),
            ],
        }
    }

    /// 处理一个输入事件，返回动作列表。
    pub fn handle(&mut self, ev: InputEvent) -> Vec<Action> {
        let mut actions = Vec::new();
        for p in &mut self.processors {
            let (status, mut a) = p.process(&mut self.inner, &ev);
            actions.append(&mut a);
            if status == ProcessStatus::Consume {
                break;
            }
        }
        actions
    }

    /// 查词编排器的只读状态（调试/宿主查询用）。
    pub fn lookuper(&self) -> &Lookuper<S, G> {
        &self.inner.lookuper
    }
}
