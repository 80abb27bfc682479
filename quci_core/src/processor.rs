//! `processor`：输入事件处理链。
//!
//! 按顺序处理 `InputEvent`，对会话状态做变更，并可产生 `Action`。
//!
//! 当前链路（`Session::new` 默认组装）：
//! - `HoverProcessor`：光标移动 -> 取窗口 -> 悬停查词
//! - `PinProcessor`：钉选/解除钉选
//! - `SelectionProcessor`：选区拖拽起止（half-lock）
//! - `SuspendProcessor`：暂停/恢复

use crate::event::{Action, InputEvent};

/// 给 processors 的对象安全会话接口（避免在 processors 层引入泛型爆炸）。
pub trait SessionFacade {
    /// 屏幕坐标 -> 取词文本列表（主窗口 + 可选窄窗口，已拼好后续文本）。
    /// 定位失败按“无窗口”处理，返回空列表。
    fn capture(&self, x: f64, y: f64) -> Vec<String>;
    /// 悬停查词，返回是否更新了 UI。
    fn lookup_all(&mut self, texts: &[String]) -> bool;
    /// 钉选查词；空文本解除钉选。
    fn aimed_lookup(&mut self, text: &str) -> bool;
    fn set_suspended(&mut self, on: bool);
    fn set_half_locked(&mut self, on: bool);
}

/// Processor 执行结果：是否“消费”了本次事件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Consume,
    Continue,
}

/// Processor：处理输入事件并改变会话状态；必要时产生输出动作。
pub trait Processor: Send + Sync {
    fn process(
        &mut self,
        session: &mut dyn SessionFacade,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>);
}

/// 悬停查词的 processor。
pub struct HoverProcessor;

impl Processor for HoverProcessor {
    fn process(
        &mut self,
        session: &mut dyn SessionFacade,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::PointerMove { x, y } => {
                let texts = session.capture(x, y);
                if texts.is_empty() {
                    return (ProcessStatus::Consume, Vec::new());
                }
                let actions = if session.lookup_all(&texts) {
                    vec![Action::Updated]
                } else {
                    Vec::new()
                };
                (ProcessStatus::Consume, actions)
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct PinProcessor;

impl Processor for PinProcessor {
    fn process(
        &mut self,
        session: &mut dyn SessionFacade,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match input_event {
            InputEvent::Pin(text) => {
                let actions = if session.aimed_lookup(text) {
                    vec![Action::Updated]
                } else {
                    Vec::new()
                };
                (ProcessStatus::Consume, actions)
            }
            InputEvent::Unpin => {
                session.aimed_lookup("");
                (ProcessStatus::Consume, Vec::new())
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct SelectionProcessor;

impl Processor for SelectionProcessor {
    fn process(
        &mut self,
        session: &mut dyn SessionFacade,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::SelectionStart => {
                session.set_half_locked(true);
                (ProcessStatus::Consume, Vec::new())
            }
            InputEvent::SelectionEnd => {
                session.set_half_locked(false);
                (ProcessStatus::Consume, Vec::new())
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}

pub struct SuspendProcessor;

impl Processor for SuspendProcessor {
    fn process(
        &mut self,
        session: &mut dyn SessionFacade,
        input_event: &InputEvent,
    ) -> (ProcessStatus, Vec<Action>) {
        match *input_event {
            InputEvent::Suspend => {
                session.set_suspended(true);
                (ProcessStatus::Consume, Vec::new())
            }
            InputEvent::Resume => {
                session.set_suspended(false);
                (ProcessStatus::Consume, Vec::new())
            }
            _ => (ProcessStatus::Continue, Vec::new()),
        }
    }
}
