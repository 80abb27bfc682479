/// 宿主输入事件（逻辑事件）。
///
/// 说明：
/// - `Session`/processor 只关心“语义事件”，不关心具体平台坐标系。
/// - 浏览器/CLI 宿主负责把原生事件转换成这些事件。
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// 光标移动到屏幕坐标（触发悬停查词）
    PointerMove { x: f64, y: f64 },
    /// 钉选查词：锁定到选中文本
    Pin(String),
    /// 解除钉选
    Unpin,
    /// 文本选区拖拽开始
    SelectionStart,
    /// 文本选区拖拽结束
    SelectionEnd,
    /// 暂停一切更新
    Suspend,
    /// 恢复更新
    Resume,
}

/// 会话输出动作（对宿主的“副作用”通告）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// UI 内容已更新（渲染结果经 sink 回调送出）
    Updated,
}
