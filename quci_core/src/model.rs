/// 字符分类 bitmask：边界扫描时一个字符允许窗口向哪个方向延伸。
pub mod char_class {
    /// 允许向左（向句首方向）延伸
    pub const EXTEND_LEFT: u8 = 0b01;
    /// 允许向右（向句尾方向）延伸
    pub const EXTEND_RIGHT: u8 = 0b10;
    /// 双向均可延伸（Latin 文本的常态）
    pub const EXTEND_BOTH: u8 = 0b11;
    /// 硬边界：任一方向都不延伸
    pub const BOUNDARY: u8 = 0;
}

/// 窗口文本的书写系统类别。
///
/// 决定边界搜索策略：单字节文字走双向扫描，宽字符文字走定长截断。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    /// 单字节文字（Latin 系）
    SingleByte,
    /// 宽字符文字（CJK 等，无空格分词）
    Wide,
}

/// 取词窗口：光标附近被认定为“用户所指”的有界子串。
///
/// 约定：
/// - `text` 从“词对齐起点”开始（起点 <= 光标位置）
/// - `sub_text` 仅在宽字符路径、且分词起点早于光标时存在，
///   表示从光标位置精确起始的窄窗口；两者都是独立有效的查词输入
#[derive(Debug, Clone)]
pub struct TextWindow {
    /// 主窗口文本
    pub text: String,
    /// 光标精确起始的窄窗口（仅宽字符路径可能存在）
    pub sub_text: Option<String>,
    /// 窗口书写系统
    pub script: ScriptKind,
    /// 前向扫描是否触达缓冲区末尾（提示调用方外部可能还有后续文本）
    pub truncated_at_end: bool,
}

/// 缓存条目：一次成功查词的渲染结果与命中数。
#[derive(Debug, Clone)]
pub struct CacheEntry<C> {
    /// 渲染结果（对核心不透明）
    pub content: C,
    /// 命中词条数
    pub hit_count: usize,
}

/// 会话级可变状态：跨多次查词存活，由编排器与外部 UI 事件共同驱动。
///
/// 与“每次查词新建、用完即弃”的 `TextWindow`/候选列表相对：
/// 这里的字段在整个 dialog 生命周期内持续存在。
#[derive(Debug, Clone, Default)]
pub struct LookupState {
    /// 上一次完整处理过的组合键（相同输入重复触发时直接短路）
    pub last_key: Option<String>,
    /// 外部要求暂停一切更新
    pub suspended: bool,
    /// 钉选查词进行中（锁定到指定文本而非悬停位置）
    pub aimed: bool,
    /// 文本选区拖拽进行中（由外部选区事件驱动）
    pub half_locked: bool,
}
