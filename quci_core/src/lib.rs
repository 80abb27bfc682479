//! `quci_core`：取词核心（纯逻辑层，不做任何 I/O）。
//!
//! 设计目标：
//! - **核心可复用**：浏览器宿主 / CLI / 服务端都能复用同一套取词逻辑
//! - **分层清晰**：session -> processor -> window（取窗口）-> entry（造候选）
//!   -> lookuper（查词编排）-> 输出（sink 回调）
//! - **能力即接口**：字符分类、词典存储、词形还原、短语改写、分词器
//!   全部是 trait，宿主按需注入；缺省实现（例如无分词器）是一等公民
pub mod cache;
pub mod classifier;
pub mod event;
pub mod lookuper;
pub mod model;
pub mod processor;
pub mod rule;
pub mod session;
pub mod store;
pub mod text;
pub mod window;
