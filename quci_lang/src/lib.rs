//! 区域包：具体语言知识都放在这里。
//!
//! 设计目标：
//! - 核心（`quci_core`）只认识抽象能力接口，本包提供英文优先的
//!   拉丁文实现与宽字符文本的通用实现
//! - 书写系统检测、字符分类、词形还原、短语改写、分词、候选键
//!   生成各自一个模块，互相之间只通过核心接口耦合
//! - 规则表是保守的：宁可多产出几个查不到的候选，也不漏掉
//!   词典里存在的词头

pub mod base;
pub mod entry;
pub mod latin;
pub mod phrase;
pub mod segment;
