//! `classifier`：码点分类能力（窗口边界扫描的基础）。
//!
//! 每个目标语言/区域提供一个实现；核心只依赖接口。
//! 分类是纯函数且全定义：任何码点都有确定结果，不产生错误。

use crate::model::char_class::{BOUNDARY, EXTEND_BOTH};

/// 码点分类器：给出延伸方向 bitmask 与书写系统判定。
pub trait CharClassifier: Send + Sync {
    /// 返回 `char_class` bitmask（0..=3）。
    fn classify(&self, code: u32) -> u8;

    /// 是否属于单字节文字（Latin 系）。
    fn is_single_byte(&self, code: u32) -> bool;
}

impl<T> CharClassifier for Box<T>
where
    T: CharClassifier + ?Sized,
{
    fn classify(&self, code: u32) -> u8 {
        (**self).classify(code)
    }

    fn is_single_byte(&self, code: u32) -> bool {
        (**self).is_single_byte(code)
    }
}

/// 缺省分类器：Latin-1 范围（0x20-0x7E、0xA0-0xFF）双向可延伸，
/// 其余一律视为硬边界。区域包未注入分类器时的回退行为。
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl CharClassifier for DefaultClassifier {
    fn classify(&self, code: u32) -> u8 {
        if self.is_single_byte(code) { EXTEND_BOTH } else { BOUNDARY }
    }

    fn is_single_byte(&self, code: u32) -> bool {
        (0x20..=0x7e).contains(&code) || (0xa0..=0xff).contains(&code)
    }
}
