//! # 配置模块
//!
//! 一次隐写会话的可调参数：比特组宽度、文本编码、写入方式以及像素格式策略。

use crate::encoding::TextEncoding;
use crate::slicer::BitWidth;
use clap::ValueEnum;

/// 比特组写入载体字节的方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum WriteMode {
    /// 先清除低 `width` 位，再写入组的值。载体低位与消息完全一致。
    #[default]
    Replace,
    /// 只用掩码做按位与：能写入 0，但值为 1 的位只有在载体原本就是 1 时才成立。
    /// 用于生成与旧工具逐字节相同的输出。
    AndMask,
}

impl WriteMode {
    /// 将比特组掩码 `mask` 写入载体字节 `carrier`。
    pub fn apply(self, carrier: u8, mask: u8, width: BitWidth) -> u8 {
        match self {
            WriteMode::Replace => {
                let low = width.low_mask();
                (carrier & !low) | (mask & low)
            }
            WriteMode::AndMask => carrier & mask,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StegoConfig {
    pub bit_width: BitWidth,
    pub encoding: TextEncoding,
    pub write_mode: WriteMode,
    /// 是否接受每像素 2 字节 (灰度 + Alpha) 的图像。
    pub allow_two_byte_pixels: bool,
}
