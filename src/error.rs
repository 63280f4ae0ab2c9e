//! # 错误类型模块
//!
//! 库内所有操作共用的错误分类。命令行层再用 `anyhow` 为其附加上下文。

use image::ColorType;
use thiserror::Error;

/// 库操作的结果类型。
pub type Result<T> = std::result::Result<T, StegoError>;

#[derive(Debug, Error)]
pub enum StegoError {
    /// 比特组索引超出 `[0, count)`。
    #[error("Bit-group index {index} is out of range (group count: {count}).")]
    IndexOutOfRange { index: usize, count: usize },

    /// 比特组宽度只能是 1、2、4 或 8。
    #[error("Unsupported bit-group width {0}, expected one of 1, 2, 4, 8.")]
    InvalidBitWidth(u8),

    #[error("No source image has been loaded.")]
    NoImageLoaded,

    #[error(
        "Not enough space in the image. Message is {required} bytes, and only {available} bytes are available."
    )]
    CapacityExceeded { required: usize, available: usize },

    /// 像素格式在已知表中，但被当前配置排除 (每像素 2 字节)。
    #[error("Pixel format {0:?} is not supported by the current configuration.")]
    UnsupportedPixelFormat(ColorType),

    #[error("Unrecognized pixel format {0:?}.")]
    UnrecognizedPixelFormat(ColorType),

    #[error("Character {character:?} cannot be represented in {encoding}.")]
    Unencodable {
        encoding: &'static str,
        character: char,
    },

    #[error("Unknown text encoding: {0}")]
    UnknownEncoding(String),

    #[error(transparent)]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
