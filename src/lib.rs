//! # lsb_carrier 库
//!
//! 本库包含按比特组把文本写入图像像素通道的核心逻辑。

// 声明库包含的所有模块。

pub mod cli;
pub mod config;
pub mod constants;
pub mod encoding;
pub mod error;
pub mod handler;
pub mod slicer;
pub mod steganography;
