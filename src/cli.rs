//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::config::{StegoConfig, WriteMode};
use crate::encoding::TextEncoding;
use crate::slicer::BitWidth;
use clap::{ArgGroup, Args, Parser};
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，把文本按比特组写入无损格式图像 (如 PNG, BMP) 的像素通道。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，把文本按比特组写入无损格式图像 (如 PNG, BMP) 的像素通道。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：info (容量) 和 hide (隐藏)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 报告图像在当前设置下可容纳的字节数与字符数。
    Info(InfoArgs),

    /// 把文本写入图像并保存为新文件。
    Hide(HideArgs),
}

/// 两个子命令共用的隐写参数。
#[derive(Args, Debug, Clone)]
pub struct StegoOptions {
    /// 每个通道字节写入的比特数：1、2、4 或 8。
    #[arg(short, long, default_value = "1")]
    pub bits: BitWidth,

    /// 文本编码，如 utf-8、utf-16le、utf-32、ascii。
    #[arg(short, long, default_value = "utf-8")]
    pub encoding: TextEncoding,

    /// 比特组写入方式。
    #[arg(long, value_enum, default_value_t)]
    pub mode: WriteMode,

    /// 接受每像素 2 字节 (灰度 + Alpha) 的图像。
    #[arg(long)]
    pub allow_two_byte_pixels: bool,
}

impl Default for StegoOptions {
    fn default() -> Self {
        StegoConfig::default().into()
    }
}

impl From<StegoConfig> for StegoOptions {
    fn from(config: StegoConfig) -> Self {
        Self {
            bits: config.bit_width,
            encoding: config.encoding,
            mode: config.write_mode,
            allow_two_byte_pixels: config.allow_two_byte_pixels,
        }
    }
}

impl From<&StegoOptions> for StegoConfig {
    fn from(options: &StegoOptions) -> Self {
        Self {
            bit_width: options.bits,
            encoding: options.encoding,
            write_mode: options.mode,
            allow_two_byte_pixels: options.allow_two_byte_pixels,
        }
    }
}

/// 'info' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// 载体图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    #[command(flatten)]
    pub options: StegoOptions,
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
#[command(group(ArgGroup::new("payload").required(true).args(["message", "text"])))]
pub struct HideArgs {
    /// 用于隐写的输入图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的文本。
    #[arg(short, long)]
    pub message: Option<String>,

    /// 要隐藏的文本内容的文件路径。
    #[arg(short, long)]
    pub text: Option<PathBuf>,

    /// 隐写完成后，保存结果图像的输出路径。
    /// 缺省时保存为输入图像同目录下的 `doctored_<文件名>`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 覆盖已存在的输出文件。
    #[arg(short, long)]
    pub force: bool,

    #[command(flatten)]
    pub options: StegoOptions,
}
