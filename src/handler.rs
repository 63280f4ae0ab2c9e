//! # 命令处理逻辑模块
//!
//! 包含处理 `info` 和 `hide` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{HideArgs, InfoArgs};
use crate::config::StegoConfig;
use crate::constants::DEFAULT_OUTPUT_PREFIX;
use crate::steganography::{CapacityReport, CarrierImage};
use anyhow::{Context, Result};
use colored::Colorize;
use image::ImageFormat;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// 处理 'Info' 命令的执行逻辑。
///
/// 加载图像并打印像素数、比特组宽度、文本编码以及可用字节数和字符数。
///
/// # Errors
///
/// 无法读取或解码图像，或像素格式不受支持时返回错误。
pub fn handle_info(args: InfoArgs) -> Result<CapacityReport> {
    let carrier = load_carrier(&args.image, StegoConfig::from(&args.options))?;
    let report = carrier.report()?;

    println!("Pixels: {}", report.pixel_count.to_string().green().bold());
    println!(
        "Dimensions: {}x{} ({} channels)",
        report.width, report.height, report.channels
    );
    println!("Bits to encode: {}", report.bit_width.to_string().green().bold());
    println!("Character Encoding: {}", report.encoding.name().green().bold());
    println!(
        "Available bytes: {}",
        report.available_bytes.to_string().green().bold()
    );
    println!(
        "Available characters: {} (upper bound)",
        report.available_chars.to_string().green().bold()
    );

    Ok(report)
}

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取图像和文本、检查输出路径、调用嵌入逻辑，并在整个像素遍历成功后写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与隐写参数的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像或文本文件。
/// * 输出文件已存在且未指定 `--force`。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法编码或写入目标图像文件。
///
/// 返回实际写入的路径。
pub fn handle_hide(args: HideArgs) -> Result<PathBuf> {
    let dest = match &args.dest {
        Some(dest) => dest.clone(),
        None => default_output_path(&args.image)?,
    };

    anyhow::ensure!(
        args.force || !dest.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        dest.to_string_lossy().red().bold()
    );

    let message = match (&args.message, &args.text) {
        (Some(message), _) => message.clone(),
        (None, Some(path)) => fs::read_to_string(path).with_context(|| {
            format!(
                "Unable to read text file: {}",
                path.to_string_lossy().red().bold()
            )
        })?,
        (None, None) => anyhow::bail!("Either a message or a text file must be provided."),
    };

    let carrier = load_carrier(&args.image, StegoConfig::from(&args.options))?;
    let format = match ImageFormat::from_path(&dest) {
        Ok(format) => format,
        Err(_) => carrier
            .source_format()
            .context("The source image format could not be determined.")?,
    };

    let mut output = Cursor::new(Vec::new());
    let cursor = carrier
        .encode_message_as(&message, &mut output, format)
        .with_context(|| {
            format!(
                "Failed to hide the message in {}.",
                args.image.to_string_lossy().red().bold()
            )
        })?;

    fs::write(&dest, output.into_inner()).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The text has been successfully hidden ({} bit groups) and saved: {}",
        cursor.position().to_string().green(),
        dest.to_string_lossy().green().bold()
    );

    Ok(dest)
}

fn load_carrier(path: &Path, config: StegoConfig) -> Result<CarrierImage> {
    let mut carrier = CarrierImage::new(config);
    carrier.load_path(path).with_context(|| {
        format!(
            "Unable to load image file: {}",
            path.to_string_lossy().red().bold()
        )
    })?;
    Ok(carrier)
}

/// 在输入图像同目录下生成 `doctored_<文件名>`。
fn default_output_path(image: &Path) -> Result<PathBuf> {
    let file_name = image.file_name().with_context(|| {
        format!(
            "Image path has no file name: {}",
            image.to_string_lossy().red().bold()
        )
    })?;

    let mut name = DEFAULT_OUTPUT_PREFIX.to_owned();
    name.push_str(&file_name.to_string_lossy());
    Ok(image.with_file_name(name))
}
