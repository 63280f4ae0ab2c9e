//! # 载体图像模块
//!
//! 持有一张已解码的图像，负责容量计算以及按行优先顺序把消息的比特组写入像素通道。
//!
//! 会话中的原图从不被修改：每次嵌入都在副本上进行，失败时不会产生任何输出。

use crate::config::{StegoConfig, WriteMode};
use crate::constants::{BITS_PER_BYTE, LUMA_ALPHA_CHANNELS, RGB_CHANNELS, RGBA_CHANNELS};
use crate::encoding::TextEncoding;
use crate::error::{Result, StegoError};
use crate::slicer::{BitSlicer, BitWidth};
use image::{ColorType, DynamicImage, ImageBuffer, ImageFormat, Pixel};
use log::{debug, info, warn};
use std::fs;
use std::io::{Seek, Write};
use std::path::Path;

/// 可写入的像素布局，决定每像素的通道数与通道顺序。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 每像素 2 字节：灰度、Alpha。
    LumaAlpha,
    /// 24 位：R、G、B。
    Rgb,
    /// 32 位：R、G、B、A。
    Rgba,
}

impl PixelLayout {
    /// 根据解码得到的颜色类型选择布局。
    ///
    /// # Errors
    ///
    /// * 每像素 2 字节且未启用 `allow_two_byte_pixels` 时返回 [`StegoError::UnsupportedPixelFormat`]。
    /// * 其它不在表中的格式 (含 16 位与浮点通道) 返回 [`StegoError::UnrecognizedPixelFormat`]。
    pub fn from_color_type(color: ColorType, allow_two_byte_pixels: bool) -> Result<Self> {
        match color {
            ColorType::La8 if allow_two_byte_pixels => Ok(PixelLayout::LumaAlpha),
            ColorType::La8 => Err(StegoError::UnsupportedPixelFormat(color)),
            ColorType::Rgb8 => Ok(PixelLayout::Rgb),
            ColorType::Rgba8 => Ok(PixelLayout::Rgba),
            other => Err(StegoError::UnrecognizedPixelFormat(other)),
        }
    }

    pub const fn channels(self) -> usize {
        match self {
            PixelLayout::LumaAlpha => LUMA_ALPHA_CHANNELS,
            PixelLayout::Rgb => RGB_CHANNELS,
            PixelLayout::Rgba => RGBA_CHANNELS,
        }
    }
}

/// 一次嵌入过程中的位置：已消费的比特组数，以及消息是否已耗尽。
///
/// `exhausted` 一旦为真，本次嵌入中不会再修改任何通道。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbeddingCursor {
    position: usize,
    exhausted: bool,
}

impl EmbeddingCursor {
    /// 已写入的比特组数。
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    fn advance(&mut self, slicer: &BitSlicer<'_>) -> Option<u8> {
        if self.exhausted {
            return None;
        }

        match slicer.group(self.position) {
            Ok(mask) => {
                self.position += 1;
                if self.position == slicer.group_count() {
                    self.exhausted = true;
                }
                Some(mask)
            }
            Err(_) => {
                self.exhausted = true;
                None
            }
        }
    }
}

/// 嵌入完成后的图像以及最终游标。
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub image: DynamicImage,
    pub cursor: EmbeddingCursor,
}

/// 当前会话的容量概览。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapacityReport {
    pub width: u32,
    pub height: u32,
    pub pixel_count: usize,
    pub channels: usize,
    pub bit_width: BitWidth,
    pub encoding: TextEncoding,
    pub available_bytes: usize,
    pub available_chars: usize,
}

#[derive(Debug)]
struct LoadedImage {
    image: DynamicImage,
    format: ImageFormat,
    layout: PixelLayout,
}

/// 一次隐写会话：持有载体图像及其容量信息。
///
/// 修改比特组宽度或文本编码时会立即重新计算容量。
///
/// # Examples
///
/// ```no_run
/// use lsb_carrier::steganography::CarrierImage;
/// use std::fs::File;
///
/// let mut carrier = CarrierImage::default();
/// carrier.load_path("cover.png")?;
/// println!("{} bytes available", carrier.available_bytes());
///
/// let mut out = File::create("doctored_cover.png")?;
/// carrier.encode_message("a very secret message", &mut out)?;
/// # Ok::<(), lsb_carrier::error::StegoError>(())
/// ```
#[derive(Debug, Default)]
pub struct CarrierImage {
    config: StegoConfig,
    loaded: Option<LoadedImage>,
    channel_bytes: usize,
    available_bytes: usize,
    available_chars: usize,
}

impl CarrierImage {
    pub fn new(config: StegoConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &StegoConfig {
        &self.config
    }

    pub fn bit_width(&self) -> BitWidth {
        self.config.bit_width
    }

    pub fn set_bit_width(&mut self, width: BitWidth) {
        self.config.bit_width = width;
        self.recompute_capacity();
    }

    pub fn encoding(&self) -> TextEncoding {
        self.config.encoding
    }

    pub fn set_encoding(&mut self, encoding: TextEncoding) {
        self.config.encoding = encoding;
        self.recompute_capacity();
    }

    pub fn set_write_mode(&mut self, mode: WriteMode) {
        self.config.write_mode = mode;
    }

    /// 从文件加载载体图像。
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let data = fs::read(path.as_ref())?;
        self.load_bytes(&data)
    }

    /// 从内存中的图像文件数据加载载体图像。
    ///
    /// 只有在解码与格式检查全部成功后才会替换当前会话中的图像。
    ///
    /// # Errors
    ///
    /// 无法识别容器格式、解码失败或像素格式不受支持时返回错误。
    pub fn load_bytes(&mut self, data: &[u8]) -> Result<()> {
        let format = image::guess_format(data)?;
        let image = image::load_from_memory_with_format(data, format)?;
        let layout = PixelLayout::from_color_type(image.color(), self.config.allow_two_byte_pixels)?;

        debug!(
            "Loaded {:?} image {}x{} as {:?}",
            format,
            image.width(),
            image.height(),
            layout
        );

        self.channel_bytes = image.width() as usize * image.height() as usize * layout.channels();
        self.loaded = Some(LoadedImage {
            image,
            format,
            layout,
        });
        self.recompute_capacity();

        Ok(())
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.loaded
            .as_ref()
            .map(|loaded| (loaded.image.width(), loaded.image.height()))
    }

    pub fn pixel_count(&self) -> usize {
        self.dimensions()
            .map_or(0, |(w, h)| w as usize * h as usize)
    }

    pub fn layout(&self) -> Option<PixelLayout> {
        self.loaded.as_ref().map(|loaded| loaded.layout)
    }

    /// 加载时识别出的容器格式。
    pub fn source_format(&self) -> Option<ImageFormat> {
        self.loaded.as_ref().map(|loaded| loaded.format)
    }

    /// 可寻址的通道字节总数 (`像素数 × 每像素通道数`)。
    pub fn channel_bytes(&self) -> usize {
        self.channel_bytes
    }

    pub fn available_bytes(&self) -> usize {
        self.available_bytes
    }

    /// 可容纳字符数的上界，见 [`TextEncoding::max_chars_for`]。
    pub fn available_chars(&self) -> usize {
        self.available_chars
    }

    pub fn report(&self) -> Result<CapacityReport> {
        let loaded = self.loaded.as_ref().ok_or(StegoError::NoImageLoaded)?;

        Ok(CapacityReport {
            width: loaded.image.width(),
            height: loaded.image.height(),
            pixel_count: self.pixel_count(),
            channels: loaded.layout.channels(),
            bit_width: self.config.bit_width,
            encoding: self.config.encoding,
            available_bytes: self.available_bytes,
            available_chars: self.available_chars,
        })
    }

    /// 把 `text` 嵌入载体图像的副本并返回结果，不做序列化。
    ///
    /// # Errors
    ///
    /// * 尚未加载图像：[`StegoError::NoImageLoaded`]。
    /// * 文本无法用当前编码表示：[`StegoError::Unencodable`]。
    /// * 编码后的字节数超过容量：[`StegoError::CapacityExceeded`]，此时不会触碰任何像素。
    pub fn embed(&self, text: &str) -> Result<EncodedImage> {
        let loaded = self.loaded.as_ref().ok_or(StegoError::NoImageLoaded)?;
        let message = self.config.encoding.encode(text)?;

        if message.len() > self.available_bytes {
            return Err(StegoError::CapacityExceeded {
                required: message.len(),
                available: self.available_bytes,
            });
        }

        let mode = self.config.write_mode;
        if mode == WriteMode::AndMask {
            warn!("And-mask write mode cannot set carrier bits; message bits of 1 may be lost.");
        }

        let slicer = BitSlicer::new(&message, self.config.bit_width);
        let mut image = loaded.image.clone();
        let cursor = match &mut image {
            DynamicImage::ImageLumaA8(grid) => walk(grid, &slicer, mode),
            DynamicImage::ImageRgb8(grid) => walk(grid, &slicer, mode),
            DynamicImage::ImageRgba8(grid) => walk(grid, &slicer, mode),
            other => return Err(StegoError::UnrecognizedPixelFormat(other.color())),
        };

        info!(
            "Embedded {} bytes as {} groups of {} bit(s) into {} channel bytes",
            message.len(),
            cursor.position(),
            slicer.width(),
            self.channel_bytes
        );

        Ok(EncodedImage { image, cursor })
    }

    /// 嵌入 `text` 并以加载时的容器格式写入 `sink`。
    pub fn encode_message<W: Write + Seek>(
        &self,
        text: &str,
        sink: &mut W,
    ) -> Result<EmbeddingCursor> {
        let format = self.source_format().ok_or(StegoError::NoImageLoaded)?;
        self.encode_message_as(text, sink, format)
    }

    /// 嵌入 `text` 并以指定容器格式写入 `sink`。
    ///
    /// 只有整个像素遍历成功后才会写入 `sink`。
    pub fn encode_message_as<W: Write + Seek>(
        &self,
        text: &str,
        sink: &mut W,
        format: ImageFormat,
    ) -> Result<EmbeddingCursor> {
        let encoded = self.embed(text)?;
        encoded.image.write_to(sink, format)?;
        Ok(encoded.cursor)
    }

    fn recompute_capacity(&mut self) {
        self.available_bytes = self.channel_bytes * self.config.bit_width.bits() / BITS_PER_BYTE;
        self.available_chars = self.config.encoding.max_chars_for(self.available_bytes);
    }
}

/// 行优先 (先 y 后 x) 遍历像素，每个通道写入一个比特组。
///
/// 消息耗尽后立即停止，其后的通道 (包括同一像素中剩余的通道) 保持原值。
fn walk<P>(
    grid: &mut ImageBuffer<P, Vec<u8>>,
    slicer: &BitSlicer<'_>,
    mode: WriteMode,
) -> EmbeddingCursor
where
    P: Pixel<Subpixel = u8>,
{
    let width = slicer.width();
    let mut cursor = EmbeddingCursor::default();

    'pixels: for pixel in grid.pixels_mut() {
        for channel in pixel.channels_mut() {
            let Some(mask) = cursor.advance(slicer) else {
                break 'pixels;
            };
            *channel = mode.apply(*channel, mask, width);
        }

        if cursor.is_exhausted() {
            break;
        }
    }

    cursor
}
