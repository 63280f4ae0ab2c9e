/// 一个字节包含的比特数。
pub const BITS_PER_BYTE: usize = 8;

/// 未指定输出路径时，结果图像文件名的前缀。
/// 例如 `cat.png` 会被保存为同目录下的 `doctored_cat.png`。
pub const DEFAULT_OUTPUT_PREFIX: &str = "doctored_";

/// 24 位 RGB 像素的通道数。
pub const RGB_CHANNELS: usize = 3;

/// 32 位 RGBA 像素的通道数。
pub const RGBA_CHANNELS: usize = 4;

/// 每像素 2 字节格式 (灰度 + Alpha) 的通道数。
pub const LUMA_ALPHA_CHANNELS: usize = 2;
