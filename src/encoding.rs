//! # 文本编码模块
//!
//! 负责把待隐藏的字符串转换为字节，并估算给定字节数最多能容纳多少字符。

use crate::error::{Result, StegoError};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextEncoding {
    #[default]
    Utf8,
    Utf16Le,
    Utf16Be,
    Utf32Le,
    Utf32Be,
    Ascii,
}

impl TextEncoding {
    pub const ALL: [TextEncoding; 6] = [
        TextEncoding::Utf8,
        TextEncoding::Utf16Le,
        TextEncoding::Utf16Be,
        TextEncoding::Utf32Le,
        TextEncoding::Utf32Be,
        TextEncoding::Ascii,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
            TextEncoding::Utf32Le => "UTF-32LE",
            TextEncoding::Utf32Be => "UTF-32BE",
            TextEncoding::Ascii => "US-ASCII",
        }
    }

    /// 单个字符至少占用的字节数。
    pub const fn min_bytes_per_char(self) -> usize {
        match self {
            TextEncoding::Utf8 | TextEncoding::Ascii => 1,
            TextEncoding::Utf16Le | TextEncoding::Utf16Be => 2,
            TextEncoding::Utf32Le | TextEncoding::Utf32Be => 4,
        }
    }

    /// `bytes` 个字节最多能解码出的字符数。
    ///
    /// 这是上界而非保证：多字节字符会让实际可容纳的字符更少，
    /// 调用方必须以编码后的字节长度为准。
    pub const fn max_chars_for(self, bytes: usize) -> usize {
        bytes / self.min_bytes_per_char()
    }

    /// 将文本编码为字节 (不带 BOM)。
    ///
    /// # Errors
    ///
    /// ASCII 遇到非 ASCII 字符时返回 [`StegoError::Unencodable`]。
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        let bytes = match self {
            TextEncoding::Utf8 => text.as_bytes().to_vec(),
            TextEncoding::Utf16Le => text.encode_utf16().flat_map(u16::to_le_bytes).collect(),
            TextEncoding::Utf16Be => text.encode_utf16().flat_map(u16::to_be_bytes).collect(),
            TextEncoding::Utf32Le => text.chars().flat_map(|c| (c as u32).to_le_bytes()).collect(),
            TextEncoding::Utf32Be => text.chars().flat_map(|c| (c as u32).to_be_bytes()).collect(),
            TextEncoding::Ascii => {
                if let Some(character) = text.chars().find(|c| !c.is_ascii()) {
                    return Err(StegoError::Unencodable {
                        encoding: self.name(),
                        character,
                    });
                }
                text.as_bytes().to_vec()
            }
        };

        Ok(bytes)
    }
}

impl FromStr for TextEncoding {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self> {
        let label = s.trim().to_ascii_lowercase().replace('_', "-");
        match label.as_str() {
            "utf-8" | "utf8" => Ok(TextEncoding::Utf8),
            "utf-16" | "utf16" | "utf-16le" | "utf16le" | "unicode" => Ok(TextEncoding::Utf16Le),
            "utf-16be" | "utf16be" => Ok(TextEncoding::Utf16Be),
            "utf-32" | "utf32" | "utf-32le" | "utf32le" => Ok(TextEncoding::Utf32Le),
            "utf-32be" | "utf32be" => Ok(TextEncoding::Utf32Be),
            "ascii" | "us-ascii" => Ok(TextEncoding::Ascii),
            _ => Err(StegoError::UnknownEncoding(s.to_string())),
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
