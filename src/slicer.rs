//! # 比特组切片模块
//!
//! 把任意字节序列按固定宽度 (1、2、4、8 比特) 切成比特组。
//! 每个比特组以 "AND 掩码" 的形式返回：低 `width` 位是组的值，其余高位全部置 1，
//! 这样 `carrier & mask` 恰好只清除值为 0 的那些低位。
//!
//! 比特顺序为字节内大端：每个字节中最高位所在的组排在最前。

use crate::constants::BITS_PER_BYTE;
use crate::error::{Result, StegoError};
use std::fmt;
use std::str::FromStr;

/// 每个载体字节读写的比特数。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum BitWidth {
    #[default]
    One = 1,
    Two = 2,
    Four = 4,
    Eight = 8,
}

impl BitWidth {
    /// 所有受支持的宽度，从小到大。
    pub const ALL: [BitWidth; 4] = [BitWidth::One, BitWidth::Two, BitWidth::Four, BitWidth::Eight];

    /// 宽度的比特数。
    pub const fn bits(self) -> usize {
        self as usize
    }

    /// 覆盖低 `width` 位的掩码。
    pub const fn low_mask(self) -> u8 {
        match self {
            BitWidth::One => 0x01,
            BitWidth::Two => 0x03,
            BitWidth::Four => 0x0F,
            BitWidth::Eight => 0xFF,
        }
    }

    /// 一个字节能切出多少个比特组。
    pub const fn groups_per_byte(self) -> usize {
        BITS_PER_BYTE / self.bits()
    }
}

impl TryFrom<u8> for BitWidth {
    type Error = StegoError;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            1 => Ok(BitWidth::One),
            2 => Ok(BitWidth::Two),
            4 => Ok(BitWidth::Four),
            8 => Ok(BitWidth::Eight),
            other => Err(StegoError::InvalidBitWidth(other)),
        }
    }
}

impl FromStr for BitWidth {
    type Err = StegoError;

    fn from_str(s: &str) -> Result<Self> {
        let value: u8 = s
            .trim()
            .parse()
            .map_err(|_| StegoError::InvalidBitWidth(0))?;
        BitWidth::try_from(value)
    }
}

impl fmt::Display for BitWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

/// 对一段只读字节缓冲区按固定宽度寻址比特组。
///
/// 构造后不可变，也从不修改源缓冲区。
///
/// # Examples
///
/// ```
/// use lsb_carrier::slicer::{BitSlicer, BitWidth};
///
/// let slicer = BitSlicer::new(b"HELLO", BitWidth::Four);
/// assert_eq!(slicer.group_count(), 10);
/// assert_eq!(slicer.group(0)?, 0xF4);
/// # Ok::<(), lsb_carrier::error::StegoError>(())
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BitSlicer<'a> {
    data: &'a [u8],
    width: BitWidth,
    group_count: usize,
}

impl<'a> BitSlicer<'a> {
    pub fn new(data: &'a [u8], width: BitWidth) -> Self {
        Self {
            data,
            width,
            group_count: data.len() * BITS_PER_BYTE / width.bits(),
        }
    }

    pub fn width(&self) -> BitWidth {
        self.width
    }

    /// 比特组总数，即 `len * 8 / width`。宽度整除 8，因此没有余数。
    pub fn group_count(&self) -> usize {
        self.group_count
    }

    /// 返回第 `index` 个比特组的 AND 掩码形式。
    ///
    /// # Errors
    ///
    /// 当 `index >= group_count()` 时返回 [`StegoError::IndexOutOfRange`]。
    pub fn group(&self, index: usize) -> Result<u8> {
        if index >= self.group_count {
            return Err(StegoError::IndexOutOfRange {
                index,
                count: self.group_count,
            });
        }

        Ok(self.mask_at(index))
    }

    /// 按顺序遍历全部比特组。
    pub fn groups(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.group_count).map(|index| self.mask_at(index))
    }

    fn mask_at(&self, index: usize) -> u8 {
        let per_byte = self.width.groups_per_byte();
        let byte = self.data[index / per_byte];
        let offset = (per_byte - 1 - index % per_byte) * self.width.bits();
        let low = self.width.low_mask();

        // 宽度为 8 时 offset 恒为 0，结果就是原字节。
        ((byte >> offset) & low) | !low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const HELLO: [u8; 5] = [0x48, 0x45, 0x4C, 0x4C, 0x4F];

    #[test]
    fn test_hello_group_counts() {
        let counts: Vec<usize> = BitWidth::ALL
            .iter()
            .map(|&w| BitSlicer::new(&HELLO, w).group_count())
            .collect();
        assert_eq!(counts, vec![40, 20, 10, 5]);
    }

    #[test]
    fn test_hello_one_bit() {
        let slicer = BitSlicer::new(&HELLO, BitWidth::One);
        assert_eq!(slicer.group(0).unwrap(), 0xFE);
        assert_eq!(slicer.group(1).unwrap(), 0xFF);
        assert_eq!(slicer.group(4).unwrap(), 0xFF);
        // 0x4F 的最低位
        assert_eq!(slicer.group(39).unwrap(), 0xFF);
    }

    #[test]
    fn test_hello_two_bits() {
        let slicer = BitSlicer::new(&HELLO, BitWidth::Two);
        let first: Vec<u8> = (0..4).map(|i| slicer.group(i).unwrap()).collect();
        assert_eq!(first, vec![0xFD, 0xFC, 0xFE, 0xFC]);
    }

    #[test]
    fn test_hello_four_and_eight_bits() {
        let four = BitSlicer::new(&HELLO, BitWidth::Four);
        assert_eq!(four.group(0).unwrap(), 0xF4);
        assert_eq!(four.group(1).unwrap(), 0xF8);

        let eight = BitSlicer::new(&HELLO, BitWidth::Eight);
        assert_eq!(eight.group(0).unwrap(), 0x48);
        assert_eq!(eight.group(1).unwrap(), 0x45);
    }

    #[test]
    fn test_empty_buffer_has_no_groups() {
        for width in BitWidth::ALL {
            let slicer = BitSlicer::new(&[], width);
            assert_eq!(slicer.group_count(), 0);
            assert!(matches!(
                slicer.group(0),
                Err(StegoError::IndexOutOfRange { index: 0, count: 0 })
            ));
        }
    }

    #[test]
    fn test_index_past_end_is_rejected() {
        for width in BitWidth::ALL {
            let slicer = BitSlicer::new(&HELLO, width);
            let count = slicer.group_count();
            assert!(slicer.group(count - 1).is_ok());
            assert!(matches!(
                slicer.group(count),
                Err(StegoError::IndexOutOfRange { .. })
            ));
        }
    }

    #[test]
    fn test_invalid_width_values() {
        for value in [0u8, 3, 5, 6, 7, 9, 16] {
            assert!(matches!(
                BitWidth::try_from(value),
                Err(StegoError::InvalidBitWidth(v)) if v == value
            ));
        }
        assert_eq!("4".parse::<BitWidth>().unwrap(), BitWidth::Four);
        assert!("four".parse::<BitWidth>().is_err());
    }

    #[test]
    fn test_groups_iterator_matches_indexed_access() {
        let slicer = BitSlicer::new(&HELLO, BitWidth::Two);
        let indexed: Vec<u8> = (0..slicer.group_count())
            .map(|i| slicer.group(i).unwrap())
            .collect();
        assert_eq!(slicer.groups().collect::<Vec<_>>(), indexed);
    }

    fn width_strategy() -> impl Strategy<Value = BitWidth> {
        prop::sample::select(BitWidth::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_group_count_is_exact(data in prop::collection::vec(any::<u8>(), 0..64), width in width_strategy()) {
            let slicer = BitSlicer::new(&data, width);
            prop_assert_eq!(slicer.group_count() * width.bits(), data.len() * 8);
        }

        #[test]
        fn prop_masks_keep_high_bits_set(data in prop::collection::vec(any::<u8>(), 1..64), width in width_strategy()) {
            let slicer = BitSlicer::new(&data, width);
            let high = !width.low_mask();
            for mask in slicer.groups() {
                prop_assert_eq!(mask & high, high);
            }
        }

        #[test]
        fn prop_groups_reassemble_source(data in prop::collection::vec(any::<u8>(), 0..64), width in width_strategy()) {
            let slicer = BitSlicer::new(&data, width);
            let per_byte = width.groups_per_byte();
            let groups: Vec<u8> = slicer.groups().map(|m| m & width.low_mask()).collect();
            let rebuilt: Vec<u8> = groups
                .chunks(per_byte)
                .map(|chunk| chunk.iter().fold(0u16, |acc, &g| (acc << width.bits()) | g as u16) as u8)
                .collect();
            prop_assert_eq!(rebuilt, data);
        }
    }
}
