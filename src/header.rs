//! # 位图头部编解码模块
//!
//! 按固定偏移量逐字段解析 54 字节的文件头与信息头 (小端序)，
//! 不依赖任何结构体内存布局。
//! 写出时从不根据字段重建头部，而是原样输出保存下来的 54 个原始字节。

use crate::constants::{
    BMP_HEADER_SIZE, BYTES_PER_PIXEL, FILE_HEADER_SIZE, ROW_ALIGNMENT, SUPPORTED_BITS_PER_PIXEL,
};
use crate::error::{BmpError, BmpResult};
use std::io::Read;

/// 14 字节的文件头 (BITMAPFILEHEADER)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// 魔数，通常为 "BM"。
    pub magic: [u8; 2],
    /// 文件总大小 (字节)。
    pub size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// 像素数据相对文件开头的偏移量。
    pub offset: u32,
}

/// 40 字节的信息头 (BITMAPINFOHEADER)。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub size: u32,
    pub width: i32,
    /// 正数表示自下而上存储，负数表示自上而下存储。
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    /// 水平分辨率 (像素/米)。
    pub x_resolution: i32,
    /// 垂直分辨率 (像素/米)。
    pub y_resolution: i32,
    pub colors: u32,
    pub important_colors: u32,
}

/// 解码后的完整头部，同时保留原始字节以便逐字节写回。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BmpHeader {
    pub file: FileHeader,
    pub info: InfoHeader,
    raw: [u8; BMP_HEADER_SIZE],
}

impl BmpHeader {
    /// 读入时的 54 个原始头部字节。
    pub fn raw(&self) -> &[u8; BMP_HEADER_SIZE] {
        &self.raw
    }

    /// 网格列数 (宽度的绝对值)。
    pub fn width(&self) -> usize {
        self.info.width.unsigned_abs() as usize
    }

    /// 网格行数 (高度的绝对值)，行顺序保持文件中的存储顺序。
    pub fn height(&self) -> usize {
        self.info.height.unsigned_abs() as usize
    }

    /// 每行末尾的填充字节数，始终由宽度重新计算。
    pub fn padding(&self) -> usize {
        row_padding(self.width())
    }

    /// 检查头部是否描述了一个可以变换的未压缩 24 位位图。
    ///
    /// # Errors
    ///
    /// 魔数不是 "BM"、位深度不是 24 或存在压缩时返回 `BmpError::Unsupported`。
    pub fn ensure_supported(&self) -> BmpResult<()> {
        if &self.file.magic != b"BM" {
            return Err(BmpError::Unsupported(format!(
                "bad magic bytes {:?}",
                String::from_utf8_lossy(&self.file.magic)
            )));
        }
        if self.info.bits_per_pixel != SUPPORTED_BITS_PER_PIXEL {
            return Err(BmpError::Unsupported(format!(
                "{} bits per pixel (only 24 is supported)",
                self.info.bits_per_pixel
            )));
        }
        if self.info.compression != 0 {
            return Err(BmpError::Unsupported(format!(
                "compression type {} (only uncompressed images are supported)",
                self.info.compression
            )));
        }
        Ok(())
    }
}

/// 计算一行像素之后需要补齐的字节数，结果总在 [0, 3] 之间。
pub fn row_padding(width: usize) -> usize {
    let row_bytes = width.wrapping_mul(BYTES_PER_PIXEL);
    (ROW_ALIGNMENT - row_bytes % ROW_ALIGNMENT) % ROW_ALIGNMENT
}

/// 从字节缓冲区开头解码文件头与信息头。
///
/// 超出 54 字节的部分会被忽略。
///
/// # Errors
///
/// 缓冲区不足 54 字节时返回 `BmpError::MalformedHeader`。
pub fn decode_header(bytes: &[u8]) -> BmpResult<BmpHeader> {
    let raw: [u8; BMP_HEADER_SIZE] = bytes
        .get(..BMP_HEADER_SIZE)
        .and_then(|head| head.try_into().ok())
        .ok_or(BmpError::MalformedHeader { found: bytes.len() })?;

    let file = FileHeader {
        magic: [raw[0], raw[1]],
        size: le_u32(&raw, 2),
        reserved1: le_u16(&raw, 6),
        reserved2: le_u16(&raw, 8),
        offset: le_u32(&raw, 10),
    };

    let info_at = FILE_HEADER_SIZE;
    let info = InfoHeader {
        size: le_u32(&raw, info_at),
        width: le_i32(&raw, info_at + 4),
        height: le_i32(&raw, info_at + 8),
        planes: le_u16(&raw, info_at + 12),
        bits_per_pixel: le_u16(&raw, info_at + 14),
        compression: le_u32(&raw, info_at + 16),
        image_size: le_u32(&raw, info_at + 20),
        x_resolution: le_i32(&raw, info_at + 24),
        y_resolution: le_i32(&raw, info_at + 28),
        colors: le_u32(&raw, info_at + 32),
        important_colors: le_u32(&raw, info_at + 36),
    };

    Ok(BmpHeader { file, info, raw })
}

/// 从字节源读取并解码 54 字节头部，读取位置停在像素数据起点。
///
/// # Errors
///
/// 数据源提前结束时返回 `BmpError::MalformedHeader`，读取失败时返回 `BmpError::Io`。
pub fn read_header<R: Read>(reader: &mut R) -> BmpResult<BmpHeader> {
    let mut head = Vec::with_capacity(BMP_HEADER_SIZE);
    reader
        .take(BMP_HEADER_SIZE as u64)
        .read_to_end(&mut head)?;
    decode_header(&head)
}

fn le_u16(raw: &[u8; BMP_HEADER_SIZE], at: usize) -> u16 {
    u16::from_le_bytes([raw[at], raw[at + 1]])
}

fn le_u32(raw: &[u8; BMP_HEADER_SIZE], at: usize) -> u32 {
    u32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}

fn le_i32(raw: &[u8; BMP_HEADER_SIZE], at: usize) -> i32 {
    i32::from_le_bytes([raw[at], raw[at + 1], raw[at + 2], raw[at + 3]])
}
