//! # 像素网格编解码模块
//!
//! 文件中的像素按行存储，每个像素为 (蓝, 绿, 红) 三个字节，
//! 每行末尾附加若干填充字节使行长度为 4 的倍数。
//! 本模块不做垂直翻转: 读入的行顺序就是写出的行顺序。

use crate::constants::{BMP_HEADER_SIZE, BYTES_PER_PIXEL};
use crate::error::{BmpError, BmpResult};
use crate::header::{BmpHeader, decode_header};
use crate::pixel::{PixelGrid, Rgb};
use std::io::{Read, Write};
use tracing::debug;

/// 从字节源解码 `height` 行、每行 `width` 个像素的网格，并丢弃每行的填充字节。
///
/// # Errors
///
/// * 像素或填充字节不足时返回 `BmpError::TruncatedPixelData`。
/// * 网格无法分配时返回 `BmpError::AllocationFailure`。
pub fn decode_grid<R: Read>(
    reader: &mut R,
    width: usize,
    height: usize,
    padding: usize,
) -> BmpResult<PixelGrid> {
    let mut grid = PixelGrid::try_new(width, height)?;
    let mut row_buf = Vec::new();

    for row in 0..height {
        read_row(reader, row, width, padding, &mut row_buf)?;
        row_buf
            .chunks_exact(BYTES_PER_PIXEL)
            .take(width)
            .enumerate()
            .for_each(|(col, bgr)| grid.set(row, col, Rgb::from_bgr([bgr[0], bgr[1], bgr[2]])));
    }

    Ok(grid)
}

/// 读取一整行 (像素字节加填充字节) 到 `buf`，成功后 `buf` 长度恰为
/// `width * 3 + padding`。
pub(crate) fn read_row<R: Read>(
    reader: &mut R,
    row: usize,
    width: usize,
    padding: usize,
    buf: &mut Vec<u8>,
) -> BmpResult<()> {
    let expected = width * BYTES_PER_PIXEL + padding;
    buf.clear();
    reader.by_ref().take(expected as u64).read_to_end(buf)?;

    if buf.len() < expected {
        return Err(BmpError::TruncatedPixelData {
            row,
            expected,
            found: buf.len(),
        });
    }
    Ok(())
}

/// 将网格按 (蓝, 绿, 红) 顺序写出，每行之后写入 `padding` 个零字节。
///
/// # Errors
///
/// 写入失败时返回 `BmpError::Io`。
pub fn encode_grid<W: Write>(grid: &PixelGrid, padding: usize, writer: &mut W) -> BmpResult<()> {
    let zeros = vec![0u8; padding];
    let mut row_buf = Vec::with_capacity(grid.width() * BYTES_PER_PIXEL + padding);

    for row in 0..grid.height() {
        row_buf.clear();
        for col in 0..grid.width() {
            row_buf.extend_from_slice(&grid.get(row, col).to_bgr());
        }
        row_buf.extend_from_slice(&zeros);
        writer.write_all(&row_buf)?;
    }
    Ok(())
}

/// 一张已解码的位图: 原始头部加像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub header: BmpHeader,
    pub grid: PixelGrid,
}

impl Bitmap {
    /// 从完整的文件内容解码头部与像素。像素数据紧跟在 54 字节头部之后读取。
    ///
    /// # Errors
    ///
    /// 参见 [`decode_header`] 与 [`Bitmap::decode_pixels`]。
    pub fn decode(bytes: &[u8]) -> BmpResult<Self> {
        let header = decode_header(bytes)?;
        Self::decode_pixels(header, &bytes[BMP_HEADER_SIZE..])
    }

    /// 用已解码的头部解码紧随其后的像素数据。
    ///
    /// 分配网格之前先按头部声明的尺寸核对 `pixel_data` 的长度，
    /// 头部伪造的超大尺寸不会触发大块内存分配。
    ///
    /// # Errors
    ///
    /// * 像素数据不足时返回 `BmpError::TruncatedPixelData`，`row` 为第一行不完整的行。
    /// * 网格无法分配时返回 `BmpError::AllocationFailure`。
    pub fn decode_pixels(header: BmpHeader, mut pixel_data: &[u8]) -> BmpResult<Self> {
        let (width, height, padding) = (header.width(), header.height(), header.padding());
        debug!(width, height, padding, "decoded bitmap header");

        check_pixel_data_len(width, height, padding, pixel_data.len())?;
        let grid = decode_grid(&mut pixel_data, width, height, padding)?;
        Ok(Self { header, grid })
    }

    /// 写出原始头部字节与当前像素网格。
    pub fn write_to<W: Write>(&self, writer: &mut W) -> BmpResult<()> {
        writer.write_all(self.header.raw())?;
        encode_grid(&self.grid, self.header.padding(), writer)
    }

    /// 编码为完整的文件内容。
    pub fn encode(&self) -> BmpResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.write_to(&mut bytes)?;
        Ok(bytes)
    }

    /// 用新的网格替换像素，头部保持不变。
    ///
    /// # Errors
    ///
    /// 新网格尺寸与头部声明的不一致时返回 `BmpError::DimensionMismatch`。
    pub fn with_grid(self, grid: PixelGrid) -> BmpResult<Self> {
        let (width, height) = (self.header.width(), self.header.height());
        if (grid.width(), grid.height()) != (width, height) {
            return Err(BmpError::DimensionMismatch {
                width,
                height,
                found_width: grid.width(),
                found_height: grid.height(),
            });
        }
        Ok(Self { grid, ..self })
    }
}

/// 核对像素数据是否足够容纳 `height` 行，不足时报告第一行不完整的行。
fn check_pixel_data_len(
    width: usize,
    height: usize,
    padding: usize,
    available: usize,
) -> BmpResult<()> {
    let row_len = width
        .checked_mul(BYTES_PER_PIXEL)
        .and_then(|bytes| bytes.checked_add(padding))
        .ok_or(BmpError::AllocationFailure { width, height })?;

    let enough = row_len
        .checked_mul(height)
        .is_some_and(|required| required <= available);
    if enough || row_len == 0 {
        return Ok(());
    }

    let complete_rows = available / row_len;
    Err(BmpError::TruncatedPixelData {
        row: complete_rows,
        expected: row_len,
        found: available - complete_rows * row_len,
    })
}
