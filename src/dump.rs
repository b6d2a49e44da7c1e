//! # 文本转储模块
//!
//! 将位图的头部字段、54 个头部字节、每个像素以及每行的填充字节
//! 按固定的逐行格式写出。下游工具可能解析此格式，字段顺序与写法不可更改。

use crate::codec::read_row;
use crate::constants::BYTES_PER_PIXEL;
use crate::error::BmpResult;
use crate::header::BmpHeader;
use std::io::{Read, Write};

/// 写出 `header` 与随后从 `pixels` 读取的像素数据的文本转储。
///
/// 填充字节按文件中的实际值输出，而不是假定为 0。
///
/// # Arguments
///
/// * `name` - 转储第一行中带引号显示的文件名。
/// * `header` - 已解码的头部。
/// * `pixels` - 位于像素数据起点的字节源。
/// * `out` - 文本输出目标。
///
/// # Errors
///
/// 像素数据不足时返回 `BmpError::TruncatedPixelData`，读写失败时返回 `BmpError::Io`。
/// 出错前已写出的行保留在 `out` 中。
pub fn dump_bitmap<R: Read, W: Write>(
    name: &str,
    header: &BmpHeader,
    pixels: &mut R,
    out: &mut W,
) -> BmpResult<()> {
    write_header_fields(name, header, out)?;

    for (i, byte) in header.raw().iter().enumerate() {
        writeln!(out, "Byte[{i}] = {byte:03}")?;
    }

    let (width, padding) = (header.width(), header.padding());
    let mut row_buf = Vec::new();
    for row in 0..header.height() {
        read_row(pixels, row, width, padding, &mut row_buf)?;
        let (pixel_bytes, pad_bytes) = row_buf.split_at(width * BYTES_PER_PIXEL);

        for (col, bgr) in pixel_bytes.chunks_exact(BYTES_PER_PIXEL).enumerate() {
            writeln!(
                out,
                "RGB[{row},{col}] = {:03}.{:03}.{:03}",
                bgr[2], bgr[1], bgr[0]
            )?;
        }
        for (k, pad) in pad_bytes.iter().enumerate() {
            writeln!(out, "Padding[{k}] = {pad:03}")?;
        }
    }

    out.flush()?;
    Ok(())
}

fn write_header_fields<W: Write>(name: &str, header: &BmpHeader, out: &mut W) -> BmpResult<()> {
    let (file, info) = (&header.file, &header.info);

    writeln!(out, "\"{name}\"")?;
    // 类型字节按原始字节输出，不经过字符编码转换
    for magic in file.magic {
        out.write_all(b"Header.Type = ")?;
        out.write_all(&[magic, b'\n'])?;
    }
    writeln!(out, "Header.Size = {}", file.size)?;
    writeln!(out, "Header.Offset = {}", file.offset)?;
    writeln!(out, "InfoHeader.Size = {}", info.size)?;
    writeln!(out, "InfoHeader.Width = {}", info.width)?;
    writeln!(out, "InfoHeader.Height = {}", info.height)?;
    writeln!(out, "InfoHeader.Planes = {}", info.planes)?;
    writeln!(out, "InfoHeader.Bits = {}", info.bits_per_pixel)?;
    writeln!(out, "InfoHeader.Compression = {}", info.compression)?;
    writeln!(out, "InfoHeader.ImageSize = {}", info.image_size)?;
    writeln!(out, "InfoHeader.xResolution = {}", info.x_resolution)?;
    writeln!(out, "InfoHeader.yResolution = {}", info.y_resolution)?;
    writeln!(out, "InfoHeader.Colors = {}", info.colors)?;
    writeln!(out, "InfoHeader.ImportantColors = {}", info.important_colors)?;
    writeln!(out, "Padding = {}", header.padding())?;
    Ok(())
}
