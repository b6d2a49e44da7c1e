#![allow(dead_code)]

use bmp_filter::header::row_padding;
use bmp_filter::pixel::Rgb;

/// 构造一个 24 位未压缩 BMP 文件的完整字节内容
///
/// `pixels` 按文件中的行顺序排列，每行末尾填充 `pad_byte`
pub fn build_bmp(width: i32, height: i32, pixels: &[Rgb], pad_byte: u8) -> Vec<u8> {
    let columns = width.unsigned_abs() as usize;
    let rows = height.unsigned_abs() as usize;
    assert_eq!(pixels.len(), columns * rows, "pixel count must match dimensions");

    let padding = row_padding(columns);
    let image_size = ((columns * 3 + padding) * rows) as u32;

    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&(54 + image_size).to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&image_size.to_le_bytes());
    bytes.extend_from_slice(&2835i32.to_le_bytes());
    bytes.extend_from_slice(&2835i32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    for row in pixels.chunks(columns.max(1)) {
        for pixel in row {
            bytes.extend_from_slice(&pixel.to_bgr());
        }
        bytes.extend(std::iter::repeat_n(pad_byte, padding));
    }
    bytes
}

/// 生成一组颜色各不相同的像素
pub fn gradient(width: usize, height: usize) -> Vec<Rgb> {
    (0..width * height)
        .map(|i| Rgb::new((i * 7) as u8, (i * 13 + 40) as u8, u8::MAX - (i * 3) as u8))
        .collect()
}
