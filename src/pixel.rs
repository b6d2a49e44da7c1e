//! # 像素与像素网格模块
//!
//! `PixelGrid` 使用一块连续的缓冲区按 `row * width + col` 存放像素，
//! 每个网格实例只有一个所有者。

use crate::error::{BmpError, BmpResult};

/// 内存中的像素，按红、绿、蓝顺序保存三个独立的通道。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// 由文件中的 (蓝, 绿, 红) 字节构造像素。
    pub fn from_bgr(bytes: [u8; 3]) -> Self {
        Self::new(bytes[2], bytes[1], bytes[0])
    }

    /// 转换为文件中的 (蓝, 绿, 红) 字节顺序。
    pub fn to_bgr(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }
}

/// 将整数饱和到单字节通道范围 [0, 255]。
pub fn clamp(value: i64) -> u8 {
    value.clamp(0, i64::from(u8::MAX)) as u8
}

/// `height` 行、`width` 列的二维像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Rgb>,
}

impl PixelGrid {
    /// 分配一个所有像素均为黑色的网格。
    ///
    /// # Errors
    ///
    /// 像素总数溢出或内存不足时返回 `BmpError::AllocationFailure`。
    pub fn try_new(width: usize, height: usize) -> BmpResult<Self> {
        let alloc_failure = || BmpError::AllocationFailure { width, height };
        let len = width.checked_mul(height).ok_or_else(alloc_failure)?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| alloc_failure())?;
        pixels.resize(len, Rgb::default());

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// 用已有的像素缓冲区构造网格，长度必须等于 `width * height`。
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgb>) -> Option<Self> {
        (width.checked_mul(height)? == pixels.len()).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// 读取 (row, col) 处的像素。越界时 panic。
    pub fn get(&self, row: usize, col: usize) -> Rgb {
        self.pixels[self.index(row, col)]
    }

    /// 写入 (row, col) 处的像素。越界时 panic。
    pub fn set(&mut self, row: usize, col: usize, pixel: Rgb) {
        let index = self.index(row, col);
        self.pixels[index] = pixel;
    }

    pub fn pixels_mut(&mut self) -> &mut [Rgb] {
        &mut self.pixels
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of bounds for {}x{} grid",
            self.width,
            self.height
        );
        row * self.width + col
    }
}
