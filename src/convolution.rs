//! # 卷积模块
//!
//! 对内部像素应用 3x3 整数卷积核。位于第一行、最后一行、第一列或最后一列的
//! 边界像素原样复制，不做卷积。因此宽或高为 1 或 2 的图像保持不变。

use crate::error::BmpResult;
use crate::pixel::{PixelGrid, Rgb, clamp};

/// 3x3 整数卷积核，`kernel[m + 1][n + 1]` 对应偏移 (m, n)。
pub type Kernel3 = [[i32; 3]; 3];

/// 对网格应用卷积核，返回尺寸相同的新网格。
///
/// 所有求和都读取原网格，输出写入独立分配的网格，
/// 每个通道分别累加后饱和到 [0, 255]。
///
/// # Errors
///
/// 输出网格无法分配时返回 `BmpError::AllocationFailure`。
pub fn apply_kernel(source: &PixelGrid, kernel: &Kernel3) -> BmpResult<PixelGrid> {
    let (width, height) = (source.width(), source.height());
    let mut output = PixelGrid::try_new(width, height)?;

    for row in 0..height {
        for col in 0..width {
            let border = row == 0 || row + 1 == height || col == 0 || col + 1 == width;
            let pixel = if border {
                source.get(row, col)
            } else {
                convolve_at(source, kernel, row, col)
            };
            output.set(row, col, pixel);
        }
    }

    Ok(output)
}

/// 计算内部像素 (row, col) 的卷积结果，调用方保证 3x3 邻域全部在网格内。
fn convolve_at(source: &PixelGrid, kernel: &Kernel3, row: usize, col: usize) -> Rgb {
    // 9 个 i32 系数与 u8 通道的乘积之和不会超出 i64
    let (mut red, mut green, mut blue) = (0i64, 0i64, 0i64);

    for (m, kernel_row) in kernel.iter().enumerate() {
        for (n, &factor) in kernel_row.iter().enumerate() {
            let neighbor = source.get(row + m - 1, col + n - 1);
            let factor = i64::from(factor);
            red += factor * i64::from(neighbor.red);
            green += factor * i64::from(neighbor.green);
            blue += factor * i64::from(neighbor.blue);
        }
    }

    Rgb::new(clamp(red), clamp(green), clamp(blue))
}
