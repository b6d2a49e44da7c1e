//! # 错误类型模块
//!
//! 核心编解码与变换函数统一返回 `BmpError`。
//! 命令处理层 (`handler`) 再用 `anyhow` 为其附加上下文信息。

use thiserror::Error;

/// 位图解析、变换与写出过程中可能出现的错误。
#[derive(Error, Debug)]
pub enum BmpError {
    /// 可用字节不足 54 个，无法构成完整的文件头与信息头。
    #[error("malformed BMP header: expected 54 bytes, found {found}")]
    MalformedHeader { found: usize },

    /// 读取像素或行填充字节时数据提前结束。
    #[error("truncated pixel data in row {row}: expected {expected} bytes, found {found}")]
    TruncatedPixelData {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// 像素网格无法分配 (尺寸溢出或内存不足)。
    #[error("unable to allocate a {width}x{height} pixel grid")]
    AllocationFailure { width: usize, height: usize },

    /// 头部声明了本工具不支持的格式 (非 BM、非 24 位或带压缩)。
    #[error("unsupported bitmap: {0}")]
    Unsupported(String),

    /// 替换用的像素网格与头部声明的尺寸不一致。
    #[error("pixel grid is {found_width}x{found_height}, header expects {width}x{height}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        found_width: usize,
        found_height: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// 核心模块使用的结果类型别名。
pub type BmpResult<T> = Result<T, BmpError>;
