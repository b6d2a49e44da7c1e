//! # bmp_filter 库
//!
//! 本库包含 24 位 BMP 图像的头部与像素编解码、边缘检测卷积和高斯噪声的核心逻辑。

// 声明库包含的所有模块。

pub mod cli;
pub mod codec;
pub mod constants;
pub mod convolution;
pub mod dump;
pub mod error;
pub mod handler;
pub mod header;
pub mod naming;
pub mod noise;
pub mod pixel;
