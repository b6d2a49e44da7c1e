//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款处理 24 位未压缩 BMP 图像的命令行工具：查看头部与像素、边缘检测、添加高斯噪声。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款处理 24 位未压缩 BMP 图像的命令行工具：将头部与像素导出为文本、应用边缘检测卷积，或添加高斯噪声。"
)]
pub struct Cli {
    /// 输出调试日志。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：inspect (查看)、edge (边缘检测) 和 noise (噪声)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 将 BMP 图像的头部字段、头部字节和每个像素写入文本文件。
    Inspect(InspectArgs),

    /// 应用 3x3 边缘检测卷积，结果保存为 "<原文件名>-edge.bmp"。
    Edge(EdgeArgs),

    /// 为每个通道添加高斯噪声，结果保存为 "<原文件名>-noise.bmp"。
    Noise(NoiseArgs),
}

/// 'inspect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// 要查看的 BMP 图像路径。
    pub image: PathBuf,

    /// 文本转储的输出路径。
    pub output: PathBuf,
}

/// 'edge' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EdgeArgs {
    /// 输入的 BMP 图像路径。
    pub image: PathBuf,

    /// 结果图像的输出路径。省略时使用 "<原文件名>-edge.bmp"。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,
}

/// 'noise' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct NoiseArgs {
    /// 输入的 BMP 图像路径。
    pub image: PathBuf,

    /// 结果图像的输出路径。省略时使用 "<原文件名>-noise.bmp"。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 噪声的标准差 (5 到 20)。省略时在终端中提示输入。
    #[arg(short, long)]
    pub stddev: Option<f64>,

    /// 随机数种子。省略时以当前时间为种子。
    #[arg(long)]
    pub seed: Option<u64>,
}
