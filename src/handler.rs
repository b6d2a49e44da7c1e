//! # 命令处理逻辑模块
//!
//! 包含处理 `inspect`、`edge` 和 `noise` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心编解码与变换函数以及向用户报告结果。

use crate::cli::{EdgeArgs, InspectArgs, NoiseArgs};
use crate::codec::Bitmap;
use crate::constants::{
    BMP_HEADER_SIZE, EDGE_KERNEL, EDGE_SUFFIX, NOISE_SUFFIX, STDDEV_MAX, STDDEV_MIN,
};
use crate::convolution::apply_kernel;
use crate::dump::dump_bitmap;
use crate::header::{decode_header, read_header};
use crate::naming::derive_output_path;
use crate::noise::{SeededSource, StdDev, add_gaussian_noise};
use anyhow::{Context, Result};
use colored::Colorize;
use std::fs::{self, File};
use std::io::{self, BufRead, BufWriter, Write};
use std::path::Path;
use tracing::info;

/// 处理 'Inspect' 命令的执行逻辑。
///
/// 读取 BMP 图像，将头部字段、54 个头部字节、每个像素的 RGB 值以及每行的填充字节
/// 按固定格式写入文本文件。此命令不检查位深度或压缩类型，任何头部都会被导出。
///
/// # Arguments
///
/// * `args` - 包含输入图像与输出文本路径的 `InspectArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入的图像文件，或无法创建输出文本文件。
/// * 图像不足 54 字节，无法构成完整头部。
/// * 像素数据或填充字节不完整。
pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let picture = read_image(&args.image)?;

    let out = File::create(&args.output).with_context(|| {
        format!(
            "Unable to create output text file: {}",
            args.output.to_string_lossy().red().bold()
        )
    })?;

    let mut pixels = picture.as_slice();
    let header = read_header(&mut pixels).with_context(|| {
        format!(
            "Failed to read the BMP header of '{}'.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    let name = args.image.to_string_lossy();
    dump_bitmap(&name, &header, &mut pixels, &mut BufWriter::new(out)).with_context(|| {
        format!(
            "Failed to dump the pixel data of '{}'. \nThe image may be truncated or corrupted.",
            name.red().bold()
        )
    })?;

    println!(
        "The bitmap details have been successfully written to: {}",
        args.output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Edge' 命令的执行逻辑。
///
/// 读取图像，用固定的 3x3 边缘检测卷积核处理内部像素 (边界像素保持不变)，
/// 再以原始头部字节写出到目标路径。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入图像，或图像不是未压缩的 24 位 BMP。
/// * 像素数据不完整或无法分配像素网格。
/// * 无法写入到目标图像文件。
pub fn handle_edge(args: EdgeArgs) -> Result<()> {
    let bitmap = load_bitmap(&args.image)?;
    let dest = args
        .dest
        .unwrap_or_else(|| derive_output_path(&args.image, EDGE_SUFFIX));

    let edges = apply_kernel(&bitmap.grid, &EDGE_KERNEL)
        .context("Failed to allocate the output pixel grid for edge detection.")?;
    info!(width = edges.width(), height = edges.height(), "applied edge kernel");

    let bitmap = bitmap
        .with_grid(edges)
        .context("The edge-detected grid does not match the image dimensions.")?;
    save_bitmap(&bitmap, &dest)
}

/// 处理 'Noise' 命令的执行逻辑。
///
/// 读取图像，确定标准差 (命令行参数或终端提示，超出 5 到 20 时改为 5 并提示用户)，
/// 为每个像素的每个通道叠加独立的高斯噪声，最后以原始头部字节写出。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入图像，或图像不是未压缩的 24 位 BMP。
/// * 无法从终端读取标准差。
/// * 无法写入到目标图像文件。
pub fn handle_noise(args: NoiseArgs) -> Result<()> {
    let mut bitmap = load_bitmap(&args.image)?;
    let dest = args
        .dest
        .unwrap_or_else(|| derive_output_path(&args.image, NOISE_SUFFIX));

    let stddev = match args.stddev {
        Some(value) => StdDev::validate(value),
        None => prompt_stddev(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    if stddev.was_coerced() {
        println!(
            "{}",
            "Standard deviation out of range. Setting to 5.".yellow().bold()
        );
    }

    let mut source = args
        .seed
        .map_or_else(SeededSource::from_time, SeededSource::from_seed);
    let applied = add_gaussian_noise(&mut bitmap.grid, stddev.value(), &mut source);
    info!(stddev = applied, "added gaussian noise");

    save_bitmap(&bitmap, &dest)
}

/// 提示用户输入标准差并校验范围。
///
/// 无法解析为数字的输入 (包括空输入) 视为超出范围。
///
/// # Errors
///
/// 读写终端失败时返回错误。
pub fn prompt_stddev<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> Result<StdDev> {
    write!(
        output,
        "Enter standard deviation for noise ({STDDEV_MIN} to {STDDEV_MAX}): "
    )?;
    output.flush()?;

    let mut line = String::new();
    input
        .read_line(&mut line)
        .context("Unable to read the standard deviation from the terminal.")?;

    Ok(line
        .trim()
        .parse::<f64>()
        .map_or(StdDev::Coerced { requested: f64::NAN }, StdDev::validate))
}

fn read_image(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    })
}

/// 读取并解码图像，确认其为可变换的 24 位未压缩 BMP。
fn load_bitmap(path: &Path) -> Result<Bitmap> {
    let picture = read_image(path)?;

    let header = decode_header(&picture)
        .and_then(|header| header.ensure_supported().map(|()| header))
        .with_context(|| {
            format!(
                "'{}' is not an uncompressed 24-bit BMP image.",
                path.to_string_lossy().red().bold()
            )
        })?;

    Bitmap::decode_pixels(header, &picture[BMP_HEADER_SIZE..]).with_context(|| {
        format!(
            "Failed to decode the pixel data of '{}'. \nThe file may be truncated or corrupted.",
            path.to_string_lossy().red().bold()
        )
    })
}

fn save_bitmap(bitmap: &Bitmap, dest: &Path) -> Result<()> {
    let bytes = bitmap
        .encode()
        .context("Failed to encode the transformed bitmap.")?;

    fs::write(dest, bytes).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "The transformed image has been successfully saved: {}",
        dest.to_string_lossy().green().bold()
    );
    Ok(())
}
