mod common;

use bmp_filter::{
    cli::{EdgeArgs, InspectArgs, NoiseArgs},
    codec::Bitmap,
    handler::{handle_edge, handle_inspect, handle_noise, prompt_stddev},
    noise::StdDev,
    pixel::Rgb,
};
use common::{build_bmp, gradient};
use image::{ImageBuffer, Rgb as ImageRgb, RgbImage};
use rand::RngCore;
use std::fs;
use std::io::{self, Cursor};
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用 `image` 库创建一个带有随机像素的 24 位 BMP 图像
fn create_test_image(path: &Path, width: u32, height: u32) -> RgbImage {
    let mut raw_pixels = vec![0u8; (width * height * 3) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    let img_buf: RgbImage = ImageBuffer::from_raw(width, height, raw_pixels)
        .expect("Buffer size must match the image dimensions.");
    img_buf.save(path).expect("Failed to create test image.");
    img_buf
}

/// 验证 2x2 图像经过边缘检测后完全不变 (所有像素都是边界像素)
#[test]
fn test_edge_on_tiny_image_keeps_every_pixel() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let input_path = dir.path().join("tiny.bmp");
    let pixels = [
        Rgb::new(255, 0, 0),
        Rgb::new(0, 255, 0),
        Rgb::new(0, 0, 255),
        Rgb::new(12, 34, 56),
    ];
    let original = build_bmp(2, 2, &pixels, 0);
    fs::write(&input_path, &original)?;

    // 2. 执行，不提供 dest 路径
    handle_edge(EdgeArgs {
        image: input_path,
        dest: None,
    })?;

    // 3. 验证默认输出路径与内容
    let output_path = dir.path().join("tiny-edge.bmp");
    assert!(
        output_path.exists(),
        "Default edge image should be created at: {:?}",
        output_path
    );
    let output = fs::read(&output_path)?;
    assert_eq!(&output[..54], &original[..54], "Header bytes must be copied verbatim.");
    assert_eq!(output.len(), original.len(), "Padding byte count must match.");
    assert_eq!(output, original, "Every border pixel must stay unchanged.");

    Ok(())
}

/// 验证手写解码器与 `image` 库写出的 BMP 一致，并且边缘检测结果可以被 `image` 重新读取
#[test]
fn test_decoder_agrees_with_image_crate() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let input_path = dir.path().join("random.bmp");
    let dest_path = dir.path().join("edges.bmp");
    let (width, height) = (7u32, 5u32);
    let reference = create_test_image(&input_path, width, height);

    // 2. 比较解码结果: 文件自下而上存储，第 0 行是图像最底部的一行
    let bitmap = Bitmap::decode(&fs::read(&input_path)?)?;
    assert_eq!(bitmap.header.info.bits_per_pixel, 24);
    assert_eq!(bitmap.grid.width(), width as usize);
    assert_eq!(bitmap.grid.height(), height as usize);
    for row in 0..height {
        for col in 0..width {
            let ImageRgb([red, green, blue]) = *reference.get_pixel(col, height - 1 - row);
            assert_eq!(
                bitmap.grid.get(row as usize, col as usize),
                Rgb::new(red, green, blue),
                "pixel ({row}, {col})"
            );
        }
    }

    // 3. 边缘检测并用 image 库读取结果
    handle_edge(EdgeArgs {
        image: input_path.clone(),
        dest: Some(dest_path.clone()),
    })?;
    let edges = image::open(&dest_path)?.to_rgb8();
    assert_eq!(edges.dimensions(), (width, height));

    // 4. 边界像素保持原值
    for col in 0..width {
        assert_eq!(edges.get_pixel(col, 0), reference.get_pixel(col, 0));
        assert_eq!(
            edges.get_pixel(col, height - 1),
            reference.get_pixel(col, height - 1)
        );
    }
    for y in 0..height {
        assert_eq!(edges.get_pixel(0, y), reference.get_pixel(0, y));
        assert_eq!(
            edges.get_pixel(width - 1, y),
            reference.get_pixel(width - 1, y)
        );
    }

    Ok(())
}

/// 验证噪声输出保留头部，并且相同种子得到相同结果
#[test]
fn test_noise_is_reproducible_with_seed() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let input_path = dir.path().join("scene.bmp");
    let original = build_bmp(5, 3, &gradient(5, 3), 0);
    fs::write(&input_path, &original)?;

    // 2. 使用默认输出路径执行
    handle_noise(NoiseArgs {
        image: input_path.clone(),
        dest: None,
        stddev: Some(12.0),
        seed: Some(7),
    })?;
    let default_path = dir.path().join("scene-noise.bmp");
    assert!(default_path.exists(), "Default noise image should be created.");
    let first = fs::read(&default_path)?;

    // 3. 相同种子，不同输出路径
    let second_path = dir.path().join("again.bmp");
    handle_noise(NoiseArgs {
        image: input_path,
        dest: Some(second_path.clone()),
        stddev: Some(12.0),
        seed: Some(7),
    })?;
    let second = fs::read(&second_path)?;

    // 4. 验证结果
    assert_eq!(first, second, "Same seed must produce identical output.");
    assert_eq!(&first[..54], &original[..54]);
    assert_eq!(first.len(), original.len());
    assert_ne!(first, original, "Noise should change at least one channel.");

    Ok(())
}

/// 验证超出范围的标准差不会导致失败
#[test]
fn test_noise_with_out_of_range_stddev() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input_path = dir.path().join("scene.bmp");
    let dest_path = dir.path().join("noisy.bmp");
    fs::write(&input_path, build_bmp(4, 4, &gradient(4, 4), 0))?;

    handle_noise(NoiseArgs {
        image: input_path,
        dest: Some(dest_path.clone()),
        stddev: Some(25.0),
        seed: Some(1),
    })?;

    let noisy = Bitmap::decode(&fs::read(&dest_path)?)?;
    assert_eq!((noisy.grid.width(), noisy.grid.height()), (4, 4));
    Ok(())
}

/// 验证 inspect 命令写出的文本转储
#[test]
fn test_handle_inspect_writes_dump() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let input_path = dir.path().join("dump.bmp");
    let text_path = dir.path().join("dump.txt");
    fs::write(&input_path, build_bmp(3, 2, &gradient(3, 2), 0))?;

    // 2. 执行
    handle_inspect(InspectArgs {
        image: input_path.clone(),
        output: text_path.clone(),
    })?;

    // 3. 验证结果: 17 行头部字段、54 行头部字节、6 个像素和每行 3 个填充字节
    let text = fs::read_to_string(&text_path)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 17 + 54 + 6 + 2 * 3);
    assert_eq!(lines[0], format!("\"{}\"", input_path.to_string_lossy()));
    assert_eq!(lines[16], "Padding = 3");
    assert_eq!(lines[71], "RGB[0,0] = 000.040.255");
    assert_eq!(lines[74], "Padding[0] = 000");

    Ok(())
}

/// 验证损坏或不受支持的输入会返回错误
#[test]
fn test_rejects_bad_input() -> anyhow::Result<()> {
    let dir = tempdir()?;

    // 头部不完整
    let short_path = dir.path().join("short.bmp");
    fs::write(&short_path, &build_bmp(2, 2, &gradient(2, 2), 0)[..40])?;
    let result = handle_edge(EdgeArgs {
        image: short_path.clone(),
        dest: None,
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("is not an uncompressed 24-bit BMP image"));
    }

    // 像素数据被截断
    let truncated_path = dir.path().join("truncated.bmp");
    let bytes = build_bmp(3, 3, &gradient(3, 3), 0);
    fs::write(&truncated_path, &bytes[..bytes.len() - 5])?;
    let result = handle_noise(NoiseArgs {
        image: truncated_path,
        dest: None,
        stddev: Some(10.0),
        seed: Some(3),
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Failed to decode the pixel data"));
    }

    // 输入文件不存在
    let result = handle_inspect(InspectArgs {
        image: dir.path().join("missing.bmp"),
        output: dir.path().join("missing.txt"),
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Unable to read image file"));
    }

    assert!(!dir.path().join("short-edge.bmp").exists());
    Ok(())
}

/// 验证头部声明超大尺寸但没有像素数据的文件被快速拒绝
#[test]
fn test_oversized_header_is_rejected() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let input_path = dir.path().join("huge.bmp");
    let mut bytes = build_bmp(1, 1, &gradient(1, 1), 0);
    bytes[18..22].copy_from_slice(&30000i32.to_le_bytes());
    bytes[22..26].copy_from_slice(&30000i32.to_le_bytes());
    bytes.truncate(54);
    fs::write(&input_path, &bytes)?;

    let result = handle_edge(EdgeArgs {
        image: input_path.clone(),
        dest: None,
    });
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Failed to decode the pixel data"));
    }

    let result = handle_noise(NoiseArgs {
        image: input_path,
        dest: None,
        stddev: Some(8.0),
        seed: Some(5),
    });
    assert!(result.is_err());
    assert!(!dir.path().join("huge-noise.bmp").exists());
    Ok(())
}

/// 验证终端提示输入的解析与校验
#[test]
fn test_prompt_stddev() -> anyhow::Result<()> {
    let mut output = Vec::new();
    let stddev = prompt_stddev(&mut Cursor::new("12\n"), &mut output)?;
    assert_eq!(stddev, StdDev::Accepted(12.0));
    assert!(String::from_utf8(output)?.contains("Enter standard deviation for noise (5 to 20)"));

    let stddev = prompt_stddev(&mut Cursor::new("3\n"), &mut io::sink())?;
    assert_eq!(stddev.value(), 5.0);
    assert!(stddev.was_coerced());

    let stddev = prompt_stddev(&mut Cursor::new("twelve\n"), &mut io::sink())?;
    assert!(stddev.was_coerced());

    let stddev = prompt_stddev(&mut Cursor::new(""), &mut io::sink())?;
    assert!(stddev.was_coerced());
    Ok(())
}
