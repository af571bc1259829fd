//! # 命令处理逻辑模块
//!
//! 包含处理 `encode` 和 `decode` 子命令的高级业务逻辑。
//! 本模块负责协调图像文件的读写、调用核心隐写算法以及向用户报告结果。

use crate::cli::{DecodeArgs, EncodeArgs};
use crate::constants::BITS_PER_BYTE;
use crate::steganography::{capacity, decode_image, encode_image};
use anyhow::{Context, Result};
use colored::Colorize;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageReader, RgbaImage};
use log::debug;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// 读取任意已启用格式的图像，并转换为 8 位 RGBA 像素缓冲区。
///
/// # Errors
///
/// 文件不存在、无法打开或无法解码时返回错误。
pub fn load_carrier(path: &Path) -> Result<RgbaImage> {
    anyhow::ensure!(
        path.is_file(),
        "There is no image located at '{}'",
        path.to_string_lossy().red().bold()
    );

    let context = || {
        format!(
            "Unable to read image file: {}",
            path.to_string_lossy().red().bold()
        )
    };

    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .with_context(context)?
        .decode()
        .with_context(context)?
        .to_rgba8();

    debug!(
        "loaded {}x{} carrier from {}",
        image.width(),
        image.height(),
        path.display()
    );

    Ok(image)
}

/// 将像素缓冲区保存为 8 位 RGBA 的无损 PNG。
///
/// 输出必须逐通道无损，否则最低位中的数据会被破坏，因此不论输入格式如何都写成 PNG。
///
/// # Errors
///
/// 无法创建目标文件或编码失败时返回错误。
pub fn save_carrier(image: &RgbaImage, path: &Path) -> Result<()> {
    let context = || {
        format!(
            "Unable to write to target image file: {}",
            path.to_string_lossy().red().bold()
        )
    };

    let file = File::create(path).with_context(context)?;
    let encoder = PngEncoder::new_with_quality(
        BufWriter::new(file),
        CompressionType::Fast,
        FilterType::NoFilter,
    );
    image.write_with_encoder(encoder).with_context(context)?;

    Ok(())
}

/// 读取图像、隐藏文本并保存结果，返回实际写入的路径。
///
/// 未指定 `output` 时覆盖输入图像。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输入图像不存在或无法解码。
/// * 图像没有足够的空间来隐藏文本。
/// * 无法写入到目标图像文件。
pub fn encode_file(image_path: &Path, text: &str, output: Option<&Path>) -> Result<PathBuf> {
    let mut image = load_carrier(image_path)?;

    encode_image(&mut image, text).with_context(|| {
        format!(
            "Not enough space in the image to hide the text. \nImage capacity: {} characters",
            (capacity(&image) / BITS_PER_BYTE)
                .saturating_sub(1)
                .to_string()
                .green()
                .bold()
        )
    })?;

    let dest = output.unwrap_or(image_path).to_path_buf();
    save_carrier(&image, &dest)?;

    Ok(dest)
}

/// 读取图像并恢复其中隐藏的文本。
///
/// # Errors
///
/// 输入图像不存在或无法解码时返回错误。
pub fn decode_file(image_path: &Path) -> Result<String> {
    let image = load_carrier(image_path)?;
    Ok(decode_image(&image))
}

/// 处理 'Encode' 命令的执行逻辑。
///
/// # Arguments
///
/// * `args` - 包含输入路径、文本以及可选输出路径的 `EncodeArgs` 结构体。
pub fn handle_encode(args: EncodeArgs) -> Result<()> {
    let dest = encode_file(&args.image, &args.text, args.output.as_deref())?;

    println!(
        "Successfully encoded the image: {}",
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Decode' 命令的执行逻辑，把恢复的文本打印到标准输出。
///
/// # Arguments
///
/// * `args` - 包含图像路径的 `DecodeArgs` 结构体。
pub fn handle_decode(args: DecodeArgs) -> Result<()> {
    let text = decode_file(&args.image).with_context(|| {
        format!(
            "There was an error trying to decode '{}'",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    println!("{text}");
    Ok(())
}
