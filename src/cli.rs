//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，把 ASCII 文本藏进图像像素通道的最低位。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，把 ASCII 文本藏进图像像素通道的最低位，结果以无损 PNG 保存。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：encode (隐藏) 和 decode (恢复)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 从经过隐写的图像中读出隐藏的文本并打印。
    Decode(DecodeArgs),

    /// 把文本隐藏进图像，并以 PNG 格式保存。
    Encode(EncodeArgs),
}

/// 'decode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DecodeArgs {
    /// 已隐藏文本的图像文件路径。
    pub image: PathBuf,
}

/// 'encode' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct EncodeArgs {
    /// 用于隐写的输入图像文件路径。
    pub image: PathBuf,

    /// 要隐藏的 ASCII 文本。
    pub text: String,

    /// 结果图像的保存路径。省略时覆盖输入图像。
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}
