//! # stenocoder 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：文本与位流的互相转换，
//! 以及把位流写入 / 读出 RGBA 像素通道的最低有效位。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod error;
pub mod handler;
pub mod steganography;

pub use error::CodecError;
pub use steganography::{decode_image, encode_image};
