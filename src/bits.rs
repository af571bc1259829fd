//! # 文本与位流转换模块
//!
//! 位流 (`Bitstream`) 以 `bool` 序列表示，每个字节按最高位在前 (MSB-first) 展开为 8 位。

use crate::constants::{BITS_PER_BYTE, REPLACEMENT_CHAR, SENTINEL};
use log::warn;

/// 有序的位序列，每个字节最高位在前。
pub type Bitstream = Vec<bool>;

/// 把一个字节按最高位在前的顺序追加到位流末尾。
pub fn push_byte(bits: &mut Bitstream, byte: u8) {
    bits.extend((0..BITS_PER_BYTE).rev().map(|i| (byte >> i) & 1 == 1));
}

/// 把 8 个位 (最高位在前) 组合成一个字节。多于 8 个的位会被忽略。
pub fn bits_to_byte(bits: &[bool]) -> u8 {
    bits.iter()
        .take(BITS_PER_BYTE)
        .fold(0u8, |byte, &bit| (byte << 1) | u8::from(bit))
}

/// 将文本转换为位流。
///
/// 每个字符按单字节处理。ASCII 范围以外的字符无法用一个字节表示，
/// 会被替换为 `?`，并通过日志报告被替换的字符数量。
///
/// 返回的位流预留了哨兵字节所需的 8 位空间。
pub fn text_to_bits(text: &str) -> Bitstream {
    let mut bits = Vec::with_capacity((text.chars().count() + 1) * BITS_PER_BYTE);
    let mut replaced = 0usize;

    for c in text.chars() {
        let byte = if c.is_ascii() {
            c as u8
        } else {
            replaced += 1;
            REPLACEMENT_CHAR
        };
        push_byte(&mut bits, byte);
    }

    if replaced > 0 {
        warn!(
            "{replaced} non-ASCII character(s) replaced with '{}'",
            REPLACEMENT_CHAR as char
        );
    }

    bits
}

/// 将位流还原为文本。
///
/// 位流按 8 位一组解析，末尾不足 8 位的部分被丢弃。
/// 遇到第一个等于哨兵值的字节时立即停止，哨兵本身不包含在结果中。
pub fn bits_to_text(bits: &[bool]) -> String {
    bits.chunks_exact(BITS_PER_BYTE)
        .map(bits_to_byte)
        .take_while(|&byte| byte != SENTINEL)
        .map(char::from)
        .collect()
}
