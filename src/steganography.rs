//! # 隐写核心模块
//!
//! 把位流写入 RGBA 图像每个通道的最低有效位，或从中读出。
//! 像素按行优先顺序遍历，每个像素内按 R、G、B、A 的顺序访问通道，
//! 所有通道被展平成一条 "通道槽位" 序列，写入与读取共用同一顺序。

use crate::bits::{Bitstream, bits_to_byte, bits_to_text, push_byte, text_to_bits};
use crate::constants::{BITS_PER_BYTE, CHANNELS_PER_PIXEL, SENTINEL};
use crate::error::CodecError;
use image::RgbaImage;
use log::{debug, warn};

/// 按行优先、通道 R/G/B/A 的顺序遍历所有通道样本。
fn channel_slots(image: &RgbaImage) -> impl Iterator<Item = &u8> + '_ {
    image.pixels().flat_map(|pixel| pixel.0.iter())
}

fn channel_slots_mut(image: &mut RgbaImage) -> impl Iterator<Item = &mut u8> + '_ {
    image.pixels_mut().flat_map(|pixel| pixel.0.iter_mut())
}

/// 图像可承载的位数，即 `width × height × 4`。
pub fn capacity(image: &RgbaImage) -> usize {
    image.width() as usize * image.height() as usize * CHANNELS_PER_PIXEL
}

/// 在位流末尾追加哨兵字节，并写入图像通道的最低有效位。
///
/// 容量检查先于任何写入发生：失败时图像保持原样。
/// 超出位流长度的通道不会被修改，被写入的通道只有最低位可能改变。
///
/// # Errors
///
/// 如果位流 (含哨兵字节) 长度超过 [`capacity`]，返回 [`CodecError::CapacityExceeded`]。
pub fn embed(mut bits: Bitstream, image: &mut RgbaImage) -> Result<(), CodecError> {
    push_byte(&mut bits, SENTINEL);

    let available = capacity(image);
    if bits.len() > available {
        return Err(CodecError::CapacityExceeded {
            required: bits.len(),
            available,
        });
    }

    debug!("embedding {} of {} available bits", bits.len(), available);

    channel_slots_mut(image)
        .zip(bits)
        .for_each(|(sample, bit)| *sample = (*sample & !1) | u8::from(bit));

    Ok(())
}

/// 从图像通道的最低有效位中读出位流，直到遇到哨兵字节。
///
/// 只在字节边界 (每读满 8 位) 检查哨兵，返回值不包含哨兵本身。
/// 如果整幅图像都没有哨兵，则返回所有通道的最低位。
pub fn extract(image: &RgbaImage) -> Bitstream {
    let mut bits = Bitstream::with_capacity(capacity(image));

    for sample in channel_slots(image) {
        bits.push(sample & 1 == 1);

        if bits.len() % BITS_PER_BYTE == 0 {
            let start = bits.len() - BITS_PER_BYTE;
            if bits_to_byte(&bits[start..]) == SENTINEL {
                bits.truncate(start);
                debug!("sentinel found after {} payload bits", bits.len());
                return bits;
            }
        }
    }

    warn!(
        "no end marker found in {} bits, the image was probably not encoded by this tool",
        bits.len()
    );
    bits
}

/// 将文本隐藏进图像：`embed(text_to_bits(text), image)`。
pub fn encode_image(image: &mut RgbaImage, text: &str) -> Result<(), CodecError> {
    embed(text_to_bits(text), image)
}

/// 从图像中恢复文本：`bits_to_text(extract(image))`。
pub fn decode_image(image: &RgbaImage) -> String {
    bits_to_text(&extract(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn filled_image(width: u32, height: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([value; 4]))
    }

    fn patterned_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| {
            let base = (x * 31 + y * 17) as u8;
            Rgba([base, base.wrapping_add(64), base.wrapping_add(128), 255])
        })
    }

    #[test]
    fn test_capacity() {
        assert_eq!(capacity(&filled_image(3, 5, 0)), 60);
        assert_eq!(capacity(&filled_image(0, 5, 0)), 0);
    }

    #[test]
    fn test_single_char_fills_2x2_exactly() {
        let mut image = filled_image(2, 2, 0x80);

        encode_image(&mut image, "A").expect("16 bits fit in a 2x2 image");

        assert_eq!(decode_image(&image), "A");
    }

    #[test]
    fn test_capacity_exceeded_leaves_image_untouched() {
        let mut image = patterned_image(2, 2);
        let original = image.clone();

        let result = encode_image(&mut image, "AB");

        assert_eq!(
            result,
            Err(CodecError::CapacityExceeded {
                required: 24,
                available: 16
            })
        );
        assert_eq!(image, original);
    }

    #[test]
    fn test_one_bit_over_capacity_fails() {
        // 1x3 图像有 12 个槽位，8 位哨兵 + 5 位负载 = 13 位
        let mut image = filled_image(1, 3, 0);
        let original = image.clone();
        let bits = vec![true; 5];

        assert!(matches!(
            embed(bits, &mut image),
            Err(CodecError::CapacityExceeded {
                required: 13,
                available: 12
            })
        ));
        assert_eq!(image, original);
    }

    #[test]
    fn test_upper_bits_preserved() {
        let mut image = patterned_image(8, 8);
        let original = image.clone();

        encode_image(&mut image, "upper bits stay").expect("payload fits");

        for (before, after) in channel_slots(&original).zip(channel_slots(&image)) {
            assert_eq!(before & !1, after & !1);
        }
    }

    #[test]
    fn test_empty_payload_writes_only_sentinel() {
        let mut image = filled_image(4, 4, 0xFF);

        encode_image(&mut image, "").expect("sentinel fits");

        let lsbs: Vec<bool> = channel_slots(&image).map(|s| s & 1 == 1).collect();
        assert_eq!(
            &lsbs[..BITS_PER_BYTE],
            &[false, false, false, true, true, false, false, true]
        );
        assert!(channel_slots(&image).skip(BITS_PER_BYTE).all(|&s| s == 0xFF));
        assert_eq!(decode_image(&image), "");
    }

    #[test]
    fn test_slots_after_payload_untouched() {
        let mut image = patterned_image(10, 10);
        let original = image.clone();

        encode_image(&mut image, "hi").expect("payload fits");

        let written = 3 * BITS_PER_BYTE;
        assert!(
            channel_slots(&original)
                .zip(channel_slots(&image))
                .skip(written)
                .all(|(a, b)| a == b)
        );
    }

    #[test]
    fn test_sentinel_in_payload_truncates() {
        let mut image = patterned_image(10, 10);

        encode_image(&mut image, "ab\u{19}cd").expect("payload fits");

        assert_eq!(decode_image(&image), "ab");
    }

    #[test]
    fn test_extract_excludes_sentinel() {
        let mut image = patterned_image(4, 4);

        encode_image(&mut image, "Z").expect("payload fits");

        assert_eq!(extract(&image), text_to_bits("Z"));
    }

    #[test]
    fn test_decode_is_idempotent() {
        let mut image = patterned_image(16, 16);
        encode_image(&mut image, "read me twice").expect("payload fits");

        assert_eq!(decode_image(&image), decode_image(&image));
    }

    #[test]
    fn test_extract_without_sentinel_returns_all_bits() {
        let image = filled_image(3, 3, 0x10);

        let bits = extract(&image);

        assert_eq!(bits.len(), capacity(&image));
        assert!(bits.iter().all(|&bit| !bit));
        assert_eq!(decode_image(&image), "\0".repeat(4));
    }

    #[test]
    fn test_extract_partial_byte_image() {
        let image = filled_image(1, 1, 0x01);

        assert_eq!(extract(&image).len(), CHANNELS_PER_PIXEL);
        assert_eq!(decode_image(&image), "");
    }

    #[test]
    fn test_roundtrip_printable_ascii() {
        let text: String = (0x20u8..0x7F).map(char::from).collect();
        let mut image = patterned_image(32, 32);

        encode_image(&mut image, &text).expect("payload fits");

        assert_eq!(decode_image(&image), text);
    }
}
