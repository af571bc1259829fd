/// 标记隐藏文本结束的哨兵字节 (ASCII EM, End of Medium)。
pub const SENTINEL: u8 = 25;

/// 每个像素的通道数 (R, G, B, A)，每个通道的最低位承载 1 bit。
pub const CHANNELS_PER_PIXEL: usize = 4;

/// 每个字节的位数。
pub const BITS_PER_BYTE: usize = 8;

/// 非 ASCII 字符在编码时被替换成的字节 (`?`)。
pub const REPLACEMENT_CHAR: u8 = b'?';
