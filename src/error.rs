use thiserror::Error;

/// 隐写编解码过程中可能出现的错误。
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CodecError {
    /// 文本 (含哨兵字节) 的位数超过了图像所有通道最低位的总数。
    #[error(
        "The text does not fit into the image. Required: {required} bits, Available: {available} bits"
    )]
    CapacityExceeded { required: usize, available: usize },
}
