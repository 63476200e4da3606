//! 单通道二维图像的基础数据结构.

pub mod slice;

pub use slice::{GraySlice, GraySliceMut, OwnedGraySlice};
