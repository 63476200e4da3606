//! 单通道灰度切片对象的操作.

mod core;
mod iter;

pub use self::core::{GraySlice, GraySliceMut, OwnedGraySlice};
