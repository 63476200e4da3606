//! 邻域方向编码算法操作.
//!
//! 对单通道图像的每个像素, 将其 Moore 8-邻域中非零邻居的存在性
//! 打包为一个字节. 位序与下图一致:
//!
//! ```text
//! 0 1 2
//! 3   4
//! 5 6 7
//! ```
//!
//! 越界邻居一律按零值处理, 即永远不会置位. 角和边不做特殊处理,
//! 四个边界条件各自独立生效.

mod core;
mod error;

pub use error::CodeError;

use crate::Idx2d;

/// 8 个邻居偏移 (dh, dw), 顺序与 [`crate::consts::dir::MASKS`] 一致.
const NEIGHBOUR_DELTAS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// 获得 `(h, w)` 的 8-邻居索引, 顺序与方向位序一致. 不检查越界.
///
/// 下溢的索引会回绕成一个极大值, 从而被之后的越界检查排除.
#[inline]
pub fn neighbour8((h, w): Idx2d) -> [Idx2d; 8] {
    NEIGHBOUR_DELTAS.map(|(dh, dw)| (h.wrapping_add_signed(dh), w.wrapping_add_signed(dw)))
}
