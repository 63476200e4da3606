//! 运行时错误.

use crate::Idx2d;

/// 邻域方向编码的运行时错误.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// 源图像与目标缓冲区形状不一致.
    ///
    /// 第一个参数为源形状, 第二个参数为目标形状, 均为 (高, 宽).
    ShapeMismatch(Idx2d, Idx2d),
}
