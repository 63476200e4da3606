use crate::Idx2d;

/// 行优先索引迭代器.
///
/// 内部只维护一个线性游标, 按 `index = h * 宽 + w` 的关系换算出
/// 二维索引, 与切片的行优先存储约定保持一致.
#[derive(Debug)]
pub struct PosIter {
    /// 下一个待返回的线性下标.
    cursor: usize,

    /// 像素总个数.
    len: usize,

    /// 图像的宽.
    w_len: usize,
}

impl PosIter {
    #[inline]
    pub fn new((h, w): Idx2d) -> Self {
        Self {
            cursor: 0,
            len: h * w,
            w_len: w,
        }
    }
}

impl Iterator for PosIter {
    type Item = Idx2d;

    fn next(&mut self) -> Option<Self::Item> {
        // len 为 0 时 (含宽为 0), 这里直接返回, 不会除零.
        if self.cursor >= self.len {
            return None;
        }
        let pos = (self.cursor / self.w_len, self.cursor % self.w_len);
        self.cursor += 1;
        Some(pos)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.len - self.cursor;
        (rest, Some(rest))
    }
}
