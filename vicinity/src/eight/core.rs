use super::{neighbour8, CodeError};
use crate::consts::dir::MASKS;
use crate::consts::gray::BLACK;
use crate::{GraySlice, GraySliceMut, Idx2d, OwnedGraySlice};

cfg_if::cfg_if! {
    if #[cfg(feature = "rayon")] {
        use ndarray::Axis;
        use rayon::iter::{IndexedParallelIterator, IntoParallelIterator, ParallelIterator};
    }
}

/// 邻域方向编码算法实现块.
impl<'a> GraySlice<'a> {
    /// 计算 `pos` 处像素的 8-邻域方向编码.
    ///
    /// 编码的第 `i` 位被置位, 当且仅当第 `i` 个邻居存在 (未越界)
    /// 且其像素值非零. 像素自身的值不参与编码.
    pub fn direction_code_at(&self, pos: Idx2d) -> u8 {
        let mut code = BLACK;
        for (neigh, mask) in neighbour8(pos).into_iter().zip(MASKS) {
            if matches!(self.get(neigh), Some(&pix) if pix != BLACK) {
                code |= mask;
            }
        }
        code
    }

    /// 对每个像素计算 8-邻域方向编码, 写入等大的 `dst`.
    ///
    /// 成功时 `dst` 的所有像素都被覆写; 形状不符时不写入任何数据,
    /// 返回 [`CodeError::ShapeMismatch`]. `src` 不会被修改, 因此
    /// 用同一输入重复调用产生完全相同的结果.
    ///
    /// 高或宽为 0 时无事可做, 直接成功.
    pub fn direction_codes_into(&self, dst: &mut GraySliceMut) -> Result<(), CodeError> {
        if self.shape() != dst.shape() {
            return Err(CodeError::ShapeMismatch(self.shape(), dst.shape()));
        }
        for pos in self.pos_iter() {
            dst[pos] = self.direction_code_at(pos);
        }
        Ok(())
    }

    /// 分配新缓冲区, 对每个像素计算 8-邻域方向编码并返回.
    ///
    /// ```
    /// use ndarray::Array2;
    /// use vicinity::prelude::*;
    ///
    /// let img = OwnedGraySlice::from(Array2::<u8>::zeros((3, 3)));
    /// let codes = img.as_immut().direction_codes();
    /// assert!(codes.as_immut().iter().all(|&c| c == BLACK));
    /// ```
    pub fn direction_codes(&self) -> OwnedGraySlice {
        let mut out = OwnedGraySlice::zeros(self.shape());
        self.direction_codes_into(&mut out.as_mutable())
            .expect("新缓冲区形状与原图一致");
        out
    }
}

/// 并发操作部分
#[cfg(feature = "rayon")]
impl<'a> GraySlice<'a> {
    /// 借助 `rayon`, 按行并行地计算 8-邻域方向编码并写入等大的 `dst`.
    ///
    /// 每个输出像素只依赖 `src`, 各行的写入目标互不相交, 因此无需
    /// 任何同步. 语义与 [`Self::direction_codes_into`] 完全一致.
    pub fn par_direction_codes_into(&self, dst: &mut GraySliceMut) -> Result<(), CodeError> {
        if self.shape() != dst.shape() {
            return Err(CodeError::ShapeMismatch(self.shape(), dst.shape()));
        }
        dst.array_view_mut()
            .axis_iter_mut(Axis(0))
            .into_par_iter()
            .enumerate()
            .for_each(|(h, mut row)| {
                for w in 0..row.len() {
                    row[w] = self.direction_code_at((h, w));
                }
            });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::consts::dir;
    use crate::consts::gray::{BLACK, WHITE};
    use crate::eight::{neighbour8, CodeError};
    use crate::OwnedGraySlice;
    use ndarray::{arr2, Array2};

    /// 从行优先数据构建拥有所有权的切片.
    fn owned(sh: (usize, usize), data: Vec<u8>) -> OwnedGraySlice {
        OwnedGraySlice::from(Array2::from_shape_vec(sh, data).unwrap())
    }

    #[test]
    fn test_all_zero() {
        let img = OwnedGraySlice::zeros((3, 3));
        let codes = img.as_immut().direction_codes();
        assert!(codes.as_immut().iter().all(|&c| c == BLACK));
    }

    #[test]
    fn test_single_center_pixel() {
        // 只有中心 (1, 1) 非零: 每个像素恰好看到中心这一个邻居,
        // 所置位恰为各自指向中心的方向.
        let mut img = OwnedGraySlice::zeros((3, 3));
        img.as_mutable()[(1, 1)] = 1;

        let codes = img.as_immut().direction_codes();
        let expected = arr2(&[
            [dir::SOUTHEAST, dir::SOUTH, dir::SOUTHWEST],
            [dir::EAST, BLACK, dir::WEST],
            [dir::NORTHEAST, dir::NORTH, dir::NORTHWEST],
        ]);
        assert_eq!(codes.as_immut().array_view(), expected);
    }

    #[test]
    fn test_1x1_no_neighbours() {
        // 自身的值不参与编码.
        let img = owned((1, 1), vec![WHITE]);
        assert_eq!(img.as_immut().direction_code_at((0, 0)), BLACK);
        assert_eq!(img.as_immut().direction_codes().into_raw(), arr2(&[[BLACK]]));
    }

    #[test]
    fn test_top_left_border_bits_zero() {
        // 左上角像素的西北/北/东北/西/西南位永远为零.
        let img = OwnedGraySlice::from(Array2::from_elem((4, 4), WHITE));
        let code = img.as_immut().direction_code_at((0, 0));
        let oob = dir::NORTHWEST | dir::NORTH | dir::NORTHEAST | dir::WEST | dir::SOUTHWEST;
        assert_eq!(code & oob, 0);
        assert_eq!(code, dir::EAST | dir::SOUTH | dir::SOUTHEAST);
    }

    #[test]
    fn test_full_bright_bit_counts() {
        // 全亮图中, 内部像素 8 位全置, 角像素 3 位, 非角边缘像素 5 位.
        let img = OwnedGraySlice::from(Array2::from_elem((5, 5), WHITE));
        let view = img.as_immut();
        let codes = view.direction_codes();
        let codes = codes.as_immut();

        assert_eq!(codes[(2, 2)], dir::ALL);
        for pos in view.pos_iter() {
            let expected = if !view.is_at_border(pos) {
                8
            } else if matches!(pos, (0, 0) | (0, 4) | (4, 0) | (4, 4)) {
                3
            } else {
                5
            };
            assert_eq!(codes[pos].count_ones(), expected, "pos = {pos:?}");
        }
    }

    #[test]
    fn test_bit_correspondence() {
        // 棋盘格加一条亮行: 对所有像素和所有方向逐位验证
        // "置位 <=> 邻居未越界且非零".
        let img = OwnedGraySlice::from(Array2::from_shape_fn((6, 7), |(h, w)| {
            if h == 3 {
                WHITE
            } else {
                ((h + w) % 2) as u8
            }
        }));
        let view = img.as_immut();
        let codes = view.direction_codes();
        let codes = codes.as_immut();

        for pos in view.pos_iter() {
            for (neigh, mask) in neighbour8(pos).into_iter().zip(dir::MASKS) {
                let lit = view.check(neigh) && view[neigh] != BLACK;
                assert_eq!(
                    dir::contains(codes[pos], mask),
                    lit,
                    "pos = {pos:?}, neigh = {neigh:?}"
                );
            }
        }
    }

    #[test]
    fn test_repeatable_and_src_untouched() {
        let img = owned((4, 3), (0u8..12).map(|v| v % 3).collect());
        let before = img.as_immut().to_owned();

        let first = img.as_immut().direction_codes();
        let second = img.as_immut().direction_codes();
        assert_eq!(first.into_raw(), second.into_raw());
        assert_eq!(img.into_raw(), before.into_raw());
    }

    #[test]
    fn test_degenerate_shapes() {
        for sh in [(0, 0), (0, 5), (7, 0)] {
            let img = OwnedGraySlice::zeros(sh);
            let codes = img.as_immut().direction_codes();
            assert_eq!(codes.as_immut().shape(), sh);
            assert_eq!(codes.as_immut().size(), 0);
        }
    }

    #[test]
    fn test_shape_mismatch_refused() {
        let img = OwnedGraySlice::zeros((3, 3));
        let mut dst = OwnedGraySlice::zeros((3, 4));
        let err = img.as_immut().direction_codes_into(&mut dst.as_mutable());
        assert_eq!(err, Err(CodeError::ShapeMismatch((3, 3), (3, 4))));
    }

    #[test]
    fn test_encode_from_mutable_view() {
        let mut img = OwnedGraySlice::zeros((2, 2));
        let mut view = img.as_mutable();
        view.iter_mut().for_each(|pix| *pix = WHITE);

        // 2x2 全亮: 每个像素都是角, 恰有 3 个非零邻居.
        let codes = view.shallow_copy().direction_codes();
        assert!(codes.as_immut().iter().all(|&c| c.count_ones() == 3));
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_matches_sequential() {
        let img =
            OwnedGraySlice::from(Array2::from_shape_fn((16, 9), |(h, w)| ((h * w) % 5) as u8));
        let seq = img.as_immut().direction_codes();

        let mut par = OwnedGraySlice::zeros((16, 9));
        img.as_immut()
            .par_direction_codes_into(&mut par.as_mutable())
            .unwrap();
        assert_eq!(seq.into_raw(), par.into_raw());
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn test_par_shape_mismatch_refused() {
        let img = OwnedGraySlice::zeros((2, 2));
        let mut dst = OwnedGraySlice::zeros((4, 4));
        let err = img.as_immut().par_direction_codes_into(&mut dst.as_mutable());
        assert_eq!(err, Err(CodeError::ShapeMismatch((2, 2), (4, 4))));
    }
}
