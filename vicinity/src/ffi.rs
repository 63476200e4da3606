//! 面向其它语言运行时的 C ABI 边界.
//!
//! 该模块以不改名 (unmangled) 的方式导出 [`binary_directions`], 以便
//! CFFI 等外部绑定按符号名直接调用. 缓冲区按行优先
//! (`index = h * width + w`) 寻址, 与 crate 内部约定一致.

use crate::{GraySlice, GraySliceMut};
use ndarray::{ArrayView2, ArrayViewMut2};
use std::os::raw::c_int;

/// 操作成功.
pub const DIRECTIONS_OK: c_int = 0;

/// 缓冲区指针为空.
pub const DIRECTIONS_NULL_BUFFER: c_int = 1;

/// `width * height` 超出平台可寻址范围.
pub const DIRECTIONS_SIZE_OVERFLOW: c_int = 2;

/// 对 `src` 的每个像素计算 8-邻域方向编码, 写入 `dst`.
///
/// 两个缓冲区的大小均为 `width * height` 字节, 行优先存储.
/// 返回 [`DIRECTIONS_OK`] 表示成功; 返回其它值时 `dst` 的内容不可信.
/// `width` 或 `height` 为 0 时无事可做, 直接返回成功, 不读取任何指针.
///
/// # Safety
///
/// 除退化尺寸外, 调用者须保证:
///
/// 1. `src` 与 `dst` 均指向至少 `width * height` 字节的有效内存;
/// 2. 两个缓冲区不重叠 (原地操作不受支持);
/// 3. 调用期间没有其它方读写这两块内存.
#[no_mangle]
pub unsafe extern "C" fn binary_directions(
    dst: *mut u8,
    src: *const u8,
    width: u32,
    height: u32,
) -> c_int {
    if width == 0 || height == 0 {
        return DIRECTIONS_OK;
    }
    if dst.is_null() || src.is_null() {
        return DIRECTIONS_NULL_BUFFER;
    }
    let sh = (height as usize, width as usize);
    // 字节个数上限为 isize::MAX, 超出即拒绝, 决不回绕.
    let Some(len) = sh
        .0
        .checked_mul(sh.1)
        .filter(|&n| n <= isize::MAX as usize)
    else {
        return DIRECTIONS_SIZE_OVERFLOW;
    };

    let src = std::slice::from_raw_parts(src, len);
    let dst = std::slice::from_raw_parts_mut(dst, len);

    // len == 高 * 宽, 构造视图不会失败.
    let src = GraySlice::new(ArrayView2::from_shape(sh, src).expect("形状与长度不符"));
    let mut dst = GraySliceMut::new(ArrayViewMut2::from_shape(sh, dst).expect("形状与长度不符"));

    match src.direction_codes_into(&mut dst) {
        Ok(()) => DIRECTIONS_OK,
        // 形状相等由上面的构造保证.
        Err(_) => unreachable!(),
    }
}
