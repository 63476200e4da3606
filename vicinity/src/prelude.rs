//! 涵盖了本 crate 一系列常用的功能.

pub use crate::{GraySlice, GraySliceMut, Idx2d, OwnedGraySlice};

pub use crate::consts::dir;
pub use crate::consts::gray::{BLACK, WHITE};

pub use crate::eight::CodeError;

pub use crate::ffi::{DIRECTIONS_NULL_BUFFER, DIRECTIONS_OK, DIRECTIONS_SIZE_OVERFLOW};
