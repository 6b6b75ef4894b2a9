//! Glyph trimming.
//!
//! Fully transparent columns and rows are removed from the left, top,
//! right and bottom edges, in that order. Each edge is scanned until it
//! hits a row or column with ink or the dimension reaches zero. Only the
//! left and top passes move the drawing origin, so they are the ones that
//! accumulate an offset.
//!
//! The order matters: a fully transparent bitmap loses every column in
//! the left pass, after which every (now zero-width) row is vacuously
//! transparent and the top pass removes them all. The result is a 0x0
//! bitmap with offset `(width, height)`.

use crate::bitmap::GlyphBitmap;

/// Pixels removed from the leading edges of a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TrimOffset {
    /// Columns removed from the left.
    pub x: u32,
    /// Rows removed from the top.
    pub y: u32,
}

/// Trim `bitmap` in place and return the offset of the remaining region
/// inside the original.
pub fn trim(bitmap: &mut GlyphBitmap) -> TrimOffset {
    let (mut left, mut top) = (0u32, 0u32);
    let (mut right, mut bottom) = (bitmap.width, bitmap.height);

    while left < right && column_is_clear(bitmap, left, top, bottom) {
        left += 1;
    }
    while top < bottom && row_is_clear(bitmap, top, left, right) {
        top += 1;
    }
    while right > left && column_is_clear(bitmap, right - 1, top, bottom) {
        right -= 1;
    }
    while bottom > top && row_is_clear(bitmap, bottom - 1, left, right) {
        bottom -= 1;
    }

    let (width, height) = (right - left, bottom - top);
    if (width, height) != (bitmap.width, bitmap.height) {
        *bitmap = bitmap.crop(left, top, width, height);
    }

    TrimOffset { x: left, y: top }
}

fn column_is_clear(bitmap: &GlyphBitmap, x: u32, top: u32, bottom: u32) -> bool {
    (top..bottom).all(|y| bitmap.get(x, y).is_transparent())
}

fn row_is_clear(bitmap: &GlyphBitmap, y: u32, left: u32, right: u32) -> bool {
    bitmap.row(y)[left as usize..right as usize]
        .iter()
        .all(|pixel| pixel.is_transparent())
}
