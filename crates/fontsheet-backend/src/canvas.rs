//! Growing sheet canvas.

use crate::bitmap::{GlyphBitmap, Pixel};

/// Row-major RGBA canvas that only ever grows.
///
/// New rows and columns are transparent. Existing pixels keep their
/// coordinates when the canvas widens.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetCanvas {
    width: u32,
    height: u32,
    data: Vec<Pixel>,
}

impl SheetCanvas {
    /// Create an empty 0x0 canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel data (row-major).
    pub fn pixels(&self) -> &[Pixel] {
        &self.data
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.data[y as usize * self.width as usize + x as usize]
    }

    /// Grow to at least `width x height`. Dimensions that are already
    /// larger are kept.
    pub fn grow_to(&mut self, width: u32, height: u32) {
        let new_width = self.width.max(width);
        let new_height = self.height.max(height);
        if new_width == self.width && new_height == self.height {
            return;
        }

        if new_width != self.width {
            let (old_stride, new_stride) = (self.width as usize, new_width as usize);
            let mut data = Vec::with_capacity(new_stride * new_height as usize);
            for y in 0..self.height as usize {
                data.extend_from_slice(&self.data[y * old_stride..(y + 1) * old_stride]);
                data.resize((y + 1) * new_stride, Pixel::TRANSPARENT);
            }
            self.data = data;
            self.width = new_width;
        }

        self.data
            .resize(self.width as usize * new_height as usize, Pixel::TRANSPARENT);
        self.height = new_height;
    }

    /// Copy `bitmap` into the canvas with its top-left corner at `(x, y)`,
    /// replacing whatever was there. Pixels falling outside the canvas are
    /// dropped.
    pub fn blit(&mut self, bitmap: &GlyphBitmap, x: u32, y: u32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let visible_width = bitmap.width.min(self.width - x) as usize;
        let visible_height = bitmap.height.min(self.height - y);
        for row in 0..visible_height {
            let src = &bitmap.row(row)[..visible_width];
            let start = (y + row) as usize * self.width as usize + x as usize;
            self.data[start..start + visible_width].copy_from_slice(src);
        }
    }

    /// Convert to 8-bit RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.data.len() * 4);
        for pixel in &self.data {
            bytes.extend_from_slice(&[pixel.r, pixel.g, pixel.b, pixel.a]);
        }
        bytes
    }
}
