//! RGBA glyph bitmaps.

/// Alpha above this value counts as ink when binarizing.
pub const BINARIZE_THRESHOLD: u8 = 127;

/// 8-bit RGBA pixel. Alpha carries glyph coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Pixel {
    /// Fully transparent black.
    pub const TRANSPARENT: Pixel = Pixel::rgba(0, 0, 0, 0);

    /// Create a pixel from its four channels.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// White with the given coverage.
    pub const fn white(alpha: u8) -> Self {
        Self::rgba(255, 255, 255, alpha)
    }

    /// True when the pixel contributes nothing visible.
    #[inline]
    pub fn is_transparent(&self) -> bool {
        self.a == 0
    }
}

/// A row-major grid of pixels with its origin at the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphBitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data (row-major).
    pub data: Vec<Pixel>,
}

impl GlyphBitmap {
    /// Create a fully transparent bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            data: vec![Pixel::TRANSPARENT; size],
        }
    }

    /// Wrap existing pixels. Returns `None` if the pixel count does not
    /// match the dimensions.
    pub fn from_pixels(width: u32, height: u32, data: Vec<Pixel>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a white bitmap from a coverage mask, one byte per pixel.
    /// Returns `None` if the mask length does not match the dimensions.
    pub fn from_coverage(width: u32, height: u32, coverage: &[u8]) -> Option<Self> {
        if coverage.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data: coverage.iter().map(|&alpha| Pixel::white(alpha)).collect(),
        })
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get a pixel at the given coordinates.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Pixel {
        self.data[self.index(x, y)]
    }

    /// Set a pixel at the given coordinates.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) {
        let idx = self.index(x, y);
        self.data[idx] = pixel;
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> &[Pixel] {
        let start = self.index(0, y);
        &self.data[start..start + self.width as usize]
    }

    /// Rewrite every alpha to 0 or 255 using [`BINARIZE_THRESHOLD`].
    /// Color channels are left untouched.
    pub fn binarize(&mut self) {
        for pixel in &mut self.data {
            pixel.a = if pixel.a > BINARIZE_THRESHOLD { 255 } else { 0 };
        }
    }

    /// Copy out the `width x height` region whose top-left corner is `(x, y)`.
    ///
    /// The region must lie inside the bitmap.
    pub fn crop(&self, x: u32, y: u32, width: u32, height: u32) -> GlyphBitmap {
        debug_assert!(x + width <= self.width && y + height <= self.height);
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for row in y..y + height {
            let start = self.index(x, row);
            data.extend_from_slice(&self.data[start..start + width as usize]);
        }
        GlyphBitmap {
            width,
            height,
            data,
        }
    }

    /// Number of pixels with non-zero alpha.
    pub fn ink_count(&self) -> usize {
        self.data.iter().filter(|p| !p.is_transparent()).count()
    }
}
