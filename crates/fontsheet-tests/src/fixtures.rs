//! Synthetic fonts and rasterizers.

use fontsheet_backend::{CharEntry, DesignMetrics, FontTables, GlyphBitmap, GlyphRasterizer, Pixel};

/// Font tables built in memory.
#[derive(Debug, Clone)]
pub struct SyntheticFont {
    metrics: DesignMetrics,
    characters: Vec<CharEntry>,
}

impl SyntheticFont {
    /// A font whose design units equal pixels at `units_per_em` px, with the
    /// given ascender and descender.
    pub fn new(units_per_em: u16, ascender: i16, descender: i16) -> Self {
        Self {
            metrics: DesignMetrics {
                units_per_em,
                ascender,
                descender,
                line_gap: 0,
            },
            characters: Vec::new(),
        }
    }

    /// Map `code_point` with an advance of `advance_units`.
    pub fn with_char(mut self, code_point: u32, advance_units: f32) -> Self {
        self.characters.push(CharEntry {
            code_point,
            advance_units,
        });
        self.normalize();
        self
    }

    /// Map every code point in `code_points` with the same advance.
    pub fn with_range(mut self, code_points: std::ops::Range<u32>, advance_units: f32) -> Self {
        self.characters
            .extend(code_points.map(|code_point| CharEntry {
                code_point,
                advance_units,
            }));
        self.normalize();
        self
    }

    fn normalize(&mut self) {
        self.characters.sort_by_key(|entry| entry.code_point);
        self.characters.dedup_by_key(|entry| entry.code_point);
    }
}

impl FontTables for SyntheticFont {
    fn design_metrics(&self) -> DesignMetrics {
        self.metrics
    }

    fn characters(&self) -> &[CharEntry] {
        &self.characters
    }
}

/// Fills the top `rows` rows of the canvas with opaque white, except for
/// code points listed as blank.
#[derive(Debug, Clone, Default)]
pub struct BlockRasterizer {
    pub rows: u32,
    pub blank: Vec<u32>,
}

impl BlockRasterizer {
    pub fn new(rows: u32) -> Self {
        Self {
            rows,
            blank: Vec::new(),
        }
    }

    pub fn with_blank(mut self, code_point: u32) -> Self {
        self.blank.push(code_point);
        self
    }
}

impl GlyphRasterizer for BlockRasterizer {
    fn rasterize(&self, code_point: u32, _font_size: u32, width: u32, height: u32) -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::new(width, height);
        if self.blank.contains(&code_point) {
            return bitmap;
        }
        for y in 0..self.rows.min(height) {
            for x in 0..width {
                bitmap.set(x, y, Pixel::white(255));
            }
        }
        bitmap
    }
}

/// Draws a code point dependent rectangle with a code point dependent
/// alpha, so every glyph has distinct margins and pixels. Code points
/// divisible by 7 are blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct PatternRasterizer;

impl PatternRasterizer {
    /// Alpha used for `code_point`, never zero.
    pub fn alpha(code_point: u32) -> u8 {
        (1 + code_point.wrapping_mul(37) % 255) as u8
    }

    /// Inked region `(left, top, width, height)` inside a
    /// `width x height` canvas, or `None` for a blank glyph.
    pub fn ink_rect(code_point: u32, width: u32, height: u32) -> Option<(u32, u32, u32, u32)> {
        if code_point % 7 == 0 {
            return None;
        }
        let left = code_point % 3;
        let top = code_point % 4;
        let right_margin = code_point % 2;
        let bottom_margin = (code_point / 2) % 3;
        let ink_width = width.checked_sub(left + right_margin)?;
        let ink_height = height.checked_sub(top + bottom_margin)?;
        if ink_width == 0 || ink_height == 0 {
            return None;
        }
        Some((left, top, ink_width, ink_height))
    }
}

impl GlyphRasterizer for PatternRasterizer {
    fn rasterize(&self, code_point: u32, _font_size: u32, width: u32, height: u32) -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::new(width, height);
        if let Some((left, top, ink_width, ink_height)) = Self::ink_rect(code_point, width, height) {
            let alpha = Self::alpha(code_point);
            for y in top..top + ink_height {
                for x in left..left + ink_width {
                    bitmap.set(x, y, Pixel::white(alpha));
                }
            }
        }
        bitmap
    }
}
