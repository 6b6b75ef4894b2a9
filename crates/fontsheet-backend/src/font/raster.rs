//! Coverage rasterizer backed by fontdue.

use fontdue::{Font, FontSettings};

use super::{DesignMetrics, FontError, GlyphRasterizer};
use crate::bitmap::{GlyphBitmap, Pixel};

/// Renders characters as white pixels whose alpha is the glyph coverage.
///
/// The baseline sits `round(ascent)` pixels below the top of the canvas.
/// When design metrics are attached the ascent comes from `hhea`, so the
/// bitmaps line up with the metrics written to the sheet metadata;
/// otherwise fontdue's own line metrics are used.
pub struct FontdueRasterizer {
    font: Font,
    metrics: Option<DesignMetrics>,
}

impl FontdueRasterizer {
    /// Load face `index` of a font or collection.
    pub fn from_bytes(data: &[u8], index: u32) -> Result<Self, FontError> {
        let settings = FontSettings {
            collection_index: index,
            ..FontSettings::default()
        };
        let font = Font::from_bytes(data, settings).map_err(|e| FontError::Load(e.to_string()))?;
        Ok(Self {
            font,
            metrics: None,
        })
    }

    /// Take the baseline from `hhea` design metrics.
    pub fn with_metrics(mut self, metrics: DesignMetrics) -> Self {
        self.metrics = Some(metrics);
        self
    }

    fn baseline(&self, font_size: u32) -> i32 {
        let ascent = match self.metrics {
            Some(metrics) => metrics.scale(font_size).ascent,
            None => self
                .font
                .horizontal_line_metrics(font_size as f32)
                .map_or(f64::from(font_size), |line| f64::from(line.ascent)),
        };
        ascent.round() as i32
    }
}

impl std::fmt::Debug for FontdueRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontdueRasterizer")
            .field("glyph_count", &self.font.glyph_count())
            .field("metrics", &self.metrics)
            .finish()
    }
}

impl GlyphRasterizer for FontdueRasterizer {
    fn rasterize(
        &self,
        code_point: u32,
        font_size: u32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> GlyphBitmap {
        let mut canvas = GlyphBitmap::new(canvas_width, canvas_height);
        let Some(ch) = char::from_u32(code_point) else {
            return canvas;
        };

        let (metrics, coverage) = self.font.rasterize(ch, font_size as f32);
        let left = metrics.xmin;
        let top = self.baseline(font_size) - metrics.ymin - metrics.height as i32;

        for gy in 0..metrics.height {
            let y = top + gy as i32;
            if y < 0 || y >= canvas_height as i32 {
                continue;
            }
            for gx in 0..metrics.width {
                let x = left + gx as i32;
                if x < 0 || x >= canvas_width as i32 {
                    continue;
                }
                let alpha = coverage[gy * metrics.width + gx];
                if alpha > 0 {
                    canvas.set(x as u32, y as u32, Pixel::white(alpha));
                }
            }
        }
        canvas
    }
}
