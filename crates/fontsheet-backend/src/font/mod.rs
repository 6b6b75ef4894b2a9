//! Font collaborators.
//!
//! Sheet construction needs two things from a font: design-unit tables
//! (`head`, `hhea`, `cmap`, `hmtx`) and a way to draw one character into a
//! fixed-size canvas. Both sit behind traits so the builder can be driven
//! by real font files ([`FontFace`], [`FontdueRasterizer`]) or by synthetic
//! fonts in tests.

mod face;
mod raster;
#[cfg(test)]
pub(crate) mod test_font;

pub use face::FontFace;
pub use raster::FontdueRasterizer;

use std::path::PathBuf;

use fontsheet_spec::FontMetrics;
use thiserror::Error;

use crate::bitmap::GlyphBitmap;

/// Errors from loading or parsing a font.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse font tables: {0}")]
    Parse(#[from] skrifa::raw::ReadError),

    #[error("failed to load font for rasterization: {0}")]
    Load(String),

    #[error("font declares zero units per em")]
    ZeroUnitsPerEm,
}

/// Vertical metrics in font design units, as stored in `head` and `hhea`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DesignMetrics {
    pub units_per_em: u16,
    pub ascender: i16,
    pub descender: i16,
    pub line_gap: i16,
}

impl DesignMetrics {
    /// Design units per pixel at `font_size`.
    pub fn px_units(&self, font_size: u32) -> f64 {
        f64::from(self.units_per_em) / f64::from(font_size)
    }

    /// Pixel metrics at `font_size`.
    pub fn scale(&self, font_size: u32) -> FontMetrics {
        let px_units = self.px_units(font_size);
        FontMetrics {
            font_size,
            ascent: f64::from(self.ascender) / px_units,
            descent: f64::from(self.descender) / px_units,
            line_gap: f64::from(self.line_gap) / px_units,
        }
    }

    /// Pixel advance at `font_size`, rounded up. Zero or negative means the
    /// character takes no horizontal space.
    pub fn advance_px(&self, advance_units: f32, font_size: u32) -> i64 {
        (f64::from(advance_units) / self.px_units(font_size)).ceil() as i64
    }
}

/// One mapped character and its unscaled advance width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharEntry {
    pub code_point: u32,
    pub advance_units: f32,
}

/// Read access to the tables sheet construction depends on.
pub trait FontTables {
    /// `head.unitsPerEm` and the `hhea` vertical metrics.
    fn design_metrics(&self) -> DesignMetrics;

    /// Every mapped character, sorted by ascending code point with no
    /// duplicates.
    fn characters(&self) -> &[CharEntry];
}

/// Draws single characters.
///
/// Implementations are called from several threads at once.
pub trait GlyphRasterizer: Sync {
    /// Render `code_point` at `font_size` pixels per em into a transparent
    /// `canvas_width x canvas_height` bitmap. The canvas origin is the top
    /// of the line, the left edge is the pen position.
    fn rasterize(
        &self,
        code_point: u32,
        font_size: u32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> GlyphBitmap;
}

impl<T: FontTables + ?Sized> FontTables for &T {
    fn design_metrics(&self) -> DesignMetrics {
        (**self).design_metrics()
    }

    fn characters(&self) -> &[CharEntry] {
        (**self).characters()
    }
}

impl<T: GlyphRasterizer + ?Sized> GlyphRasterizer for &T {
    fn rasterize(
        &self,
        code_point: u32,
        font_size: u32,
        canvas_width: u32,
        canvas_height: u32,
    ) -> GlyphBitmap {
        (**self).rasterize(code_point, font_size, canvas_width, canvas_height)
    }
}

/// Sort by code point and drop repeated code points, keeping the first.
pub(crate) fn normalize_characters(characters: &mut Vec<CharEntry>) {
    characters.sort_by_key(|entry| entry.code_point);
    characters.dedup_by_key(|entry| entry.code_point);
}
