//! Build options for a single font/size sheet.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default maximum sheet width in pixels.
pub const DEFAULT_SHEET_MAX_WIDTH: u32 = 1024;

/// Errors raised by [`BuildOptions::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Font size must be at least one pixel.
    #[error("fontSize must be greater than 0")]
    ZeroFontSize,

    /// Sheet width limit must be at least one pixel.
    #[error("sheetMaxWidth must be greater than 0")]
    ZeroSheetWidth,
}

/// Options controlling how one font is turned into one glyph sheet.
///
/// Field names serialize in camelCase so manifests use the same keys the
/// metadata documents do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildOptions {
    /// Rasterization size in pixels per em.
    pub font_size: u32,

    /// Maximum width of the packed sheet in pixels.
    #[serde(default = "default_sheet_max_width")]
    pub sheet_max_width: u32,

    /// Trim transparent borders from each glyph and record the offset.
    #[serde(default = "default_true")]
    pub offset_optimize: bool,

    /// Reserve one transparent pixel to the right of and below every glyph,
    /// so linear filtering does not sample neighbouring glyphs.
    #[serde(default = "default_true", rename = "safe1pxEdge")]
    pub safe_1px_edge: bool,

    /// Snap glyph coverage to fully opaque or fully transparent.
    #[serde(default)]
    pub binarize: bool,

    /// Write indented JSON metadata.
    #[serde(default)]
    pub pretty_json: bool,
}

fn default_sheet_max_width() -> u32 {
    DEFAULT_SHEET_MAX_WIDTH
}

fn default_true() -> bool {
    true
}

impl BuildOptions {
    /// Creates options for the given font size with every other option at
    /// its default.
    pub fn new(font_size: u32) -> Self {
        Self {
            font_size,
            sheet_max_width: DEFAULT_SHEET_MAX_WIDTH,
            offset_optimize: true,
            safe_1px_edge: true,
            binarize: false,
            pretty_json: false,
        }
    }

    /// Sets the maximum sheet width.
    pub fn with_max_width(mut self, width: u32) -> Self {
        self.sheet_max_width = width;
        self
    }

    /// Enables or disables glyph trimming.
    pub fn with_offset_optimize(mut self, enabled: bool) -> Self {
        self.offset_optimize = enabled;
        self
    }

    /// Enables or disables the one pixel safety edge.
    pub fn with_safe_edge(mut self, enabled: bool) -> Self {
        self.safe_1px_edge = enabled;
        self
    }

    /// Enables or disables alpha binarization.
    pub fn with_binarize(mut self, enabled: bool) -> Self {
        self.binarize = enabled;
        self
    }

    /// Enables or disables pretty-printed JSON output.
    pub fn with_pretty_json(mut self, enabled: bool) -> Self {
        self.pretty_json = enabled;
        self
    }

    /// Extra pixels reserved after each glyph on both axes.
    pub fn edge(&self) -> u32 {
        u32::from(self.safe_1px_edge)
    }

    /// Checks that every option is within range.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.font_size == 0 {
            return Err(OptionsError::ZeroFontSize);
        }
        if self.sheet_max_width == 0 {
            return Err(OptionsError::ZeroSheetWidth);
        }
        Ok(())
    }
}
