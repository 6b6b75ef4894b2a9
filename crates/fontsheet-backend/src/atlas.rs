//! Sheet assembly: packing, compositing and record keeping.
//!
//! [`AtlasBuilder`] consumes trimmed glyphs in strictly ascending code point
//! order. Each glyph is positioned by the [`ShelfPacker`], copied into the
//! [`SheetCanvas`], and described by one [`GlyphRecord`]. The finished
//! [`Atlas`] is immutable.

use fontsheet_spec::{FontMetrics, GlyphRecord, SheetMetadata};
use thiserror::Error;

use crate::bitmap::GlyphBitmap;
use crate::canvas::SheetCanvas;
use crate::packer::ShelfPacker;
use crate::trim::TrimOffset;

/// Errors raised while assembling a sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtlasError {
    /// A character's advance is wider than the sheet may grow. The font
    /// cannot be built at this size and width.
    #[error(
        "advance {advance}px of U+{code_point:04X} exceeds the sheet width limit of {max_width}px"
    )]
    CapacityExceeded {
        code_point: u32,
        advance: u32,
        max_width: u32,
    },

    /// A bitmap is wider than the sheet may grow.
    #[error("glyph U+{code_point:04X} is {width}px wide, wider than the sheet limit of {max_width}px")]
    GlyphTooWide {
        code_point: u32,
        width: u32,
        max_width: u32,
    },

    /// Glyphs must arrive in strictly ascending code point order.
    #[error("U+{code_point:04X} arrived after U+{previous:04X}; glyphs must be added in ascending code point order")]
    OutOfOrder { previous: u32, code_point: u32 },
}

/// A finished glyph sheet: pixels plus metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct Atlas {
    canvas: SheetCanvas,
    metadata: SheetMetadata,
    edge: u32,
}

impl Atlas {
    /// Sheet width in pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Sheet height in pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// The packed pixels.
    pub fn canvas(&self) -> &SheetCanvas {
        &self.canvas
    }

    /// Font metrics and glyph records.
    pub fn metadata(&self) -> &SheetMetadata {
        &self.metadata
    }

    /// Padding reserved after each glyph (0 or 1).
    pub fn edge(&self) -> u32 {
        self.edge
    }

    /// Split into canvas and metadata.
    pub fn into_parts(self) -> (SheetCanvas, SheetMetadata) {
        (self.canvas, self.metadata)
    }
}

/// Incremental sheet construction.
#[derive(Debug, Clone)]
pub struct AtlasBuilder {
    packer: ShelfPacker,
    canvas: SheetCanvas,
    metadata: SheetMetadata,
    last_code_point: Option<u32>,
}

impl AtlasBuilder {
    /// Start an empty sheet.
    pub fn new(metrics: FontMetrics, max_width: u32, safe_edge: bool) -> Self {
        Self {
            packer: ShelfPacker::new(max_width, safe_edge),
            canvas: SheetCanvas::new(),
            metadata: SheetMetadata::new(metrics),
            last_code_point: None,
        }
    }

    /// Current sheet size.
    pub fn size(&self) -> (u32, u32) {
        self.packer.size()
    }

    /// Number of records so far.
    pub fn len(&self) -> usize {
        self.metadata.len()
    }

    /// True when no glyph has been added.
    pub fn is_empty(&self) -> bool {
        self.metadata.is_empty()
    }

    /// Reject advances that can never fit on the sheet.
    pub fn check_advance(&self, code_point: u32, advance: u32) -> Result<(), AtlasError> {
        let max_width = self.packer.max_width();
        if advance > max_width {
            return Err(AtlasError::CapacityExceeded {
                code_point,
                advance,
                max_width,
            });
        }
        Ok(())
    }

    /// Pack one trimmed glyph and record it.
    ///
    /// A glyph without visible pixels gets a record at `(0, 0)` with size
    /// and offset zero that carries only its advance; it takes no space on
    /// the sheet.
    pub fn push(
        &mut self,
        code_point: u32,
        bitmap: &GlyphBitmap,
        offset: TrimOffset,
        advance: u32,
    ) -> Result<GlyphRecord, AtlasError> {
        if let Some(previous) = self.last_code_point {
            if code_point <= previous {
                return Err(AtlasError::OutOfOrder {
                    previous,
                    code_point,
                });
            }
        }
        self.check_advance(code_point, advance)?;

        let record = if bitmap.is_empty() {
            GlyphRecord {
                advance,
                ..GlyphRecord::default()
            }
        } else {
            let placement = self
                .packer
                .place(bitmap.width, bitmap.height)
                .ok_or(AtlasError::GlyphTooWide {
                    code_point,
                    width: bitmap.width,
                    max_width: self.packer.max_width(),
                })?;
            let (sheet_width, sheet_height) = self.packer.size();
            self.canvas.grow_to(sheet_width, sheet_height);
            self.canvas.blit(bitmap, placement.x, placement.y);
            GlyphRecord::new(
                placement.x,
                placement.y,
                bitmap.width,
                bitmap.height,
                offset.x,
                offset.y,
                advance,
            )
        };

        self.metadata.insert(code_point, record);
        self.last_code_point = Some(code_point);
        Ok(record)
    }

    /// Finish construction.
    pub fn finish(self) -> Atlas {
        Atlas {
            edge: self.packer.edge(),
            canvas: self.canvas,
            metadata: self.metadata,
        }
    }
}
