//! Glyph sheet metadata and its JSON form.
//!
//! A sheet is described by font-wide line metrics plus one [`GlyphRecord`]
//! per packed character, keyed by Unicode code point. Records are kept in
//! ascending code point order, which is also the order the packer consumed
//! them in, so serialized documents list sprites in packing order.

use std::collections::BTreeMap;
use std::io;

use serde::{Deserialize, Serialize};
use serde_json::ser::Formatter;
use thiserror::Error;

/// Errors from the JSON metadata codec.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Font-wide line metrics in output pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Rasterization size in pixels per em.
    pub font_size: u32,
    /// Distance from the baseline to the top of the line box.
    pub ascent: f64,
    /// Distance from the baseline to the bottom of the line box (usually negative).
    pub descent: f64,
    /// Recommended extra spacing between lines.
    pub line_gap: f64,
}

impl FontMetrics {
    /// Height of the canvas every glyph is rasterized into before trimming.
    pub fn line_height(&self) -> u32 {
        let height = (self.ascent - self.descent).ceil();
        if height > 0.0 {
            height as u32
        } else {
            0
        }
    }
}

/// Placement and metrics of one character inside the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlyphRecord {
    /// Left edge in the sheet.
    pub x: u32,
    /// Top edge in the sheet.
    pub y: u32,
    /// Trimmed bitmap width; 0 for glyphs without visible pixels.
    pub width: u32,
    /// Trimmed bitmap height; 0 for glyphs without visible pixels.
    pub height: u32,
    /// Columns trimmed from the left. Add to the pen position before drawing.
    pub offset_x: u32,
    /// Rows trimmed from the top. Add to the line top before drawing.
    pub offset_y: u32,
    /// Horizontal pen advance in pixels.
    pub advance: u32,
}

impl GlyphRecord {
    /// Creates a record from its seven fields in serialization order.
    pub fn new(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        offset_x: u32,
        offset_y: u32,
        advance: u32,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            offset_x,
            offset_y,
            advance,
        }
    }

    /// True when the glyph occupies no pixels in the sheet.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Right edge of the glyph, plus `edge` padding pixels. Saturates at
    /// `u32::MAX` for records read from untrusted files.
    pub fn right(&self, edge: u32) -> u32 {
        self.x.saturating_add(self.width).saturating_add(edge)
    }

    /// Bottom edge of the glyph, plus `edge` padding pixels. Saturates like
    /// [`GlyphRecord::right`].
    pub fn bottom(&self, edge: u32) -> u32 {
        self.y.saturating_add(self.height).saturating_add(edge)
    }
}

/// Descriptive metadata of a finished glyph sheet.
///
/// Serializes as
/// `{"fontSize","ascent","descent","lineGap","sprites":{"<code point>":{...}}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetMetadata {
    pub font_size: u32,
    pub ascent: f64,
    pub descent: f64,
    pub line_gap: f64,
    /// Records keyed by code point. JSON object keys are the decimal code
    /// point as a string.
    pub sprites: BTreeMap<u32, GlyphRecord>,
}

impl SheetMetadata {
    /// Creates metadata with no records.
    pub fn new(metrics: FontMetrics) -> Self {
        Self {
            font_size: metrics.font_size,
            ascent: metrics.ascent,
            descent: metrics.descent,
            line_gap: metrics.line_gap,
            sprites: BTreeMap::new(),
        }
    }

    /// The font-wide metrics stored in this document.
    pub fn metrics(&self) -> FontMetrics {
        FontMetrics {
            font_size: self.font_size,
            ascent: self.ascent,
            descent: self.descent,
            line_gap: self.line_gap,
        }
    }

    /// Adds or replaces the record for a code point.
    pub fn insert(&mut self, code_point: u32, record: GlyphRecord) {
        self.sprites.insert(code_point, record);
    }

    /// Looks up the record for a code point.
    pub fn get(&self, code_point: u32) -> Option<&GlyphRecord> {
        self.sprites.get(&code_point)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// True when no records exist.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Records in ascending code point order.
    pub fn records(&self) -> impl Iterator<Item = (u32, &GlyphRecord)> {
        self.sprites.iter().map(|(code_point, record)| (*code_point, record))
    }

    /// Smallest sheet size that contains every record, including `edge`
    /// padding after each non-empty glyph.
    pub fn extent(&self, edge: u32) -> (u32, u32) {
        self.sprites
            .values()
            .filter(|record| !record.is_empty())
            .fold((0, 0), |(width, height), record| {
                (width.max(record.right(edge)), height.max(record.bottom(edge)))
            })
    }

    /// Serializes to JSON, indented with two spaces when `pretty` is set.
    /// Compact output keeps one space after every `,` and `:`. The document
    /// always ends with a newline.
    pub fn to_json(&self, pretty: bool) -> Result<String, MetadataError> {
        let mut json = if pretty {
            serde_json::to_vec_pretty(self)?
        } else {
            let mut out = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut out, SpacedFormatter);
            self.serialize(&mut serializer)?;
            out
        };
        json.push(b'\n');
        // serde_json only emits UTF-8.
        Ok(String::from_utf8_lossy(&json).into_owned())
    }

    /// Parses a JSON document produced by [`SheetMetadata::to_json`].
    pub fn from_json(json: &str) -> Result<Self, MetadataError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Single-line JSON with `", "` and `": "` separators.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}
