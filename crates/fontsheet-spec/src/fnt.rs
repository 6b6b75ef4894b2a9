//! Line-oriented `.fnt` codec.
//!
//! ```text
//! * fontSize: 12
//! * ascent: 11
//! * descent: -3
//! * lineGap: 0
//! # codePoint,x,y,width,height,offsetX,offsetY,advance
//! 32,0,0,0,0,0,0,4
//! 65,0,0,6,9,0,2,7
//! ```
//!
//! Header lines start with `* `, comment lines with `#`. Every other
//! non-blank line is one record.

use std::fmt::Write as _;

use thiserror::Error;

use crate::metadata::{FontMetrics, GlyphRecord, SheetMetadata};

/// Column header written after the metric headers.
pub const COLUMN_HEADER: &str = "# codePoint,x,y,width,height,offsetX,offsetY,advance";

const RECORD_FIELDS: usize = 8;

/// Errors from parsing a `.fnt` document.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FntError {
    /// A required header line was not present.
    #[error("missing header '{0}'")]
    MissingHeader(&'static str),

    /// A header line carried a value that is not a number.
    #[error("line {line}: invalid value for header '{key}': {value}")]
    InvalidHeader {
        line: usize,
        key: String,
        value: String,
    },

    /// A record line did not have eight integer fields.
    #[error("line {line}: malformed record: {content}")]
    MalformedRecord { line: usize, content: String },

    /// The same code point appeared twice.
    #[error("line {line}: duplicate code point {code_point}")]
    DuplicateCodePoint { line: usize, code_point: u32 },
}

impl SheetMetadata {
    /// Renders the `.fnt` form of this metadata.
    pub fn to_fnt(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "* fontSize: {}", self.font_size);
        let _ = writeln!(out, "* ascent: {}", self.ascent);
        let _ = writeln!(out, "* descent: {}", self.descent);
        let _ = writeln!(out, "* lineGap: {}", self.line_gap);
        out.push_str(COLUMN_HEADER);
        out.push('\n');
        for (code_point, r) in self.records() {
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{},{}",
                code_point, r.x, r.y, r.width, r.height, r.offset_x, r.offset_y, r.advance
            );
        }
        out
    }

    /// Parses a `.fnt` document. Unknown headers and blank lines are ignored.
    pub fn from_fnt(text: &str) -> Result<Self, FntError> {
        let mut font_size: Option<u32> = None;
        let mut ascent: Option<f64> = None;
        let mut descent: Option<f64> = None;
        let mut line_gap: Option<f64> = None;
        let mut rows: Vec<(usize, u32, GlyphRecord)> = Vec::new();

        for (index, raw) in text.lines().enumerate() {
            let line_no = index + 1;
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('*') {
                let Some((key, value)) = header.split_once(':') else {
                    continue;
                };
                let key = key.trim();
                let value = value.trim();
                let invalid = || FntError::InvalidHeader {
                    line: line_no,
                    key: key.to_string(),
                    value: value.to_string(),
                };
                match key {
                    "fontSize" => font_size = Some(value.parse().map_err(|_| invalid())?),
                    "ascent" => ascent = Some(parse_metric(value).ok_or_else(invalid)?),
                    "descent" => descent = Some(parse_metric(value).ok_or_else(invalid)?),
                    "lineGap" => line_gap = Some(parse_metric(value).ok_or_else(invalid)?),
                    _ => {}
                }
                continue;
            }

            let (code_point, record) = parse_record(line).ok_or_else(|| {
                FntError::MalformedRecord {
                    line: line_no,
                    content: line.to_string(),
                }
            })?;
            rows.push((line_no, code_point, record));
        }

        let metrics = FontMetrics {
            font_size: font_size.ok_or(FntError::MissingHeader("fontSize"))?,
            ascent: ascent.ok_or(FntError::MissingHeader("ascent"))?,
            descent: descent.ok_or(FntError::MissingHeader("descent"))?,
            line_gap: line_gap.ok_or(FntError::MissingHeader("lineGap"))?,
        };

        let mut metadata = SheetMetadata::new(metrics);
        for (line, code_point, record) in rows {
            if metadata.get(code_point).is_some() {
                return Err(FntError::DuplicateCodePoint { line, code_point });
            }
            metadata.insert(code_point, record);
        }
        Ok(metadata)
    }
}

/// Line metrics must be finite.
fn parse_metric(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|metric| metric.is_finite())
}

fn parse_record(line: &str) -> Option<(u32, GlyphRecord)> {
    let mut fields = [0u32; RECORD_FIELDS];
    let mut count = 0;
    for part in line.split(',') {
        if count == RECORD_FIELDS {
            return None;
        }
        fields[count] = part.trim().parse().ok()?;
        count += 1;
    }
    if count != RECORD_FIELDS {
        return None;
    }
    let [code_point, x, y, width, height, offset_x, offset_y, advance] = fields;
    Some((
        code_point,
        GlyphRecord::new(x, y, width, height, offset_x, offset_y, advance),
    ))
}
