//! Font table reader backed by skrifa.

use std::path::Path;

use skrifa::{
    prelude::{LocationRef, Size},
    raw::{FontRef, TableProvider},
    MetadataProvider,
};

use super::{normalize_characters, CharEntry, DesignMetrics, FontError, FontTables};

/// Tables read from one face of a font file.
///
/// Parsing happens once, up front; the face owns everything it returns.
#[derive(Debug, Clone)]
pub struct FontFace {
    metrics: DesignMetrics,
    characters: Vec<CharEntry>,
}

impl FontFace {
    /// Parse face `index` of a font or collection.
    pub fn from_bytes(data: &[u8], index: u32) -> Result<Self, FontError> {
        let font = FontRef::from_index(data, index)?;

        let head = font.head()?;
        let hhea = font.hhea()?;
        let metrics = DesignMetrics {
            units_per_em: head.units_per_em(),
            ascender: hhea.ascender().to_i16(),
            descender: hhea.descender().to_i16(),
            line_gap: hhea.line_gap().to_i16(),
        };
        if metrics.units_per_em == 0 {
            return Err(FontError::ZeroUnitsPerEm);
        }

        let glyph_metrics = font.glyph_metrics(Size::unscaled(), LocationRef::default());
        let mut characters: Vec<CharEntry> = font
            .charmap()
            .mappings()
            .map(|(code_point, glyph_id)| CharEntry {
                code_point,
                advance_units: glyph_metrics.advance_width(glyph_id).unwrap_or(0.0),
            })
            .collect();
        normalize_characters(&mut characters);

        log::debug!(
            "parsed face {}: {} units/em, {} mapped characters",
            index,
            metrics.units_per_em,
            characters.len()
        );

        Ok(Self {
            metrics,
            characters,
        })
    }

    /// Read and parse face `index` of the font file at `path`.
    pub fn open(path: &Path, index: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(&data, index)
    }

    /// Build a face from already-known tables.
    pub fn from_parts(metrics: DesignMetrics, mut characters: Vec<CharEntry>) -> Self {
        normalize_characters(&mut characters);
        Self {
            metrics,
            characters,
        }
    }
}

impl FontTables for FontFace {
    fn design_metrics(&self) -> DesignMetrics {
        self.metrics
    }

    fn characters(&self) -> &[CharEntry] {
        &self.characters
    }
}
