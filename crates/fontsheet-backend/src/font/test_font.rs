//! A tiny TrueType font assembled in memory for collaborator tests.
//!
//! 1000 units per em, hhea ascender 800 / descender -200. Glyph 1 is a
//! filled square from (100, 0) to (500, 400) with advance 600, glyph 2 is
//! empty with advance 250. The cmap maps 'A' and 'B' to glyph 1 and space
//! to glyph 2.

use kurbo::BezPath;
use write_fonts::{
    tables::{
        cmap::Cmap,
        glyf::{GlyfLocaBuilder, SimpleGlyph},
        head::Head,
        hhea::Hhea,
        hmtx::{Hmtx, LongMetric},
        maxp::Maxp,
    },
    types::{FWord, GlyphId, UfWord},
    FontBuilder,
};

pub(crate) const UNITS_PER_EM: u16 = 1000;
pub(crate) const ASCENDER: i16 = 800;
pub(crate) const DESCENDER: i16 = -200;

pub(crate) fn square_font() -> Vec<u8> {
    square_font_with_ascender(ASCENDER)
}

pub(crate) fn square_font_with_ascender(ascender: i16) -> Vec<u8> {
    let square = BezPath::from_svg("M100,0 L100,400 L500,400 L500,0 Z").unwrap();
    let square = SimpleGlyph::from_bezpath(&square).unwrap();
    let empty = SimpleGlyph::default();

    let mut glyphs = GlyfLocaBuilder::new();
    glyphs.add_glyph(&empty).unwrap();
    glyphs.add_glyph(&square).unwrap();
    glyphs.add_glyph(&empty).unwrap();
    let (glyf, loca, loca_format) = glyphs.build();

    let cmap = Cmap::from_mappings([
        (' ', GlyphId::new(2)),
        ('A', GlyphId::new(1)),
        ('B', GlyphId::new(1)),
    ])
    .unwrap();

    let head = Head {
        units_per_em: UNITS_PER_EM,
        x_min: 100,
        y_min: 0,
        x_max: 500,
        y_max: 400,
        index_to_loc_format: loca_format as i16,
        ..Default::default()
    };
    let hhea = Hhea {
        ascender: FWord::new(ascender),
        descender: FWord::new(DESCENDER),
        line_gap: FWord::new(0),
        advance_width_max: UfWord::new(600),
        min_left_side_bearing: FWord::new(0),
        min_right_side_bearing: FWord::new(0),
        x_max_extent: FWord::new(500),
        caret_slope_rise: 1,
        caret_slope_run: 0,
        caret_offset: 0,
        number_of_h_metrics: 3,
    };
    let hmtx = Hmtx {
        h_metrics: vec![
            LongMetric {
                advance: 500,
                side_bearing: 0,
            },
            LongMetric {
                advance: 600,
                side_bearing: 100,
            },
            LongMetric {
                advance: 250,
                side_bearing: 0,
            },
        ],
        left_side_bearings: Vec::new(),
    };
    let maxp = Maxp {
        num_glyphs: 3,
        ..Default::default()
    };

    let mut builder = FontBuilder::new();
    builder
        .add_table(&head)
        .unwrap()
        .add_table(&hhea)
        .unwrap()
        .add_table(&maxp)
        .unwrap()
        .add_table(&hmtx)
        .unwrap()
        .add_table(&cmap)
        .unwrap()
        .add_table(&loca)
        .unwrap()
        .add_table(&glyf)
        .unwrap();
    builder.build()
}
