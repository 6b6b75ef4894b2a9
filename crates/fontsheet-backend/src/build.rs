//! Font to glyph sheet pipeline.
//!
//! [`build_sheet`] turns font tables plus a rasterizer into an [`Atlas`];
//! [`write_sheet`] stores it as `<name>.png`, `<name>.json` and
//! `<name>.fnt`; [`build_manifest`] runs many independent builds in
//! parallel.
//!
//! Rasterization, binarization and trimming of individual glyphs run on
//! the rayon pool. The ordered collect hands results back in code point
//! order, and packing then proceeds sequentially so the layout never
//! depends on scheduling.

use std::path::{Path, PathBuf};

use fontsheet_spec::{
    BuildManifest, BuildOptions, BuildTarget, MetadataError, OptionsError, SheetMetadata,
};
use rayon::prelude::*;
use thiserror::Error;

use crate::atlas::{Atlas, AtlasBuilder, AtlasError};
use crate::bitmap::GlyphBitmap;
use crate::font::{FontError, FontFace, FontTables, FontdueRasterizer, GlyphRasterizer};
use crate::observer::{BuildObserver, SkipReason};
use crate::png::{encode_canvas_with_hash, PngConfig, PngError};
use crate::trim::{trim, TrimOffset};

/// Errors from building or writing one sheet.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("invalid build options: {0}")]
    Options(#[from] OptionsError),

    #[error(transparent)]
    Font(#[from] FontError),

    #[error(transparent)]
    Atlas(#[from] AtlasError),

    #[error(transparent)]
    Png(#[from] PngError),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("failed to write '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("sheet '{name}' has no visible glyphs; a 0x0 image cannot be written")]
    EmptySheet { name: String },
}

impl BuildError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        BuildError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// True for the capacity failure: an advance wider than the sheet limit.
    pub fn is_capacity_exceeded(&self) -> bool {
        matches!(self, BuildError::Atlas(AtlasError::CapacityExceeded { .. }))
    }
}

/// Files produced for one sheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetArtifacts {
    pub png: PathBuf,
    pub json: PathBuf,
    pub fnt: PathBuf,
    /// BLAKE3 hash of the PNG bytes.
    pub png_hash: String,
    pub width: u32,
    pub height: u32,
    /// Number of glyph records, including advance-only ones.
    pub glyphs: usize,
}

/// Result of one manifest target.
#[derive(Debug)]
pub struct TargetOutcome {
    pub name: String,
    pub result: Result<SheetArtifacts, BuildError>,
}

struct RenderedGlyph {
    code_point: u32,
    advance: u32,
    bitmap: GlyphBitmap,
    offset: TrimOffset,
}

/// Unicode scalar values other than control characters.
pub fn is_printable(code_point: u32) -> bool {
    char::from_u32(code_point).is_some_and(|ch| !ch.is_control())
}

/// Build a glyph sheet in memory.
///
/// Every character the font maps is considered in ascending code point
/// order. Non-printable characters and characters whose advance rounds to
/// zero or less are skipped. Any advance wider than the sheet limit fails
/// the whole build before anything is rasterized.
pub fn build_sheet<T, R, O>(
    tables: &T,
    rasterizer: &R,
    options: &BuildOptions,
    observer: &mut O,
) -> Result<Atlas, BuildError>
where
    T: FontTables + ?Sized,
    R: GlyphRasterizer + ?Sized,
    O: BuildObserver + ?Sized,
{
    options.validate()?;

    let design = tables.design_metrics();
    if design.units_per_em == 0 {
        return Err(FontError::ZeroUnitsPerEm.into());
    }
    let font_size = options.font_size;
    let metrics = design.scale(font_size);
    let line_height = metrics.line_height();
    let characters = tables.characters();
    observer.font_loaded(&metrics, characters.len());

    let mut builder = AtlasBuilder::new(metrics, options.sheet_max_width, options.safe_1px_edge);

    let mut jobs = Vec::with_capacity(characters.len());
    for entry in characters {
        if !is_printable(entry.code_point) {
            observer.glyph_skipped(entry.code_point, SkipReason::NonPrintable);
            continue;
        }
        let advance = design.advance_px(entry.advance_units, font_size);
        if advance <= 0 {
            observer.glyph_skipped(entry.code_point, SkipReason::NoAdvance { advance });
            continue;
        }
        let advance = u32::try_from(advance).unwrap_or(u32::MAX);
        builder.check_advance(entry.code_point, advance)?;
        jobs.push((entry.code_point, advance));
    }

    let rendered: Vec<RenderedGlyph> = jobs
        .par_iter()
        .map(|&(code_point, advance)| {
            let mut bitmap = rasterizer.rasterize(code_point, font_size, advance, line_height);
            if options.binarize {
                bitmap.binarize();
            }
            let offset = if options.offset_optimize {
                trim(&mut bitmap)
            } else {
                TrimOffset::default()
            };
            RenderedGlyph {
                code_point,
                advance,
                bitmap,
                offset,
            }
        })
        .collect();

    for glyph in rendered {
        observer.glyph_rasterized(
            glyph.code_point,
            (glyph.bitmap.width, glyph.bitmap.height),
            glyph.offset,
        );
        let before = builder.size();
        builder.push(glyph.code_point, &glyph.bitmap, glyph.offset, glyph.advance)?;
        let (width, height) = builder.size();
        if (width, height) != before {
            observer.sheet_resized(width, height);
        }
    }

    Ok(builder.finish())
}

/// Write `<name>.png`, `<name>.json` and `<name>.fnt` into `out_dir`.
///
/// Everything is encoded before the first file is created, so a failure
/// leaves no partial output behind.
pub fn write_sheet<O>(
    atlas: &Atlas,
    out_dir: &Path,
    name: &str,
    pretty: bool,
    observer: &mut O,
) -> Result<SheetArtifacts, BuildError>
where
    O: BuildObserver + ?Sized,
{
    if atlas.width() == 0 || atlas.height() == 0 {
        return Err(BuildError::EmptySheet {
            name: name.to_string(),
        });
    }

    let (png_bytes, png_hash) = encode_canvas_with_hash(atlas.canvas(), &PngConfig::default())?;
    let metadata: &SheetMetadata = atlas.metadata();
    let json = metadata.to_json(pretty)?;
    let fnt = metadata.to_fnt();

    std::fs::create_dir_all(out_dir).map_err(|e| BuildError::io(out_dir, e))?;

    let png = out_dir.join(format!("{name}.png"));
    let json_path = out_dir.join(format!("{name}.json"));
    let fnt_path = out_dir.join(format!("{name}.fnt"));
    for (path, bytes) in [
        (&png, png_bytes.as_slice()),
        (&json_path, json.as_bytes()),
        (&fnt_path, fnt.as_bytes()),
    ] {
        std::fs::write(path, bytes).map_err(|e| BuildError::io(path, e))?;
        observer.artifact_written(path);
    }

    Ok(SheetArtifacts {
        png,
        json: json_path,
        fnt: fnt_path,
        png_hash,
        width: atlas.width(),
        height: atlas.height(),
        glyphs: metadata.len(),
    })
}

/// Load a font file, build one sheet, and write it.
pub fn build_font_file<O>(
    font_file: &Path,
    font_index: u32,
    options: &BuildOptions,
    out_dir: &Path,
    name: &str,
    observer: &mut O,
) -> Result<SheetArtifacts, BuildError>
where
    O: BuildObserver + ?Sized,
{
    let data = std::fs::read(font_file).map_err(|source| FontError::Io {
        path: font_file.to_path_buf(),
        source,
    })?;
    let face = FontFace::from_bytes(&data, font_index)?;
    let rasterizer =
        FontdueRasterizer::from_bytes(&data, font_index)?.with_metrics(face.design_metrics());

    let atlas = build_sheet(&face, &rasterizer, options, observer)?;
    write_sheet(&atlas, out_dir, name, options.pretty_json, observer)
}

/// Run every target of a manifest in parallel.
///
/// Targets share nothing but the output directory; one target failing has
/// no effect on the others. Outcomes come back in manifest order. The
/// outer error only covers preparing the output directory.
pub fn build_manifest<F, O>(
    manifest: &BuildManifest,
    make_observer: F,
) -> Result<Vec<TargetOutcome>, BuildError>
where
    F: Fn(&BuildTarget) -> O + Sync,
    O: BuildObserver,
{
    let out_dir = manifest.output_dir.as_path();
    if manifest.clean && out_dir.exists() {
        log::info!("cleaning {}", out_dir.display());
        std::fs::remove_dir_all(out_dir).map_err(|e| BuildError::io(out_dir, e))?;
    }
    std::fs::create_dir_all(out_dir).map_err(|e| BuildError::io(out_dir, e))?;

    let outcomes = manifest
        .builds
        .par_iter()
        .map(|target| {
            let mut observer = make_observer(target);
            let result = build_font_file(
                &target.font_file,
                target.font_index,
                &target.options,
                out_dir,
                &target.name,
                &mut observer,
            );
            if let Err(e) = &result {
                log::warn!("[{}] build failed: {}", target.name, e);
            }
            TargetOutcome {
                name: target.name.clone(),
                result,
            }
        })
        .collect();

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bitmap::Pixel;
    use crate::font::{CharEntry, DesignMetrics};
    use crate::observer::NullObserver;
    use crate::png::{hash_png, read_rgba};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 1000 units/em, so at 10px one pixel is 100 units and the line is
    /// 10px tall with the baseline at 8.
    struct BoxFont {
        characters: Vec<CharEntry>,
    }

    impl BoxFont {
        fn new(entries: &[(u32, f32)]) -> Self {
            Self {
                characters: entries
                    .iter()
                    .map(|&(code_point, advance_units)| CharEntry {
                        code_point,
                        advance_units,
                    })
                    .collect(),
            }
        }
    }

    impl FontTables for BoxFont {
        fn design_metrics(&self) -> DesignMetrics {
            DesignMetrics {
                units_per_em: 1000,
                ascender: 800,
                descender: -200,
                line_gap: 0,
            }
        }

        fn characters(&self) -> &[CharEntry] {
            &self.characters
        }
    }

    /// Fills columns `1..width-1` of rows `2..8` with `alpha`; the space
    /// character stays blank.
    struct BoxRasterizer {
        alpha: u8,
        calls: AtomicUsize,
    }

    impl BoxRasterizer {
        fn new(alpha: u8) -> Self {
            Self {
                alpha,
                calls: AtomicUsize::new(0),
            }
        }
    }

    impl GlyphRasterizer for BoxRasterizer {
        fn rasterize(&self, code_point: u32, _size: u32, width: u32, height: u32) -> GlyphBitmap {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut bitmap = GlyphBitmap::new(width, height);
            if code_point != 32 {
                for y in 2..8.min(height) {
                    for x in 1..width.saturating_sub(1) {
                        bitmap.set(x, y, Pixel::white(self.alpha));
                    }
                }
            }
            bitmap
        }
    }

    #[derive(Default)]
    struct Recorder {
        skipped: Vec<(u32, SkipReason)>,
        resizes: Vec<(u32, u32)>,
        written: Vec<PathBuf>,
    }

    impl BuildObserver for Recorder {
        fn glyph_skipped(&mut self, code_point: u32, reason: SkipReason) {
            self.skipped.push((code_point, reason));
        }

        fn sheet_resized(&mut self, width: u32, height: u32) {
            self.resizes.push((width, height));
        }

        fn artifact_written(&mut self, path: &Path) {
            self.written.push(path.to_path_buf());
        }
    }

    fn abc_font() -> BoxFont {
        BoxFont::new(&[(32, 500.0), (65, 600.0), (66, 700.0)])
    }

    #[test]
    fn test_build_trimmed_sheet() {
        let mut recorder = Recorder::default();
        let atlas = build_sheet(
            &abc_font(),
            &BoxRasterizer::new(255),
            &BuildOptions::new(10),
            &mut recorder,
        )
        .unwrap();

        let metadata = atlas.metadata();
        assert_eq!(metadata.ascent, 8.0);
        assert_eq!(metadata.descent, -2.0);
        assert_eq!(metadata.get(32).unwrap(), &fontsheet_spec::GlyphRecord::new(0, 0, 0, 0, 0, 0, 5));
        assert_eq!(metadata.get(65).unwrap(), &fontsheet_spec::GlyphRecord::new(0, 0, 4, 6, 1, 2, 6));
        assert_eq!(metadata.get(66).unwrap(), &fontsheet_spec::GlyphRecord::new(5, 0, 5, 6, 1, 2, 7));
        assert_eq!((atlas.width(), atlas.height()), (11, 7));
        assert_eq!(recorder.resizes, vec![(5, 7), (11, 7)]);
    }

    #[test]
    fn test_build_without_trim_places_full_cells() {
        let options = BuildOptions::new(10).with_offset_optimize(false).with_safe_edge(false);
        let atlas = build_sheet(&abc_font(), &BoxRasterizer::new(255), &options, &mut NullObserver)
            .unwrap();
        let metadata = atlas.metadata();
        assert_eq!(metadata.get(32).unwrap(), &fontsheet_spec::GlyphRecord::new(0, 0, 5, 10, 0, 0, 5));
        assert_eq!(metadata.get(65).unwrap(), &fontsheet_spec::GlyphRecord::new(5, 0, 6, 10, 0, 0, 6));
        assert_eq!(metadata.get(66).unwrap(), &fontsheet_spec::GlyphRecord::new(11, 0, 7, 10, 0, 0, 7));
        assert_eq!((atlas.width(), atlas.height()), (18, 10));
    }

    #[test]
    fn test_skips_non_printable_and_empty_advances() {
        let font = BoxFont::new(&[(7, 500.0), (65, 600.0), (0x200B, 0.0), (0xD800, 500.0)]);
        let mut recorder = Recorder::default();
        let atlas = build_sheet(&font, &BoxRasterizer::new(255), &BuildOptions::new(10), &mut recorder)
            .unwrap();
        assert_eq!(atlas.metadata().len(), 1);
        assert_eq!(
            recorder.skipped,
            vec![
                (7, SkipReason::NonPrintable),
                (0x200B, SkipReason::NoAdvance { advance: 0 }),
                (0xD800, SkipReason::NonPrintable),
            ]
        );
    }

    #[test]
    fn test_capacity_exceeded_before_rasterizing() {
        let rasterizer = BoxRasterizer::new(255);
        let options = BuildOptions::new(10).with_max_width(6);
        let result = build_sheet(&abc_font(), &rasterizer, &options, &mut NullObserver);
        match result {
            Err(BuildError::Atlas(AtlasError::CapacityExceeded {
                code_point,
                advance,
                max_width,
            })) => assert_eq!((code_point, advance, max_width), (66, 7, 6)),
            other => panic!("expected CapacityExceeded, got {other:?}"),
        }
        assert_eq!(rasterizer.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_binarize_drops_faint_ink() {
        let options = BuildOptions::new(10).with_binarize(true);
        let atlas = build_sheet(&abc_font(), &BoxRasterizer::new(100), &options, &mut NullObserver)
            .unwrap();
        assert_eq!((atlas.width(), atlas.height()), (0, 0));
        assert!(atlas.metadata().records().all(|(_, record)| record.is_empty()));
    }

    #[test]
    fn test_invalid_options() {
        let result = build_sheet(
            &abc_font(),
            &BoxRasterizer::new(255),
            &BuildOptions::new(0),
            &mut NullObserver,
        );
        assert!(matches!(result, Err(BuildError::Options(OptionsError::ZeroFontSize))));
    }

    #[test]
    fn test_build_is_deterministic() {
        let font = BoxFont::new(&(33..127).map(|cp| (cp, 300.0 + cp as f32 * 7.0)).collect::<Vec<_>>());
        let options = BuildOptions::new(10).with_max_width(40);
        let first = build_sheet(&font, &BoxRasterizer::new(200), &options, &mut NullObserver).unwrap();
        let second = build_sheet(&font, &BoxRasterizer::new(200), &options, &mut NullObserver).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_write_sheet_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let atlas = build_sheet(
            &abc_font(),
            &BoxRasterizer::new(255),
            &BuildOptions::new(10),
            &mut NullObserver,
        )
        .unwrap();
        let mut recorder = Recorder::default();
        let out_dir = dir.path().join("out");
        let artifacts = write_sheet(&atlas, &out_dir, "abc", true, &mut recorder).unwrap();

        assert_eq!(artifacts.png, out_dir.join("abc.png"));
        assert_eq!(recorder.written.len(), 3);
        assert_eq!((artifacts.width, artifacts.height, artifacts.glyphs), (11, 7, 3));

        let png_bytes = std::fs::read(&artifacts.png).unwrap();
        assert_eq!(hash_png(&png_bytes), artifacts.png_hash);
        let image = read_rgba(&png_bytes).unwrap();
        assert_eq!((image.width, image.height), (11, 7));
        assert_eq!(image.data, atlas.canvas().to_rgba8());

        let json = std::fs::read_to_string(&artifacts.json).unwrap();
        assert!(json.contains("\n  \"fontSize\": 10"));
        assert_eq!(&SheetMetadata::from_json(&json).unwrap(), atlas.metadata());

        let fnt = std::fs::read_to_string(&artifacts.fnt).unwrap();
        assert_eq!(&SheetMetadata::from_fnt(&fnt).unwrap(), atlas.metadata());
    }

    #[test]
    fn test_empty_sheet_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let font = BoxFont::new(&[(32, 500.0)]);
        let atlas = build_sheet(&font, &BoxRasterizer::new(255), &BuildOptions::new(10), &mut NullObserver)
            .unwrap();
        let out_dir = dir.path().join("out");
        let result = write_sheet(&atlas, &out_dir, "blank", false, &mut NullObserver);
        assert!(matches!(result, Err(BuildError::EmptySheet { ref name }) if name == "blank"));
        assert!(!out_dir.exists());
    }

    #[test]
    fn test_missing_font_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = build_font_file(
            &dir.path().join("nope.ttf"),
            0,
            &BuildOptions::new(12),
            dir.path(),
            "nope",
            &mut NullObserver,
        );
        assert!(matches!(result, Err(BuildError::Font(FontError::Io { .. }))));
    }

    #[test]
    fn test_build_font_file_from_truetype() {
        let dir = tempfile::tempdir().unwrap();
        let font_file = dir.path().join("square.ttf");
        std::fs::write(&font_file, crate::font::test_font::square_font()).unwrap();
        let out_dir = dir.path().join("out");

        let artifacts = build_font_file(
            &font_file,
            0,
            &BuildOptions::new(10),
            &out_dir,
            "square",
            &mut NullObserver,
        )
        .unwrap();
        assert_eq!(artifacts.glyphs, 3);

        let json = std::fs::read_to_string(&artifacts.json).unwrap();
        let metadata = SheetMetadata::from_json(&json).unwrap();
        assert_eq!(metadata.font_size, 10);
        assert_eq!((metadata.ascent, metadata.descent), (8.0, -2.0));
        assert_eq!(
            metadata.get(32),
            Some(&fontsheet_spec::GlyphRecord::new(0, 0, 0, 0, 0, 0, 3))
        );

        let a = *metadata.get(65).unwrap();
        let b = *metadata.get(66).unwrap();
        assert_eq!(a.advance, 6);
        assert!(!a.is_empty());
        assert_eq!((a.x, a.y), (0, 0));
        assert_eq!(
            (b.width, b.height, b.offset_x, b.offset_y, b.advance),
            (a.width, a.height, a.offset_x, a.offset_y, a.advance)
        );
        assert_eq!((b.x, b.y), (a.width + 1, 0));
        assert_eq!(artifacts.height, a.height + 1);
    }

    #[test]
    fn test_manifest_targets_fail_independently() {
        let dir = tempfile::tempdir().unwrap();
        let out_dir = dir.path().join("build");
        std::fs::create_dir_all(&out_dir).unwrap();
        std::fs::write(out_dir.join("stale.txt"), "old").unwrap();

        let json = serde_json::json!({
            "outputDir": out_dir,
            "clean": true,
            "builds": [
                { "name": "first", "fontFile": dir.path().join("a.ttf"), "fontSize": 8 },
                { "name": "second", "fontFile": dir.path().join("b.ttf"), "fontSize": 12 }
            ]
        });
        let manifest = BuildManifest::from_json(&json.to_string()).unwrap();
        let outcomes = build_manifest(&manifest, |_| NullObserver).unwrap();

        let names: Vec<&str> = outcomes.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert!(outcomes.iter().all(|o| o.result.is_err()));
        assert!(out_dir.exists());
        assert!(!out_dir.join("stale.txt").exists());
    }
}
