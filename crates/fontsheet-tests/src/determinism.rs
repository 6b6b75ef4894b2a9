//! Determinism helpers.

use fontsheet_backend::png::{encode_canvas_with_hash, PngConfig};
use fontsheet_backend::{build_sheet, BuildError, FontTables, GlyphRasterizer, NullObserver};
use fontsheet_spec::BuildOptions;

/// BLAKE3 of the encoded PNG plus the compact JSON metadata of one build.
pub fn build_hash<T, R>(tables: &T, rasterizer: &R, options: &BuildOptions) -> Result<String, BuildError>
where
    T: FontTables,
    R: GlyphRasterizer,
{
    let atlas = build_sheet(tables, rasterizer, options, &mut NullObserver)?;
    let mut hasher = blake3::Hasher::new();
    if atlas.width() > 0 && atlas.height() > 0 {
        let (bytes, _) = encode_canvas_with_hash(atlas.canvas(), &PngConfig::default())?;
        hasher.update(&bytes);
    }
    hasher.update(atlas.metadata().to_json(false)?.as_bytes());
    Ok(hasher.finalize().to_hex().to_string())
}

/// Run `build_hash` `runs` times and report whether every hash matched.
pub fn verify_determinism<T, R>(
    tables: &T,
    rasterizer: &R,
    options: &BuildOptions,
    runs: usize,
) -> Result<bool, BuildError>
where
    T: FontTables,
    R: GlyphRasterizer,
{
    let first = build_hash(tables, rasterizer, options)?;
    for _ in 1..runs {
        if build_hash(tables, rasterizer, options)? != first {
            return Ok(false);
        }
    }
    Ok(true)
}
