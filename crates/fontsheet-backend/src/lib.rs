//! fontsheet glyph sheet backend
//!
//! This crate turns a font file into a static bitmap glyph sheet: one PNG
//! holding every printable character the font maps, plus per-character
//! metadata as JSON and `.fnt`. Output is byte-identical for the same font
//! and options.
//!
//! # Pipeline
//!
//! - **Rasterize**: each character is drawn into an `advance x line height`
//!   canvas ([`GlyphRasterizer`])
//! - **Trim**: transparent borders are removed and the offset recorded
//!   ([`trim()`])
//! - **Pack**: glyphs are placed on shelves of a sheet that grows on demand
//!   ([`ShelfPacker`])
//! - **Composite**: glyph pixels are copied onto the sheet ([`SheetCanvas`])
//! - **Record**: one [`GlyphRecord`](fontsheet_spec::GlyphRecord) per
//!   character ([`AtlasBuilder`])
//!
//! # Example
//!
//! ```no_run
//! use fontsheet_backend::{build_font_file, LogObserver};
//! use fontsheet_spec::BuildOptions;
//! use std::path::Path;
//!
//! let options = BuildOptions::new(16).with_binarize(true);
//! let artifacts = build_font_file(
//!     Path::new("fonts/unifont.otf"),
//!     0,
//!     &options,
//!     Path::new("build"),
//!     "unifont",
//!     &mut LogObserver::new("unifont"),
//! )
//! .unwrap();
//! println!("{}x{} sheet, {}", artifacts.width, artifacts.height, artifacts.png_hash);
//! ```

pub mod atlas;
pub mod bitmap;
pub mod build;
pub mod canvas;
pub mod font;
pub mod observer;
pub mod packer;
pub mod png;
pub mod trim;

// Re-export main types for convenience
pub use atlas::{Atlas, AtlasBuilder, AtlasError};
pub use bitmap::{GlyphBitmap, Pixel, BINARIZE_THRESHOLD};
pub use build::{
    build_font_file, build_manifest, build_sheet, is_printable, write_sheet, BuildError,
    SheetArtifacts, TargetOutcome,
};
pub use canvas::SheetCanvas;
pub use font::{
    CharEntry, DesignMetrics, FontError, FontFace, FontTables, FontdueRasterizer, GlyphRasterizer,
};
pub use observer::{BuildObserver, LogObserver, NullObserver, SkipReason};
pub use packer::{Placement, ShelfPacker};
pub use png::{PngConfig, PngError};
pub use trim::{trim, TrimOffset};
