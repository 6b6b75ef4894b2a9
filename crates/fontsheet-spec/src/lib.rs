//! fontsheet data model
//!
//! This crate provides the types shared by the fontsheet backend and CLI:
//! the options that control a single font/size build, the manifest that
//! lists many builds, and the metadata that describes a finished glyph
//! sheet.
//!
//! # Example
//!
//! ```
//! use fontsheet_spec::{BuildOptions, FontMetrics, GlyphRecord, SheetMetadata};
//!
//! let options = BuildOptions::new(12).with_max_width(512).with_pretty_json(true);
//! assert!(options.validate().is_ok());
//!
//! let mut metadata = SheetMetadata::new(FontMetrics {
//!     font_size: 12,
//!     ascent: 11.0,
//!     descent: -3.0,
//!     line_gap: 0.0,
//! });
//! metadata.insert(65, GlyphRecord::new(0, 0, 6, 9, 1, 2, 7));
//!
//! let json = metadata.to_json(false).unwrap();
//! assert_eq!(SheetMetadata::from_json(&json).unwrap(), metadata);
//!
//! let fnt = metadata.to_fnt();
//! assert_eq!(SheetMetadata::from_fnt(&fnt).unwrap(), metadata);
//! ```
//!
//! # Modules
//!
//! - [`options`]: Per-build configuration surface and its validation
//! - [`manifest`]: Multi-build manifest files
//! - [`metadata`]: Font metrics, glyph records and the JSON codec
//! - [`fnt`]: The line-oriented `.fnt` codec

pub mod fnt;
pub mod manifest;
pub mod metadata;
pub mod options;

pub use fnt::FntError;
pub use manifest::{is_valid_name, BuildManifest, BuildTarget, ManifestError};
pub use metadata::{FontMetrics, GlyphRecord, MetadataError, SheetMetadata};
pub use options::{BuildOptions, OptionsError, DEFAULT_SHEET_MAX_WIDTH};
