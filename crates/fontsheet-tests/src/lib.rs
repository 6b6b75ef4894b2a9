//! fontsheet End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the sheet pipeline:
//!
//! - Packing: layout scenarios and capacity failures
//! - Artifacts: PNG, JSON and `.fnt` output read back and compared
//! - **Properties**: trimming, packing and determinism under random input
//!
//! Tests never need a real font file. [`fixtures`] provides synthetic
//! [`FontTables`](fontsheet_backend::FontTables) and
//! [`GlyphRasterizer`](fontsheet_backend::GlyphRasterizer) implementations
//! with predictable pixels.
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p fontsheet-tests
//!
//! # Property tests only
//! cargo test -p fontsheet-tests --test proptest_properties
//! ```

pub mod determinism;
pub mod fixtures;

// Re-export commonly used items
pub use determinism::{build_hash, verify_determinism};
pub use fixtures::{BlockRasterizer, PatternRasterizer, SyntheticFont};
