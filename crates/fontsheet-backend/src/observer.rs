//! Build progress reporting.
//!
//! [`build_sheet`](crate::build::build_sheet) reports what it does through a
//! [`BuildObserver`]. Every hook has an empty default so observers only
//! implement what they care about.

use std::fmt;
use std::path::Path;

use fontsheet_spec::FontMetrics;

use crate::trim::TrimOffset;

/// Why a mapped character was left off the sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Not a Unicode scalar value, or a control character.
    NonPrintable,
    /// The scaled advance is zero or negative.
    NoAdvance { advance: i64 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NonPrintable => f.write_str("non-printable"),
            SkipReason::NoAdvance { advance } => write!(f, "advance {advance}px"),
        }
    }
}

/// Receives build events.
///
/// Observers are called from the thread driving the build, in code point
/// order, except [`BuildObserver::glyph_rasterized`] which is called once
/// per glyph after the parallel stage, still in code point order.
pub trait BuildObserver {
    /// Font tables were read and scaled.
    fn font_loaded(&mut self, _metrics: &FontMetrics, _characters: usize) {}

    /// A glyph was rasterized and trimmed to `size` at `offset`.
    fn glyph_rasterized(&mut self, _code_point: u32, _size: (u32, u32), _offset: TrimOffset) {}

    /// A character was not placed on the sheet.
    fn glyph_skipped(&mut self, _code_point: u32, _reason: SkipReason) {}

    /// The sheet grew.
    fn sheet_resized(&mut self, _width: u32, _height: u32) {}

    /// An output file was written.
    fn artifact_written(&mut self, _path: &Path) {}
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl BuildObserver for NullObserver {}

/// Forwards events to the `log` facade.
#[derive(Debug, Clone, Default)]
pub struct LogObserver {
    label: String,
}

impl LogObserver {
    /// Prefix every message with `label`, typically the sheet name.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl BuildObserver for LogObserver {
    fn font_loaded(&mut self, metrics: &FontMetrics, characters: usize) {
        log::info!(
            "[{}] {}px: ascent {:.3}, descent {:.3}, line gap {:.3}, {} characters",
            self.label,
            metrics.font_size,
            metrics.ascent,
            metrics.descent,
            metrics.line_gap,
            characters
        );
    }

    fn glyph_rasterized(&mut self, code_point: u32, size: (u32, u32), offset: TrimOffset) {
        log::debug!(
            "[{}] U+{:04X}: {}x{} at offset ({}, {})",
            self.label,
            code_point,
            size.0,
            size.1,
            offset.x,
            offset.y
        );
    }

    fn glyph_skipped(&mut self, code_point: u32, reason: SkipReason) {
        log::trace!("[{}] skipped U+{:04X}: {}", self.label, code_point, reason);
    }

    fn sheet_resized(&mut self, width: u32, height: u32) {
        log::info!("[{}] sheet is now {}x{}", self.label, width, height);
    }

    fn artifact_written(&mut self, path: &Path) {
        log::info!("[{}] wrote {}", self.label, path.display());
    }
}

impl<T: BuildObserver + ?Sized> BuildObserver for &mut T {
    fn font_loaded(&mut self, metrics: &FontMetrics, characters: usize) {
        (**self).font_loaded(metrics, characters)
    }

    fn glyph_rasterized(&mut self, code_point: u32, size: (u32, u32), offset: TrimOffset) {
        (**self).glyph_rasterized(code_point, size, offset)
    }

    fn glyph_skipped(&mut self, code_point: u32, reason: SkipReason) {
        (**self).glyph_skipped(code_point, reason)
    }

    fn sheet_resized(&mut self, width: u32, height: u32) {
        (**self).sheet_resized(width, height)
    }

    fn artifact_written(&mut self, path: &Path) {
        (**self).artifact_written(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_reason_display() {
        assert_eq!(SkipReason::NonPrintable.to_string(), "non-printable");
        assert_eq!(SkipReason::NoAdvance { advance: -2 }.to_string(), "advance -2px");
    }

    #[derive(Default)]
    struct Counter {
        resizes: usize,
    }

    impl BuildObserver for Counter {
        fn sheet_resized(&mut self, _width: u32, _height: u32) {
            self.resizes += 1;
        }
    }

    fn drive(mut observer: impl BuildObserver) {
        observer.glyph_skipped(1, SkipReason::NonPrintable);
        observer.sheet_resized(1, 1);
        observer.artifact_written(Path::new("x.png"));
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let mut counter = Counter::default();
        drive(&mut counter);
        drive(&mut counter);
        assert_eq!(counter.resizes, 2);

        let mut log = LogObserver::new("test");
        log.sheet_resized(4, 4);
        NullObserver.sheet_resized(4, 4);
    }
}
