//! Inspect command implementation
//!
//! Summarizes a sheet's metadata and optionally checks it against the
//! sheet image.

use anyhow::{Context, Result};
use colored::Colorize;
use fontsheet_backend::png::read_rgba_file;
use fontsheet_spec::SheetMetadata;
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::process::ExitCode;

/// Machine-readable inspection result.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub font_size: u32,
    pub ascent: f64,
    pub descent: f64,
    pub line_gap: f64,
    pub line_height: u32,
    /// Total number of records.
    pub sprites: usize,
    /// Records with pixels on the sheet.
    pub placed: usize,
    /// Smallest sheet size that holds every placed record.
    pub extent: [u32; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageCheck>,
}

/// Sheet image dimensions compared with the records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCheck {
    pub width: u32,
    pub height: u32,
    /// Every placed record lies inside the image.
    pub covers_records: bool,
}

/// Run the inspect command
///
/// # Arguments
/// * `metadata_path` - Path to a `.json` or `.fnt` metadata file
/// * `png_path` - Optional sheet image to check against the metadata
/// * `json_output` - Print a JSON report instead of colored text
///
/// # Returns
/// Exit code: 0 success, 1 if the image does not cover the records
pub fn run(metadata_path: &str, png_path: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let path = Path::new(metadata_path);
    let metadata = load_metadata(path)?;

    let image = match png_path {
        Some(png_path) => {
            let image = read_rgba_file(Path::new(png_path))
                .with_context(|| format!("Failed to read sheet image: {}", png_path))?;
            Some((image.width, image.height))
        }
        None => None,
    };
    let report = build_report(&metadata, image);

    if json_output {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{}", json);
    } else {
        print_report(metadata_path, &report);
    }

    match &report.image {
        Some(check) if !check.covers_records => Ok(ExitCode::from(1)),
        _ => Ok(ExitCode::SUCCESS),
    }
}

/// Parse `.fnt` files with the `.fnt` codec and everything else as JSON.
pub fn load_metadata(path: &Path) -> Result<SheetMetadata> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read metadata file: {}", path.display()))?;
    let is_fnt = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("fnt"));
    let metadata = if is_fnt {
        SheetMetadata::from_fnt(&content)
            .with_context(|| format!("Failed to parse .fnt file: {}", path.display()))?
    } else {
        SheetMetadata::from_json(&content)
            .with_context(|| format!("Failed to parse JSON metadata: {}", path.display()))?
    };
    Ok(metadata)
}

/// Summarize `metadata`, comparing it with an image of `image` dimensions.
pub fn build_report(metadata: &SheetMetadata, image: Option<(u32, u32)>) -> InspectReport {
    let (width, height) = metadata.extent(0);
    let placed = metadata.records().filter(|(_, r)| !r.is_empty()).count();
    InspectReport {
        font_size: metadata.font_size,
        ascent: metadata.ascent,
        descent: metadata.descent,
        line_gap: metadata.line_gap,
        line_height: metadata.metrics().line_height(),
        sprites: metadata.len(),
        placed,
        extent: [width, height],
        image: image.map(|(image_width, image_height)| ImageCheck {
            width: image_width,
            height: image_height,
            covers_records: width <= image_width && height <= image_height,
        }),
    }
}

fn print_report(metadata_path: &str, report: &InspectReport) {
    println!("{} {}", "Metadata:".cyan().bold(), metadata_path);
    println!("  {} {}px", "Font size:".blue().bold(), report.font_size);
    println!(
        "  {} ascent {}, descent {}, line gap {}",
        "Metrics:".blue().bold(),
        report.ascent,
        report.descent,
        report.line_gap
    );
    println!("  {} {}px", "Line height:".blue().bold(), report.line_height);
    println!(
        "  {} {} ({} placed, {} advance-only)",
        "Sprites:".blue().bold(),
        report.sprites,
        report.placed,
        report.sprites - report.placed
    );
    println!(
        "  {} {}x{}",
        "Record extent:".blue().bold(),
        report.extent[0],
        report.extent[1]
    );

    if let Some(check) = &report.image {
        let status = if check.covers_records {
            "OK".green().bold()
        } else {
            "MISMATCH".red().bold()
        };
        println!(
            "  {} {}x{} {}",
            "Image:".blue().bold(),
            check.width,
            check.height,
            status
        );
    }
}
