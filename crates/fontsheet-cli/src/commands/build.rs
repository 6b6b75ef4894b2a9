//! Build command implementation
//!
//! Builds one glyph sheet from one font file at one size.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use fontsheet_backend::{build_font_file, LogObserver, SheetArtifacts};
use fontsheet_spec::{is_valid_name, BuildOptions};
use std::path::Path;
use std::process::ExitCode;

/// Run the build command
///
/// # Arguments
/// * `font` - Path to the font file
/// * `index` - Face index inside a font collection
/// * `out_dir` - Directory to write the artifacts into
/// * `name` - Base name of the artifacts (default: font file stem)
/// * `options` - Build options
///
/// # Returns
/// Exit code: 0 success, 1 error
pub fn run(
    font: &str,
    index: u32,
    out_dir: &str,
    name: Option<&str>,
    options: &BuildOptions,
) -> Result<ExitCode> {
    let font_path = Path::new(font);
    let name = match name {
        Some(name) => name.to_string(),
        None => default_name(font_path)?,
    };
    if !is_valid_name(&name) {
        bail!(
            "Invalid output name '{}': must be non-empty and must not contain path separators",
            name
        );
    }

    println!("{} {} at {}px", "Building:".cyan().bold(), font, options.font_size);

    let mut observer = LogObserver::new(&name);
    let result = build_font_file(
        font_path,
        index,
        options,
        Path::new(out_dir),
        &name,
        &mut observer,
    );

    match result {
        Ok(artifacts) => {
            print_artifacts(&artifacts);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_capacity_exceeded() => {
            Err(e).context("Sheet width limit is too small for this font size; raise --max-width")
        }
        Err(e) => Err(e).with_context(|| format!("Failed to build sheet from: {}", font)),
    }
}

/// File stem of the font path.
pub fn default_name(font_path: &Path) -> Result<String> {
    font_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .with_context(|| format!("Cannot derive an output name from: {}", font_path.display()))
}

pub(crate) fn print_artifacts(artifacts: &SheetArtifacts) {
    println!(
        "{} {}x{} sheet, {} glyphs",
        "SUCCESS".green().bold(),
        artifacts.width,
        artifacts.height,
        artifacts.glyphs
    );
    for path in [&artifacts.png, &artifacts.json, &artifacts.fnt] {
        println!("  {} {}", "->".dimmed(), path.display());
    }
    println!("  {} {}", "blake3:".dimmed(), artifacts.png_hash);
}
