//! Build-all command implementation
//!
//! Runs every build listed in a manifest file and reports a summary.
//! Builds run in parallel and fail independently.

use anyhow::{Context, Result};
use colored::Colorize;
use fontsheet_backend::{build_manifest, LogObserver, TargetOutcome};
use fontsheet_spec::BuildManifest;
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::build::print_artifacts;

/// Run the build-all command
///
/// # Arguments
/// * `manifest_path` - Path to the manifest JSON file
///
/// # Returns
/// Exit code: 0 if every build succeeded, 1 otherwise
pub fn run(manifest_path: &str) -> Result<ExitCode> {
    let manifest = load_manifest(Path::new(manifest_path))?;

    println!("{} {}", "Manifest:".blue().bold(), manifest_path);
    println!(
        "{} {}",
        "Output directory:".blue().bold(),
        manifest.output_dir.display()
    );
    println!("{} {}", "Builds:".blue().bold(), manifest.builds.len());
    println!();

    let start = Instant::now();
    let outcomes = build_manifest(&manifest, |target| LogObserver::new(&target.name))
        .with_context(|| {
            format!(
                "Failed to prepare output directory: {}",
                manifest.output_dir.display()
            )
        })?;
    let failed = report(&outcomes);

    println!();
    println!(
        "{} {} succeeded, {} failed in {:.2}s",
        "Summary:".cyan().bold(),
        outcomes.len() - failed,
        failed,
        start.elapsed().as_secs_f64()
    );

    if failed == 0 {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Read and validate a manifest, resolving its paths against the
/// manifest's own directory.
pub fn load_manifest(path: &Path) -> Result<BuildManifest> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read manifest file: {}", path.display()))?;
    let mut manifest = BuildManifest::from_json(&content)
        .with_context(|| format!("Invalid manifest: {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
    manifest.resolve_paths(base_dir);
    Ok(manifest)
}

/// Print one line per outcome and return the number of failures.
fn report(outcomes: &[TargetOutcome]) -> usize {
    let mut failed = 0;
    for outcome in outcomes {
        match &outcome.result {
            Ok(artifacts) => {
                println!("{} {}", "Built:".green().bold(), outcome.name);
                print_artifacts(artifacts);
            }
            Err(e) => {
                failed += 1;
                println!("{} {}: {}", "FAILED".red().bold(), outcome.name, e);
            }
        }
    }
    failed
}
