//! fontsheet CLI - Command-line interface for bitmap glyph sheets
//!
//! This binary builds glyph sheets from font files, runs build manifests,
//! and inspects the metadata of existing sheets.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use fontsheet_cli::commands;
use fontsheet_spec::DEFAULT_SHEET_MAX_WIDTH;

/// fontsheet - Static bitmap glyph sheet generator
#[derive(Parser)]
#[command(name = "fontsheet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build one glyph sheet from a font file
    Build {
        /// Path to the font file (TTF, OTF or collection)
        #[arg(short, long)]
        font: String,

        /// Font size in pixels per em
        #[arg(short, long)]
        size: u32,

        /// Directory to write the .png, .json and .fnt files into
        #[arg(short, long)]
        out_dir: String,

        /// Base name of the output files (default: font file stem)
        #[arg(short, long)]
        name: Option<String>,

        /// Maximum sheet width in pixels
        #[arg(long, default_value_t = DEFAULT_SHEET_MAX_WIDTH)]
        max_width: u32,

        /// Keep transparent glyph borders instead of trimming them
        #[arg(long)]
        no_trim: bool,

        /// Do not reserve a transparent pixel after each glyph
        #[arg(long)]
        no_safe_edge: bool,

        /// Snap coverage to fully opaque or fully transparent
        #[arg(long)]
        binarize: bool,

        /// Write indented JSON metadata
        #[arg(long)]
        pretty: bool,

        /// Face index inside a font collection
        #[arg(long, default_value_t = 0)]
        index: u32,
    },

    /// Build every sheet listed in a manifest file
    BuildAll {
        /// Path to the manifest JSON file
        #[arg(short, long)]
        manifest: String,
    },

    /// Print the contents of a sheet's metadata
    Inspect {
        /// Path to a .json or .fnt metadata file
        #[arg(short, long)]
        metadata: String,

        /// Check the sheet image against the metadata
        #[arg(long)]
        png: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Build {
            font,
            size,
            out_dir,
            name,
            max_width,
            no_trim,
            no_safe_edge,
            binarize,
            pretty,
            index,
        } => {
            let options = fontsheet_spec::BuildOptions::new(size)
                .with_max_width(max_width)
                .with_offset_optimize(!no_trim)
                .with_safe_edge(!no_safe_edge)
                .with_binarize(binarize)
                .with_pretty_json(pretty);
            commands::build::run(&font, index, &out_dir, name.as_deref(), &options)
        }
        Commands::BuildAll { manifest } => commands::build_all::run(&manifest),
        Commands::Inspect {
            metadata,
            png,
            json,
        } => commands::inspect::run(&metadata, png.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_build_defaults() {
        let cli = Cli::try_parse_from([
            "fontsheet",
            "build",
            "--font",
            "fonts/roboto.ttf",
            "--size",
            "24",
            "--out-dir",
            "build",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 0);
        match cli.command {
            Commands::Build {
                font,
                size,
                out_dir,
                name,
                max_width,
                no_trim,
                no_safe_edge,
                binarize,
                pretty,
                index,
            } => {
                assert_eq!(font, "fonts/roboto.ttf");
                assert_eq!(size, 24);
                assert_eq!(out_dir, "build");
                assert_eq!(name, None);
                assert_eq!(max_width, 1024);
                assert!(!no_trim && !no_safe_edge && !binarize && !pretty);
                assert_eq!(index, 0);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_parses_build_flags() {
        let cli = Cli::try_parse_from([
            "fontsheet",
            "-vv",
            "build",
            "-f",
            "quan.ttf",
            "-s",
            "8",
            "-o",
            "out",
            "--name",
            "quan",
            "--max-width",
            "256",
            "--no-trim",
            "--no-safe-edge",
            "--binarize",
            "--pretty",
            "--index",
            "2",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Build {
                name,
                max_width,
                no_trim,
                no_safe_edge,
                binarize,
                pretty,
                index,
                ..
            } => {
                assert_eq!(name.as_deref(), Some("quan"));
                assert_eq!(max_width, 256);
                assert!(no_trim && no_safe_edge && binarize && pretty);
                assert_eq!(index, 2);
            }
            _ => panic!("expected build command"),
        }
    }

    #[test]
    fn test_cli_requires_size_for_build() {
        let err = Cli::try_parse_from(["fontsheet", "build", "--font", "a.ttf", "--out-dir", "x"])
            .err()
            .unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_parses_build_all() {
        let cli =
            Cli::try_parse_from(["fontsheet", "build-all", "--manifest", "fonts.json", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
        match cli.command {
            Commands::BuildAll { manifest } => assert_eq!(manifest, "fonts.json"),
            _ => panic!("expected build-all command"),
        }
    }

    #[test]
    fn test_cli_parses_inspect() {
        let cli = Cli::try_parse_from([
            "fontsheet",
            "inspect",
            "--metadata",
            "build/roboto.fnt",
            "--png",
            "build/roboto.png",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Inspect {
                metadata,
                png,
                json,
            } => {
                assert_eq!(metadata, "build/roboto.fnt");
                assert_eq!(png.as_deref(), Some("build/roboto.png"));
                assert!(json);
            }
            _ => panic!("expected inspect command"),
        }
    }

    #[test]
    fn test_cli_rejects_negative_size() {
        assert!(Cli::try_parse_from([
            "fontsheet",
            "build",
            "--font",
            "a.ttf",
            "--size",
            "-3",
            "--out-dir",
            "x"
        ])
        .is_err());
    }
}
