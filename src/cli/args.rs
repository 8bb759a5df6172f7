//! Command-line argument definitions for the gazetteer processor
//!
//! This module defines the complete CLI interface using the clap derive API.

use crate::{Error, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the gazetteer processor
///
/// Filters GeoNames gazetteer cities against a boundary polygon, applies
/// region-specific rules, and produces CSV, JSON and plain-text outputs.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "gazetteer-processor",
    version,
    about = "Filter gazetteer cities against a boundary polygon and compute per-country statistics",
    long_about = "Processes a GeoNames cities file against a user-supplied boundary polygon, \
                  applies ordered region-specific inclusion/adjustment rules, and produces \
                  sorted CSV outputs, a JSON statistics document, and a plain-text report."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the gazetteer processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Filter gazetteer records against a boundary polygon (main command)
    Filter(FilterArgs),
    /// Compute statistics and reports from a previously filtered CSV
    Analyze(AnalyzeArgs),
}

/// Arguments for the filter command (main filtering pipeline)
#[derive(Debug, Clone, Parser)]
pub struct FilterArgs {
    /// Input gazetteer file
    ///
    /// Tab-separated GeoNames format (cities500.txt), one record per line,
    /// 19 positional columns, no header row.
    #[arg(
        short = 'i',
        long = "cities",
        value_name = "FILE",
        help = "Input gazetteer file (GeoNames tab-separated format)"
    )]
    pub cities_file: PathBuf,

    /// Boundary polygon file
    ///
    /// Either a GeoJSON-style document with a coordinate ring, or free text
    /// with one longitude/latitude pair per line (comma or whitespace
    /// separated, longitude first).
    #[arg(
        short = 'b',
        long = "boundary",
        value_name = "FILE",
        help = "Boundary polygon file (GeoJSON-style or coordinate pairs)"
    )]
    pub boundary_file: PathBuf,

    /// Combined CSV output path
    ///
    /// All accepted records, sorted by country code ascending then
    /// population descending.
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = "cities_filtered.csv",
        help = "Combined CSV output path"
    )]
    pub output_file: PathBuf,

    /// Directory for per-country CSV files
    ///
    /// If specified, one CSV file per distinct country code is written
    /// there, each sorted by population descending. Created if missing.
    #[arg(
        long = "by-country-dir",
        value_name = "DIR",
        help = "Write one CSV file per country code into this directory"
    )]
    pub by_country_dir: Option<PathBuf>,

    /// Statistics JSON output path
    #[arg(
        long = "stats",
        value_name = "FILE",
        help = "Write the statistics document as JSON to this path"
    )]
    pub stats_file: Option<PathBuf>,

    /// Plain-text report output path
    #[arg(
        long = "report",
        value_name = "FILE",
        help = "Write the human-readable report to this path"
    )]
    pub report_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors; also disables the progress bar.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the analyze command (statistics over a filtered CSV)
#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    /// Input CSV in the tabular output schema of the filter command
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Filtered cities CSV to analyze"
    )]
    pub input_file: PathBuf,

    /// Statistics JSON output path
    #[arg(
        long = "stats",
        value_name = "FILE",
        help = "Write the statistics document as JSON to this path"
    )]
    pub stats_file: Option<PathBuf>,

    /// Plain-text report output path
    #[arg(
        long = "report",
        value_name = "FILE",
        help = "Write the human-readable report to this path"
    )]
    pub report_file: Option<PathBuf>,

    /// Output format for stdout rendering
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Stdout rendering format"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,
}

/// Output format options for stdout rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Human,
    /// JSON statistics document for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

impl FilterArgs {
    /// Validate the filter command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.cities_file.exists() {
            return Err(Error::configuration(format!(
                "Cities file does not exist: {}",
                self.cities_file.display()
            )));
        }

        if !self.boundary_file.exists() {
            return Err(Error::configuration(format!(
                "Boundary file does not exist: {}",
                self.boundary_file.display()
            )));
        }

        if let Some(parent) = self.output_file.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(Error::configuration(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

impl AnalyzeArgs {
    /// Validate the analyze command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_file.exists() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                self.input_file.display()
            )));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
