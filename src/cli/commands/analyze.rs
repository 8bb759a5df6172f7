//! Analyze command implementation
//!
//! Re-reads a previously filtered CSV, recomputes the statistics document,
//! and renders it as JSON or a plain-text report.

use super::shared::{setup_logging, write_text};
use crate::app::services::aggregator::Statistics;
use crate::app::services::csv_writer;
use crate::app::services::report;
use crate::cli::args::{AnalyzeArgs, OutputFormat};
use crate::Result;
use tracing::{debug, info};

/// Run the analyze command
pub fn run_analyze(args: AnalyzeArgs) -> Result<Statistics> {
    setup_logging(args.get_log_level());
    info!("Starting gazetteer analysis");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    let records = csv_writer::read_records(&args.input_file)?;
    info!("Analyzing {} records", records.len());

    // Statistics are recomputed from scratch on every run; the CSV is the
    // only input
    let stats = Statistics::compute(&records);

    if let Some(path) = &args.stats_file {
        write_text(path, &stats.to_json_pretty()?)?;
        info!("Statistics JSON written to '{}'", path.display());
    }

    if let Some(path) = &args.report_file {
        write_text(path, &report::render(&stats, &records))?;
        info!("Report written to '{}'", path.display());
    }

    match args.output_format {
        OutputFormat::Human => print!("{}", report::render(&stats, &records)),
        OutputFormat::Json => println!("{}", stats.to_json_pretty()?),
    }

    Ok(stats)
}
