//! Filter command implementation
//!
//! Orchestrates the full run: load the boundary polygon, stream the
//! gazetteer through the filtering pipeline, write the CSV outputs, and
//! optionally the statistics JSON and the plain-text report.

use super::shared::{SpinnerObserver, country_file_stem, setup_logging, write_text};
use crate::app::services::aggregator::Statistics;
use crate::app::services::boundary::Polygon;
use crate::app::services::csv_writer;
use crate::app::services::filter_pipeline::{FilterPipeline, FilterStats, NullObserver};
use crate::app::services::report;
use crate::cli::args::FilterArgs;
use crate::config::PipelineConfig;
use crate::Result;
use colored::Colorize;
use std::time::Instant;
use tracing::{debug, info};

/// Run the filter command
pub fn run_filter(args: FilterArgs) -> Result<FilterStats> {
    let start = Instant::now();

    setup_logging(args.get_log_level());
    info!("Starting gazetteer filter");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;

    // Structural failures (missing files, unusable polygon) abort here,
    // before any record is read
    let polygon = Polygon::load(&args.boundary_file)?;
    if !args.quiet {
        let bbox = polygon.bounding_box();
        println!(
            "Polygon loaded: {} vertices, bounds ({:.4}, {:.4}) to ({:.4}, {:.4})",
            polygon.vertex_count(),
            bbox.min_lon,
            bbox.min_lat,
            bbox.max_lon,
            bbox.max_lat
        );
    }

    let pipeline = FilterPipeline::new(polygon, PipelineConfig::default());

    let result = if args.show_progress() {
        let observer = SpinnerObserver::new("Filtering gazetteer records");
        pipeline.run_file(&args.cities_file, &observer)?
    } else {
        pipeline.run_file(&args.cities_file, &NullObserver)?
    };

    csv_writer::write_combined(&result.records, &args.output_file)?;

    if let Some(dir) = &args.by_country_dir {
        let stem = country_file_stem(&args.output_file);
        csv_writer::write_by_country(&result.records, dir, &stem)?;
    }

    // Zero accepted records is not an error: the statistics document and
    // report still come out well-formed with all-zero aggregates
    if args.stats_file.is_some() || args.report_file.is_some() {
        let stats = Statistics::compute(&result.records);

        if let Some(path) = &args.stats_file {
            write_text(path, &stats.to_json_pretty()?)?;
            info!("Statistics JSON written to '{}'", path.display());
        }

        if let Some(path) = &args.report_file {
            write_text(path, &report::render(&stats, &result.records))?;
            info!("Report written to '{}'", path.display());
        }
    }

    if !args.quiet {
        print_summary(&result.stats, start.elapsed());
    }

    Ok(result.stats)
}

/// Print the final counters; every counter is shown even when zero
fn print_summary(stats: &FilterStats, elapsed: std::time::Duration) {
    println!();
    println!("{}", "Filtering complete".green().bold());
    println!("  Lines processed:        {}", stats.processed);
    println!("  Malformed (skipped):    {}", stats.malformed);
    println!("  Outside boundary:       {}", stats.excluded_geometry);
    println!("  Excluded by name rule:  {}", stats.excluded_name);
    println!("  Below population floor: {}", stats.excluded_population_floor);
    println!(
        "  Accepted:               {}",
        stats.accepted.to_string().cyan().bold()
    );
    println!("  Elapsed:                {:.2?}", elapsed);
}
