//! Shared components for CLI commands
//!
//! Logging setup, progress reporting, and output-file helpers used by both
//! the filter and analyze commands.

use crate::app::services::filter_pipeline::{FilterStats, ProgressObserver};
use crate::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Set up structured logging with the given level
///
/// Respects `RUST_LOG` when set; otherwise filters this crate at `level`.
/// Logs go to stderr so they never mix with report output on stdout.
pub fn setup_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gazetteer_processor={level}")));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}

/// Progress observer backed by an indicatif spinner.
///
/// The gazetteer line count is unknown up front, so this shows a running
/// tally rather than a bounded bar.
pub struct SpinnerObserver {
    spinner: ProgressBar,
}

impl SpinnerObserver {
    /// Create a spinner observer with an initial message
    pub fn new(message: &str) -> Self {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .expect("static template is valid")
                .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { spinner }
    }
}

impl ProgressObserver for SpinnerObserver {
    fn on_progress(&self, processed: usize, accepted: usize) {
        self.spinner.set_message(format!(
            "Processed {processed} lines, {accepted} accepted so far"
        ));
    }

    fn on_complete(&self, stats: &FilterStats) {
        self.spinner.finish_with_message(format!(
            "Processed {} lines, {} accepted",
            stats.processed, stats.accepted
        ));
    }
}

/// Write a text document to a file with I/O error context
pub fn write_text(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content)
        .map_err(|e| Error::io(format!("failed to write '{}'", path.display()), e))
}

/// Derive the per-country filename stem from the combined output path
///
/// `out/cities_filtered.csv` → `cities_filtered`, falling back to `cities`
/// for pathological paths.
pub fn country_file_stem(output_file: &Path) -> String {
    output_file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("cities")
        .to_string()
}
