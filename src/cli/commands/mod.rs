//! Command implementations for the gazetteer processor CLI
//!
//! Each command lives in its own module; `shared` holds logging setup and
//! progress helpers used by both.

pub mod analyze;
pub mod filter;
pub mod shared;

use crate::cli::args::{Args, Commands};
use crate::Result;

/// Dispatch to the appropriate subcommand handler.
///
/// Returns `Ok(false)` when no subcommand was given so the caller can show
/// usage help instead.
pub fn run(args: Args) -> Result<bool> {
    match args.get_command() {
        Some(Commands::Filter(filter_args)) => {
            filter::run_filter(filter_args)?;
            Ok(true)
        }
        Some(Commands::Analyze(analyze_args)) => {
            analyze::run_analyze(analyze_args)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
