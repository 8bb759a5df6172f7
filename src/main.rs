use clap::Parser;
use gazetteer_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    match commands::run(args) {
        Ok(true) => {
            // Success - summaries have already been printed by the command
            process::exit(0);
        }
        Ok(false) => {
            // No subcommand was provided; show help and available commands
            show_help_and_commands();
            process::exit(0);
        }
        Err(error) => {
            // Error occurred - print to stderr and exit with error code
            eprintln!("Error: {error:#}");
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Gazetteer Processor - Boundary Filtering and Statistics");
    println!("=======================================================");
    println!();
    println!("Filter GeoNames gazetteer cities against a boundary polygon, apply");
    println!("region-specific rules, and produce grouped statistical summaries.");
    println!();
    println!("USAGE:");
    println!("    gazetteer-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    filter      Filter gazetteer records against a boundary polygon (main command)");
    println!("    analyze     Compute statistics and reports from a filtered CSV");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Filter cities and write all outputs:");
    println!("    gazetteer-processor filter --cities cities500.txt --boundary border.txt \\");
    println!("                               --output cities_filtered.csv --by-country-dir out \\");
    println!("                               --stats statistics.json --report report.txt");
    println!();
    println!("    # Re-analyze a previously filtered CSV:");
    println!("    gazetteer-processor analyze --input cities_filtered.csv --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    gazetteer-processor <COMMAND> --help");
}
