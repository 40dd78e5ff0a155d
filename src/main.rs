use clap::Parser;
use data_insight::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    if let Err(error) = commands::run(args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Data Insight - Business File Cleaning and KPI Health");
    println!("====================================================");
    println!();
    println!("Clean a CSV or Excel business file, score how ready it is for analysis,");
    println!("and explain the monthly trend and financial health of one KPI.");
    println!();
    println!("USAGE:");
    println!("    data-insight <COMMAND> <FILE> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    inspect     Show the overview, cleaning log and quality report");
    println!("    analyze     Run the full analysis, including KPI trend and health");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Check a file before analysis:");
    println!("    data-insight inspect sales.xlsx");
    println!();
    println!("    # Analyze revenue by order date and export the cleaned data:");
    println!("    data-insight analyze sales.csv --date-column order_date \\");
    println!("                                   --kpi-column revenue --export");
    println!();
    println!("    # Outlier-aware readiness scoring with JSON output:");
    println!("    data-insight analyze sales.csv --variant b --format json");
    println!();
    println!("For detailed help on any command, use:");
    println!("    data-insight <COMMAND> --help");
}
