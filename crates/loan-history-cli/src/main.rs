mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::annual_summary::{AnnualChartArgs, AnnualSummaryArgs};
use commands::timeline::TimelineArgs;

/// Loan event timelines and annual repayment summaries
#[derive(Parser)]
#[command(
    name = "loanhist",
    version,
    about = "Loan event timelines and annual repayment summaries",
    long_about = "Builds a dated narrative of a loan's lifecycle (disbursements, \
                  prepayments, rate changes, EMI overrides) correlated against its \
                  amortization schedule, and annual principal / interest / prepayment \
                  comparisons. Input is JSON from --input or stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Currency code for amounts when the input does not name one
    #[arg(long, env = "LOANHIST_CURRENCY", default_value = "INR", global = true)]
    currency: String,

    /// Emit debug diagnostics on stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the loan event timeline from a loan and its schedule
    Timeline(TimelineArgs),
    /// Build the annual principal / interest / prepayment chart
    AnnualChart(AnnualChartArgs),
    /// Roll an amortization schedule up into calendar-year totals
    AnnualSummary(AnnualSummaryArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "loan_history_core=debug,loanhist=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Timeline(args) => commands::timeline::run_timeline(args, &cli.currency),
        Commands::AnnualChart(args) => {
            commands::annual_summary::run_annual_chart(args, &cli.currency)
        }
        Commands::AnnualSummary(args) => commands::annual_summary::run_annual_summary(args),
        Commands::Version => {
            println!("loanhist {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
