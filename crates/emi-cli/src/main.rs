mod commands;
mod input;
mod logging;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::LoanArgs;

/// Loan EMI and amortization schedule calculator
#[derive(Parser)]
#[command(
    name = "emi",
    version,
    about = "Loan EMI and amortization schedule calculator",
    long_about = "Computes the equal monthly installment (EMI), total interest, optional \
                  tax on interest and the month-by-month amortization schedule of a \
                  fixed-rate loan with decimal precision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Currency symbol prefixed to monetary values in table output
    #[arg(long, env = "EMI_CURRENCY_SYMBOL", default_value = "₹", global = true)]
    currency_symbol: String,

    /// Enable debug logging on stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the EMI, totals and the full amortization schedule
    Amortize(LoanArgs),
    /// Compute the EMI and totals only
    Summary(LoanArgs),
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

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::loan::run_amortize(args),
        Commands::Summary(args) => commands::loan::run_summary(args),
        Commands::Version => {
            println!("emi {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, &cli.currency_symbol);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
