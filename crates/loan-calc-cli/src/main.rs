mod commands;
mod input;
mod logger;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde_json::Value;
use std::process;

use commands::loan::{EmiArgs, InterestArgs, ScheduleArgs, TenureArgs};
use commands::plan::{PlanArgs, SolveRateArgs};

/// Loan EMI, interest, tenure and rate calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "Loan EMI, interest, tenure and rate calculations",
    long_about = "A CLI for loan calculations with decimal precision. Computes equated \
                  monthly instalments and amortisation schedules, simple, compound and \
                  reducing-balance interest, the tenure a fixed instalment needs, and the \
                  rate that produces a target instalment."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log solver progress to stderr (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Equated monthly instalment with its amortisation schedule
    Emi(EmiArgs),
    /// Total interest under a simple, compound or reducing model
    Interest(InterestArgs),
    /// Months needed to repay a loan with a fixed instalment
    Tenure(TenureArgs),
    /// Annual rate at which a loan costs a target instalment
    SolveRate(SolveRateArgs),
    /// Month-by-month amortisation for a chosen instalment
    Schedule(ScheduleArgs),
    /// Run a calculation request document (JSON or YAML)
    Plan(PlanArgs),
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

/// Error message carried inside a calculation envelope, if any.
fn calculation_error(value: &Value) -> Option<&str> {
    value.pointer("/result/error").and_then(Value::as_str)
}

fn main() {
    let cli = Cli::parse();
    logger::init_cli_logger(cli.verbose);

    let result: Result<Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Interest(args) => commands::loan::run_interest(args),
        Commands::Tenure(args) => commands::loan::run_tenure(args),
        Commands::SolveRate(args) => commands::plan::run_solve_rate(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Plan(args) => commands::plan::run_plan(args),
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            if let Some(message) = calculation_error(&value) {
                eprintln!("{}: {}", "error".red().bold(), message);
                process::exit(1);
            }
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
