use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::loan::RateSolveInput;
use loan_calc_core::planner::{run_calculation, CalculationRequest};

use crate::input;

/// Arguments for solving the rate behind a target EMI
#[derive(Args)]
pub struct SolveRateArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Target monthly instalment
    #[arg(long)]
    pub target_emi: Option<Decimal>,
}

pub fn run_solve_rate(args: SolveRateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let solve_input: RateSolveInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(parsed) = input::stdin::read_piped()? {
        parsed
    } else {
        RateSolveInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            tenure_months: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
            target_emi: args
                .target_emi
                .ok_or("--target-emi is required (or provide --input)")?,
        }
    };

    let result = run_calculation(&CalculationRequest::OptimizeRate(solve_input));
    Ok(serde_json::to_value(result)?)
}

/// Arguments for running any calculation request document
#[derive(Args)]
pub struct PlanArgs {
    /// Path to JSON/YAML request file, e.g. {"Emi": {...}}
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_plan(args: PlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: CalculationRequest = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(parsed) = input::stdin::read_piped()? {
        parsed
    } else {
        return Err("--input <file> or stdin required for plan".into());
    };
    tracing::debug!(calculator = ?request.calculator_type(), "running plan");

    Ok(serde_json::to_value(run_calculation(&request))?)
}
