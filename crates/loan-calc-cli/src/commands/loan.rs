use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use loan_calc_core::loan::{InterestInput, InterestType, ScheduleInput, TenureSolveInput};
use loan_calc_core::planner::{run_calculation, CalculationRequest};
use loan_calc_core::LoanTerms;

use crate::input;

/// Interest model for the `interest` command
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InterestKind {
    Simple,
    Compound,
    Reducing,
}

impl From<InterestKind> for InterestType {
    fn from(kind: InterestKind) -> Self {
        match kind {
            InterestKind::Simple => InterestType::Simple,
            InterestKind::Compound => InterestType::Compound,
            InterestKind::Reducing => InterestType::Reducing,
        }
    }
}

/// Arguments for EMI calculation
#[derive(Args)]
pub struct EmiArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual rate in percent (e.g. 10.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,
}

pub fn run_emi(args: EmiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(terms) = input::stdin::read_piped()? {
        terms
    } else {
        LoanTerms::new(
            args.principal
                .ok_or("--principal is required (or provide --input)")?,
            args.rate.ok_or("--rate is required (or provide --input)")?,
            args.tenure.ok_or("--tenure is required (or provide --input)")?,
        )
    };

    let result = run_calculation(&CalculationRequest::Emi(terms));
    Ok(serde_json::to_value(result)?)
}

/// Arguments for simple / compound / reducing interest
#[derive(Args)]
pub struct InterestArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Tenure in months
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Interest model
    #[arg(long = "type", value_enum, default_value = "compound")]
    pub interest_type: InterestKind,
}

pub fn run_interest(args: InterestArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let interest_input: InterestInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(parsed) = input::stdin::read_piped()? {
        parsed
    } else {
        InterestInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_months: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
            interest_type: args.interest_type.into(),
        }
    };

    let result = run_calculation(&CalculationRequest::Interest(interest_input));
    Ok(serde_json::to_value(result)?)
}

/// Arguments for solving the tenure that a fixed EMI needs
#[derive(Args)]
pub struct TenureArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Monthly instalment
    #[arg(long)]
    pub emi: Option<Decimal>,
}

pub fn run_tenure(args: TenureArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let solve_input: TenureSolveInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(parsed) = input::stdin::read_piped()? {
        parsed
    } else {
        TenureSolveInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            emi: args.emi.ok_or("--emi is required (or provide --input)")?,
        }
    };

    let result = run_calculation(&CalculationRequest::Advanced(solve_input));
    Ok(serde_json::to_value(result)?)
}

/// Arguments for a bare amortisation schedule
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON/YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual rate in percent
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Maximum number of months
    #[arg(long)]
    pub tenure: Option<u32>,

    /// Monthly instalment
    #[arg(long)]
    pub emi: Option<Decimal>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if let Some(parsed) = input::stdin::read_piped()? {
        parsed
    } else {
        ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            tenure_months: args
                .tenure
                .ok_or("--tenure is required (or provide --input)")?,
            emi: args.emi.ok_or("--emi is required (or provide --input)")?,
        }
    };

    Ok(serde_json::to_value(schedule_input.schedule())?)
}
