use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::loan::emi::calculate_emi;
use crate::loan::interest::{InterestInput, InterestType};
use crate::loan::solver::{RateSolveInput, TenureSolveInput, RATE_CEILING_PCT, RATE_FLOOR_PCT};
use crate::types::{with_metadata, CalculationResult, ComputationOutput, LoanTerms, Money, Percent};
use crate::LoanCalcResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Calculator screen a request belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CalculatorType {
    Emi,
    Interest,
    Advanced,
}

/// One calculation as a caller would ask for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CalculationRequest {
    /// Plain EMI for principal, rate and tenure.
    Emi(LoanTerms),
    /// Simple, compound or reducing-balance interest.
    Interest(InterestInput),
    /// Tenure needed for a chosen instalment.
    Advanced(TenureSolveInput),
    /// Tenure needed to hit a target EMI, asked from the EMI screen.
    OptimizeTenure(TenureSolveInput),
    /// Rate that yields a target EMI, with the payment pinned to the target.
    OptimizeRate(RateSolveInput),
}

impl CalculationRequest {
    pub fn from_json(json: &str) -> LoanCalcResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn calculator_type(&self) -> CalculatorType {
        match self {
            CalculationRequest::Emi(_)
            | CalculationRequest::OptimizeTenure(_)
            | CalculationRequest::OptimizeRate(_) => CalculatorType::Emi,
            CalculationRequest::Interest(_) => CalculatorType::Interest,
            CalculationRequest::Advanced(_) => CalculatorType::Advanced,
        }
    }

    pub fn principal(&self) -> Money {
        match self {
            CalculationRequest::Emi(t) => t.principal,
            CalculationRequest::Interest(i) => i.principal,
            CalculationRequest::Advanced(s) | CalculationRequest::OptimizeTenure(s) => s.principal,
            CalculationRequest::OptimizeRate(s) => s.principal,
        }
    }

    fn methodology(&self) -> &'static str {
        match self {
            CalculationRequest::Emi(_) => "Equated Monthly Instalment (level-payment amortisation)",
            CalculationRequest::Interest(i) => match i.interest_type {
                InterestType::Simple => "Simple Interest",
                InterestType::Compound => "Compound Interest (annual compounding)",
                InterestType::Reducing => "Reducing Balance Interest (EMI)",
            },
            CalculationRequest::Advanced(_) | CalculationRequest::OptimizeTenure(_) => {
                "Closed-form Tenure Solve (rounded up to whole months)"
            }
            CalculationRequest::OptimizeRate(_) => {
                "Bisection Rate Solve (40 iterations over 0-500% p.a.)"
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Engine result plus the rate found by a rate solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanOutcome {
    #[serde(flatten)]
    pub calculation: CalculationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solved_rate_pct: Option<Percent>,
}

/// The rate solve, the EMI recomputed at that rate, and the pinned result.
#[derive(Debug, Clone, PartialEq)]
pub struct PinnedRateSolve {
    pub rate_pct: Percent,
    /// Instalment the engine computed at `rate_pct`, before pinning.
    pub computed_emi: Option<Money>,
    pub result: CalculationResult,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Solve for the rate, recompute the EMI at it, then pin the payment.
///
/// The solved rate is rounded to two places, so the recomputed EMI is off the
/// target by the bisection residual. Reporting the target as the monthly
/// payment is a deliberate caller decision made here, outside the engine.
pub fn solve_rate_with_pinned_payment(input: &RateSolveInput) -> PinnedRateSolve {
    let rate_pct = input.solve();
    let mut result = calculate_emi(input.principal, rate_pct, input.tenure_months);
    let computed_emi = result.monthly_payment;
    result.pin_monthly_payment(input.target_emi);
    debug!(%rate_pct, ?computed_emi, target = %input.target_emi, "payment pinned");

    PinnedRateSolve {
        rate_pct,
        computed_emi,
        result,
    }
}

/// Run a request and wrap the outcome in the standard envelope.
pub fn run_calculation(request: &CalculationRequest) -> ComputationOutput<PlanOutcome> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let outcome = match request {
        CalculationRequest::Emi(terms) => PlanOutcome {
            calculation: terms.emi(),
            solved_rate_pct: None,
        },
        CalculationRequest::Interest(input) => PlanOutcome {
            calculation: input.calculate(),
            solved_rate_pct: None,
        },
        CalculationRequest::Advanced(input) | CalculationRequest::OptimizeTenure(input) => {
            let calculation = input.solve();
            warn_short_final_instalment(&calculation, input.emi, &mut warnings);
            PlanOutcome {
                calculation,
                solved_rate_pct: None,
            }
        }
        CalculationRequest::OptimizeRate(input) => {
            let solve = solve_rate_with_pinned_payment(input);
            warn_rate_solve(&solve, input.target_emi, &mut warnings);
            PlanOutcome {
                calculation: solve.result,
                solved_rate_pct: Some(solve.rate_pct),
            }
        }
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(request.methodology(), request, warnings, elapsed, outcome)
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn warn_short_final_instalment(result: &CalculationResult, emi: Money, warnings: &mut Vec<String>) {
    let last = match result.schedule.as_ref().and_then(|s| s.last()) {
        Some(row) => row,
        None => return,
    };
    if last.total_payment < emi {
        warnings.push(format!(
            "Final instalment in month {} is {}; totals count a full EMI of {}",
            last.month,
            last.total_payment.round_dp(2),
            emi.round_dp(2)
        ));
    }
}

fn warn_rate_solve(solve: &PinnedRateSolve, target: Money, warnings: &mut Vec<String>) {
    if !solve.result.is_ok() {
        return;
    }

    if solve.rate_pct <= RATE_FLOOR_PCT {
        warnings.push(format!(
            "Target EMI {} is at or below the interest-free instalment; rate held at {}%",
            target.round_dp(2),
            RATE_FLOOR_PCT
        ));
    } else if solve.rate_pct >= RATE_CEILING_PCT - dec!(0.01) {
        warnings.push(format!(
            "Target EMI {} is beyond the instalment at {}% p.a.; rate held at the ceiling",
            target.round_dp(2),
            RATE_CEILING_PCT
        ));
    }

    if let Some(computed) = solve.computed_emi {
        if computed != target {
            warnings.push(format!(
                "Monthly payment pinned to target {}; EMI at {}% is {}",
                target.round_dp(2),
                solve.rate_pct,
                computed.round_dp(2)
            ));
        }
    }
}
