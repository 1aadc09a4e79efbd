//! Inverse problems: tenure for a given instalment, rate for a target EMI.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::LoanCalcError;
use crate::loan::schedule::{calculate_amortization_schedule, MAX_TENURE_MONTHS};
use crate::time_value::{level_payment, monthly_rate, periods_to_repay};
use crate::types::{CalculationResult, Money, Percent};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Lower edge of the rate search bracket (annual %).
pub const RATE_FLOOR_PCT: Percent = dec!(0);

/// Upper edge of the rate search bracket (annual %).
pub const RATE_CEILING_PCT: Percent = dec!(500);

/// The bisection always runs exactly this many halvings.
pub const BISECTION_ITERATIONS: u32 = 40;

/// Decimal places kept on a solved rate.
pub const SOLVED_RATE_DP: u32 = 2;

/// Places kept on the closed-form tenure before rounding up, to absorb
/// logarithm noise on exactly-integral tenures.
const TENURE_NOISE_DP: u32 = 9;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Solve for tenure given principal, rate and instalment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TenureSolveInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub emi: Money,
}

/// Solve for rate given principal, tenure and target instalment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateSolveInput {
    pub principal: Money,
    pub tenure_months: u32,
    pub target_emi: Money,
}

impl TenureSolveInput {
    pub fn solve(&self) -> CalculationResult {
        calculate_advanced(self.principal, self.annual_rate_pct, self.emi)
    }
}

impl RateSolveInput {
    pub fn solve(&self) -> Percent {
        calculate_rate_for_target_emi(self.principal, self.tenure_months, self.target_emi)
    }
}

// ---------------------------------------------------------------------------
// Tenure
// ---------------------------------------------------------------------------

/// Number of whole months needed to repay `principal` with a fixed `emi`.
///
/// The closed-form period count is rounded up: a loan is never considered
/// paid off mid-month. Totals are `emi × months`, so the final short instalment
/// is counted in full; the schedule itself caps that last payment.
pub fn calculate_advanced(principal: Money, annual_rate_pct: Percent, emi: Money) -> CalculationResult {
    if principal <= Decimal::ZERO || annual_rate_pct < Decimal::ZERO {
        return CalculationResult::failed(principal, LoanCalcError::InvalidTerms);
    }

    let r = monthly_rate(annual_rate_pct);
    // interest past the Decimal range cannot be covered by any representable emi
    let serviceable = principal.checked_mul(r).map_or(false, |interest| emi > interest);
    if !serviceable {
        return CalculationResult::failed(principal, LoanCalcError::UnserviceablePayment);
    }

    let exact = match periods_to_repay(principal, r, emi) {
        Some(n) => n,
        None => {
            return CalculationResult::failed(
                principal,
                LoanCalcError::NumericOverflow {
                    context: "tenure solve".into(),
                },
            )
        }
    };

    let months = exact.round_dp(TENURE_NOISE_DP).ceil();
    let tenure_months = match months.to_u32() {
        Some(n) if n <= MAX_TENURE_MONTHS => n,
        _ => {
            return CalculationResult::failed(
                principal,
                LoanCalcError::TenureTooLong {
                    months,
                    limit: MAX_TENURE_MONTHS,
                },
            )
        }
    };
    debug!(%exact, tenure_months, "tenure solved");

    let total_amount = match emi.checked_mul(Decimal::from(tenure_months)) {
        Some(total) => total,
        None => {
            return CalculationResult::failed(
                principal,
                LoanCalcError::NumericOverflow {
                    context: "total repayment".into(),
                },
            )
        }
    };
    let schedule = calculate_amortization_schedule(principal, annual_rate_pct, tenure_months, emi);

    CalculationResult::settled(principal, total_amount, total_amount - principal, tenure_months)
        .with_instalments(emi, schedule)
}

// ---------------------------------------------------------------------------
// Rate
// ---------------------------------------------------------------------------

/// Annual rate (%) at which `principal` over `tenure_months` costs `target_emi`
/// a month.
///
/// Bisection over `[0, 500]%` for a fixed 40 halvings, relying on EMI rising
/// with rate. The result is the lower bracket rounded to two places, so the
/// EMI it implies sits a little under the target. Callers that report the
/// target as the payment must pin it themselves via
/// [`CalculationResult::pin_monthly_payment`]. Targets outside the achievable
/// range converge onto a bracket edge.
pub fn calculate_rate_for_target_emi(
    principal: Money,
    tenure_months: u32,
    target_emi: Money,
) -> Percent {
    let mut low = RATE_FLOOR_PCT;
    let mut high = RATE_CEILING_PCT;

    for _ in 0..BISECTION_ITERATIONS {
        let mid = (low + high) / dec!(2);
        // zero tenure has no finite instalment; treat as above any target
        match level_payment(principal, monthly_rate(mid), tenure_months) {
            Some(emi) if emi <= target_emi => low = mid,
            _ => high = mid,
        }
        trace!(%low, %high, "rate bracket");
    }

    let solved = low.round_dp_with_strategy(SOLVED_RATE_DP, RoundingStrategy::MidpointAwayFromZero);
    debug!(%solved, %target_emi, "rate solved");
    solved
}
