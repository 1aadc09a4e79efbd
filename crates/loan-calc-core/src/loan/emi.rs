use std::num::NonZeroU32;

use rust_decimal::Decimal;

use crate::error::LoanCalcError;
use crate::loan::schedule::{calculate_amortization_schedule, MAX_TENURE_MONTHS};
use crate::time_value::{amortizing_payment, monthly_rate};
use crate::types::{CalculationResult, LoanTerms, Money, Percent};

/// Equated monthly instalment for a level-payment loan, with its schedule.
///
/// Rejects a non-positive principal, a negative rate or a zero tenure. At a
/// zero rate the instalment is a straight division and no interest accrues.
/// Tenures beyond [`MAX_TENURE_MONTHS`] and totals beyond the Decimal range are
/// reported on the result rather than computed.
pub fn calculate_emi(
    principal: Money,
    annual_rate_pct: Percent,
    tenure_months: u32,
) -> CalculationResult {
    let periods = match NonZeroU32::new(tenure_months) {
        Some(n) if principal > Decimal::ZERO && annual_rate_pct >= Decimal::ZERO => n,
        _ => return CalculationResult::failed(principal, LoanCalcError::InvalidTerms),
    };
    if tenure_months > MAX_TENURE_MONTHS {
        return CalculationResult::failed(
            principal,
            LoanCalcError::TenureTooLong {
                months: Decimal::from(tenure_months),
                limit: MAX_TENURE_MONTHS,
            },
        );
    }

    let r = monthly_rate(annual_rate_pct);
    let totals = amortizing_payment(principal, r, periods).and_then(|emi| {
        if r.is_zero() {
            return Some((emi, principal, Decimal::ZERO));
        }
        let total = emi.checked_mul(Decimal::from(tenure_months))?;
        Some((emi, total, total - principal))
    });
    let (emi, total_amount, total_interest) = match totals {
        Some(t) => t,
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

    CalculationResult::settled(principal, total_amount, total_interest, tenure_months)
        .with_instalments(emi, schedule)
}

impl LoanTerms {
    pub fn emi(&self) -> CalculationResult {
        calculate_emi(self.principal, self.annual_rate_pct, self.tenure_months)
    }
}
