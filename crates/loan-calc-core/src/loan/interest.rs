//! Simple, compound and reducing-balance interest.
//!
//! Simple and compound interest are lump-sum projections with no instalment
//! and no schedule. Reducing balance is the level-payment EMI computation
//! itself and returns exactly what [`calculate_emi`] returns.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::loan::emi::calculate_emi;
use crate::time_value::months_to_years;
use crate::types::{CalculationResult, Money, Percent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterestType {
    /// Interest on the original principal only.
    Simple,
    /// Annual compounding, fractional years allowed.
    Compound,
    /// Level-payment amortisation (EMI).
    Reducing,
}

impl fmt::Display for InterestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            InterestType::Simple => "SIMPLE",
            InterestType::Compound => "COMPOUND",
            InterestType::Reducing => "REDUCING",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterestInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub tenure_months: u32,
    pub interest_type: InterestType,
}

impl InterestInput {
    pub fn calculate(&self) -> CalculationResult {
        calculate_interest(
            self.principal,
            self.annual_rate_pct,
            self.tenure_months,
            self.interest_type,
        )
    }
}

/// Interest accrued over `tenure_months` under the chosen model.
pub fn calculate_interest(
    principal: Money,
    annual_rate_pct: Percent,
    tenure_months: u32,
    interest_type: InterestType,
) -> CalculationResult {
    let years = months_to_years(tenure_months);

    match interest_type {
        InterestType::Simple => match simple_interest(principal, annual_rate_pct, years) {
            Some((total_amount, total_interest)) => {
                CalculationResult::settled(principal, total_amount, total_interest, tenure_months)
            }
            None => CalculationResult::failed(
                principal,
                LoanCalcError::NumericOverflow {
                    context: "simple interest".into(),
                },
            ),
        },
        InterestType::Compound => match compound_amount(principal, annual_rate_pct, years) {
            Some(total_amount) => CalculationResult::settled(
                principal,
                total_amount,
                total_amount - principal,
                tenure_months,
            ),
            None => CalculationResult::failed(
                principal,
                LoanCalcError::NumericOverflow {
                    context: "compound growth".into(),
                },
            ),
        },
        InterestType::Reducing => calculate_emi(principal, annual_rate_pct, tenure_months),
    }
}

/// (principal + interest, interest) with interest = principal · rate · years / 100
fn simple_interest(
    principal: Money,
    annual_rate_pct: Percent,
    years: Decimal,
) -> Option<(Money, Money)> {
    let interest = principal
        .checked_mul(annual_rate_pct / dec!(100))?
        .checked_mul(years)?;
    Some((principal.checked_add(interest)?, interest))
}

/// principal · (1 + rate/100)^years
fn compound_amount(principal: Money, annual_rate_pct: Percent, years: Decimal) -> Option<Money> {
    let base = Decimal::ONE + annual_rate_pct / dec!(100);
    let factor = if years.is_zero() {
        Decimal::ONE
    } else {
        base.checked_powd(years)?
    };
    principal.checked_mul(factor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn test_simple_interest() {
        // 10,000 at 10% for 18 months = 1,500
        let r = calculate_interest(dec!(10000), dec!(10), 18, InterestType::Simple);
        assert_eq!(r.total_interest, dec!(1500));
        assert_eq!(r.total_amount, dec!(11500));
        assert!(r.monthly_payment.is_none());
        assert!(r.schedule.is_none());
        assert_eq!(r.tenure_months, Some(18));
    }

    #[test]
    fn test_compound_whole_years() {
        // 10,000 at 10% for 2 years = 12,100
        let r = calculate_interest(dec!(10000), dec!(10), 24, InterestType::Compound);
        assert_close(r.total_amount, dec!(12100), dec!(0.001), "amount");
        assert_close(r.total_interest, dec!(2100), dec!(0.001), "interest");
        assert!(r.schedule.is_none());
    }

    #[test]
    fn test_compound_fractional_year() {
        // 1.21^(1/2) = 1.1
        let r = calculate_interest(dec!(1000), dec!(21), 6, InterestType::Compound);
        assert_close(r.total_amount, dec!(1100), dec!(0.001), "amount");
    }

    #[test]
    fn test_compound_zero_rate() {
        let r = calculate_interest(dec!(5000), dec!(0), 36, InterestType::Compound);
        assert_close(r.total_interest, Decimal::ZERO, dec!(0.0000001), "interest");
    }

    #[test]
    fn test_compound_overflow_reported() {
        let r = calculate_interest(dec!(1000000), dec!(500), 1200, InterestType::Compound);
        assert!(r.error.unwrap().starts_with("Numeric overflow"));
        assert_eq!(r.total_amount, Decimal::ZERO);
        assert!(r.breakdown.is_empty());
    }

    #[test]
    fn test_simple_overflow_reported() {
        let r = calculate_interest(
            dec!(50000000000000000000000000000),
            dec!(500),
            12,
            InterestType::Simple,
        );
        assert_eq!(
            r.error.as_deref(),
            Some("Numeric overflow: simple interest exceeds the representable range")
        );
        assert_eq!(r.total_amount, Decimal::ZERO);
        assert!(r.breakdown.is_empty());
    }

    #[test]
    fn test_reducing_overflow_reported() {
        let r = calculate_interest(
            dec!(50000000000000000000000000000),
            dec!(12),
            360,
            InterestType::Reducing,
        );
        assert!(r.error.unwrap().starts_with("Numeric overflow"));
    }

    #[test]
    fn test_reducing_equals_emi() {
        let reducing = calculate_interest(dec!(75000), dec!(11), 48, InterestType::Reducing);
        assert_eq!(reducing, calculate_emi(dec!(75000), dec!(11), 48));
        assert!(reducing.schedule.is_some());
    }

    #[test]
    fn test_reducing_propagates_error() {
        let r = calculate_interest(dec!(100), dec!(5), 0, InterestType::Reducing);
        assert_eq!(
            r.error.as_deref(),
            Some("Please enter positive values for all fields.")
        );
    }

    #[test]
    fn test_interest_type_wire_format() {
        let json = serde_json::to_string(&InterestType::Compound).unwrap();
        assert_eq!(json, "\"COMPOUND\"");
        assert_eq!(InterestType::Simple.to_string(), "SIMPLE");
    }
}
