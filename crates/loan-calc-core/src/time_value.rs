use std::num::NonZeroU32;

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::types::{Money, Percent, Rate};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Convert a quoted annual percentage into a monthly fraction (12% -> 0.01).
pub fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / (MONTHS_PER_YEAR * dec!(100))
}

/// Whole months expressed in years (18 -> 1.5).
pub fn months_to_years(months: u32) -> Decimal {
    Decimal::from(months) / MONTHS_PER_YEAR
}

/// (1 + rate)^periods, or `None` if the factor leaves the Decimal range.
pub fn growth_factor(rate: Rate, periods: u32) -> Option<Decimal> {
    (Decimal::ONE + rate).checked_powu(u64::from(periods))
}

/// Level payment amortising `principal` over `periods` at `rate` per period.
///
/// `P·r·g / (g − 1)` with `g = (1 + r)^n`. Once `g` overflows the payment has
/// converged on its limit `P·r`. `None` if the payment itself is beyond the
/// Decimal range.
pub fn amortizing_payment(principal: Money, rate: Rate, periods: NonZeroU32) -> Option<Money> {
    let n = periods.get();
    if rate.is_zero() {
        return Some(principal / Decimal::from(n));
    }

    let interest_only = principal.checked_mul(rate)?;
    match growth_factor(rate, n) {
        Some(g) => {
            let denom = g - Decimal::ONE;
            if denom.is_zero() {
                // rate too small to register at 28 digits
                return Some(principal / Decimal::from(n));
            }
            interest_only.checked_mul(g.checked_div(denom)?)
        }
        None => Some(interest_only),
    }
}

/// Level payment for a possibly-zero period count. `None` means unbounded,
/// either no periods at all or a payment beyond the Decimal range.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> Option<Money> {
    NonZeroU32::new(periods).and_then(|n| amortizing_payment(principal, rate, n))
}

/// Real-valued number of periods for `payment` to retire `principal`.
///
/// `n = ln(pmt / (pmt − P·r)) / ln(1 + r)`, with the zero-rate limit `P / pmt`.
/// Returns `None` when the payment does not exceed the first period's interest
/// or a logarithm cannot be taken.
pub fn periods_to_repay(principal: Money, rate: Rate, payment: Money) -> Option<Decimal> {
    let first_interest = principal.checked_mul(rate)?;
    if payment <= first_interest {
        return None;
    }

    if rate.is_zero() {
        return Some(principal / payment);
    }

    let numerator = payment.checked_div(payment - first_interest)?.checked_ln()?;
    let denominator = (Decimal::ONE + rate).checked_ln()?;
    if denominator.is_zero() {
        return Some(principal / payment);
    }
    numerator.checked_div(denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected ~{}, got {}",
            expected,
            actual
        );
    }

    fn months(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn test_monthly_rate() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(dec!(0)), dec!(0));
    }

    #[test]
    fn test_months_to_years() {
        assert_eq!(months_to_years(18), dec!(1.5));
    }

    #[test]
    fn test_payment_known_answer() {
        // 100,000 at 12% over 12 months ~ 8,884.88
        let pmt = amortizing_payment(dec!(100000), dec!(0.01), months(12)).unwrap();
        assert_close(pmt, dec!(8884.88), dec!(0.01));
    }

    #[test]
    fn test_payment_zero_rate() {
        let pmt = amortizing_payment(dec!(12000), Decimal::ZERO, months(12)).unwrap();
        assert_eq!(pmt, dec!(1000));
    }

    #[test]
    fn test_payment_overflow_converges_to_interest_only() {
        // (1 + 500/1200)^600 is far beyond Decimal::MAX
        let pmt = amortizing_payment(dec!(1000), monthly_rate(dec!(500)), months(600)).unwrap();
        assert_close(pmt, dec!(1000) * monthly_rate(dec!(500)), dec!(0.0000001));
    }

    #[test]
    fn test_payment_beyond_range_is_none() {
        // P·r alone is past Decimal::MAX
        let huge = Decimal::MAX / dec!(2);
        assert!(amortizing_payment(huge, dec!(3), months(12)).is_none());
        assert!(level_payment(huge, dec!(3), 12).is_none());
    }

    #[test]
    fn test_periods_to_repay_overflowing_interest_is_none() {
        assert!(periods_to_repay(Decimal::MAX / dec!(2), dec!(3), dec!(1)).is_none());
    }

    #[test]
    fn test_level_payment_zero_periods_unbounded() {
        assert!(level_payment(dec!(1000), dec!(0.01), 0).is_none());
    }

    #[test]
    fn test_periods_to_repay_inverts_payment() {
        let pmt = amortizing_payment(dec!(50000), dec!(0.01), months(36)).unwrap();
        let n = periods_to_repay(dec!(50000), dec!(0.01), pmt).unwrap();
        assert_close(n, dec!(36), dec!(0.000001));
    }

    #[test]
    fn test_periods_to_repay_zero_rate() {
        let n = periods_to_repay(dec!(1000), Decimal::ZERO, dec!(300)).unwrap();
        assert_close(n, dec!(3.3333333), dec!(0.000001));
    }

    #[test]
    fn test_periods_to_repay_rejects_interest_only_payment() {
        assert!(periods_to_repay(dec!(10000), dec!(0.01), dec!(100)).is_none());
        assert!(periods_to_repay(dec!(10000), dec!(0.01), dec!(99)).is_none());
    }
}
