use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::LoanCalcResult;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Per-period rates expressed as decimals (0.01 = 1% per month).
pub type Rate = Decimal;

/// Rates as quoted to the borrower (12 = 12% per annum).
pub type Percent = Decimal;

/// Principal, nominal annual rate and tenure of a level-payment loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub tenure_months: u32,
}

impl LoanTerms {
    pub fn new(principal: Money, annual_rate_pct: Percent, tenure_months: u32) -> Self {
        Self {
            principal,
            annual_rate_pct,
            tenure_months,
        }
    }
}

/// One month of an amortisation schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based month number.
    pub month: u32,
    pub principal_paid: Money,
    pub interest_paid: Money,
    /// `principal_paid + interest_paid`.
    pub total_payment: Money,
    /// Outstanding balance after this month's payment.
    pub remaining_balance: Money,
}

/// Which side of the principal/interest split a breakdown entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BreakdownLabel {
    Principal,
    Interest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub name: BreakdownLabel,
    pub value: Money,
}

/// Outcome of a single engine call.
///
/// When `error` is set the totals are zero, the breakdown is empty and no
/// payment, tenure or schedule is attached. Callers must check `error` (or use
/// [`CalculationResult::ensure_ok`]) before trusting the numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub total_amount: Money,
    pub total_interest: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Money>,
    pub principal: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub breakdown: Vec<BreakdownEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationRow>>,
}

impl CalculationResult {
    /// A rejected calculation carrying the error message.
    pub fn failed(principal: Money, error: LoanCalcError) -> Self {
        Self {
            total_amount: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            monthly_payment: None,
            principal,
            tenure_months: None,
            error: Some(error.to_string()),
            breakdown: Vec::new(),
            schedule: None,
        }
    }

    /// A successful lump-sum result with the two-entry breakdown.
    pub(crate) fn settled(
        principal: Money,
        total_amount: Money,
        total_interest: Money,
        tenure_months: u32,
    ) -> Self {
        Self {
            total_amount,
            total_interest,
            monthly_payment: None,
            principal,
            tenure_months: Some(tenure_months),
            error: None,
            breakdown: vec![
                BreakdownEntry {
                    name: BreakdownLabel::Principal,
                    value: principal,
                },
                BreakdownEntry {
                    name: BreakdownLabel::Interest,
                    value: total_interest,
                },
            ],
            schedule: None,
        }
    }

    /// Attach the instalment and its schedule to a settled result.
    pub(crate) fn with_instalments(
        mut self,
        monthly_payment: Money,
        schedule: Vec<AmortizationRow>,
    ) -> Self {
        self.monthly_payment = Some(monthly_payment);
        self.schedule = Some(schedule);
        self
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// Turn a recorded error into `Err` for callers using `?`.
    pub fn ensure_ok(&self) -> LoanCalcResult<&Self> {
        match &self.error {
            Some(msg) => Err(LoanCalcError::Rejected(msg.clone())),
            None => Ok(self),
        }
    }

    /// Overwrite the reported monthly payment with a caller-chosen target.
    ///
    /// This is the one mutation a caller may apply after a rate solve: the EMI
    /// recomputed at the rounded solved rate differs from the target by the
    /// bisection's residual, and the caller reports the target instead. The
    /// engine never calls this itself. Errored results are left untouched.
    pub fn pin_monthly_payment(&mut self, target: Money) {
        if self.is_ok() {
            self.monthly_payment = Some(target);
        }
    }

    /// Principal and interest entries, in that order, or `None` on error.
    pub fn split(&self) -> Option<(Money, Money)> {
        match self.breakdown.as_slice() {
            [p, i] => Some((p.value, i.value)),
            _ => None,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_failed_result_is_zeroed() {
        let r = CalculationResult::failed(dec!(500), LoanCalcError::InvalidTerms);
        assert_eq!(r.total_amount, Decimal::ZERO);
        assert_eq!(r.total_interest, Decimal::ZERO);
        assert!(r.breakdown.is_empty());
        assert!(r.schedule.is_none());
        assert!(!r.is_ok());
        assert!(r.split().is_none());
    }

    #[test]
    fn test_ensure_ok_maps_error() {
        let r = CalculationResult::failed(dec!(1), LoanCalcError::UnserviceablePayment);
        match r.ensure_ok() {
            Err(LoanCalcError::Rejected(msg)) => assert!(msg.starts_with("EMI is too low")),
            other => panic!("Expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_pin_ignored_on_error() {
        let mut r = CalculationResult::failed(dec!(1), LoanCalcError::InvalidTerms);
        r.pin_monthly_payment(dec!(100));
        assert!(r.monthly_payment.is_none());
    }

    #[test]
    fn test_settled_breakdown_order() {
        let r = CalculationResult::settled(dec!(1000), dec!(1100), dec!(100), 12);
        assert_eq!(r.breakdown[0].name, BreakdownLabel::Principal);
        assert_eq!(r.breakdown[1].name, BreakdownLabel::Interest);
        assert_eq!(r.split(), Some((dec!(1000), dec!(100))));
    }

    #[test]
    fn test_optional_fields_skipped_in_json() {
        let r = CalculationResult::failed(dec!(1), LoanCalcError::InvalidTerms);
        let v = serde_json::to_value(&r).unwrap();
        assert!(v.get("schedule").is_none());
        assert!(v.get("monthly_payment").is_none());
        assert_eq!(v["error"], "Please enter positive values for all fields.");
    }
}
