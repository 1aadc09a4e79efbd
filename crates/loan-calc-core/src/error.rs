use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoanCalcError {
    #[error("Please enter positive values for all fields.")]
    InvalidTerms,

    #[error("EMI is too low. It must cover at least the monthly interest interest.")]
    UnserviceablePayment,

    #[error("Numeric overflow: {context} exceeds the representable range")]
    NumericOverflow { context: String },

    #[error("Tenure of {months} months exceeds the limit of {limit} months")]
    TenureTooLong { months: Decimal, limit: u32 },

    #[error("Calculation rejected: {0}")]
    Rejected(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for LoanCalcError {
    fn from(e: serde_json::Error) -> Self {
        LoanCalcError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            LoanCalcError::InvalidTerms.to_string(),
            "Please enter positive values for all fields."
        );
        assert_eq!(
            LoanCalcError::UnserviceablePayment.to_string(),
            "EMI is too low. It must cover at least the monthly interest interest."
        );
    }

    #[test]
    fn test_tenure_limit_message() {
        let err = LoanCalcError::TenureTooLong {
            months: Decimal::from(4_000_000_000u32),
            limit: 12_000,
        };
        assert_eq!(
            err.to_string(),
            "Tenure of 4000000000 months exceeds the limit of 12000 months"
        );
    }

    #[test]
    fn test_from_serde_json() {
        let err: LoanCalcError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, LoanCalcError::Serialization(_)));
    }
}
