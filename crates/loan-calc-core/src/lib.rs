pub mod error;
pub mod loan;
pub mod time_value;
pub mod types;

#[cfg(feature = "planner")]
pub mod planner;

pub use error::LoanCalcError;
pub use loan::{
    calculate_advanced, calculate_amortization_schedule, calculate_emi, calculate_interest,
    calculate_rate_for_target_emi, InterestType,
};
pub use types::*;

/// Standard result type for fallible loan-calc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
