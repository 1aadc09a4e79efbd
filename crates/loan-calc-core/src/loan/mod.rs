//! Loan calculation engine.
//!
//! Pure functions over principal, rate, tenure and payment. Every call builds
//! a fresh result; nothing is cached or shared between calls, so the engine
//! can be used from any number of threads without synchronisation.

pub mod emi;
pub mod interest;
pub mod schedule;
pub mod solver;

pub use emi::calculate_emi;
pub use interest::{calculate_interest, InterestInput, InterestType};
pub use schedule::{amortize, calculate_amortization_schedule, Amortization, ScheduleInput};
pub use solver::{
    calculate_advanced, calculate_rate_for_target_emi, RateSolveInput, TenureSolveInput,
};
