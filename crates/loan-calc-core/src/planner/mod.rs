//! Calculator modes built on the engine, and the history of past runs.

#[cfg(feature = "history")]
pub mod history;
pub mod request;

#[cfg(feature = "history")]
pub use history::{History, HistoryEntry, HISTORY_CAPACITY};
pub use request::{
    run_calculation, solve_rate_with_pinned_payment, CalculationRequest, CalculatorType,
    PlanOutcome,
};
