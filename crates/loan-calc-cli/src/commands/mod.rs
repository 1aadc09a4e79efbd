pub mod loan;
pub mod plan;
