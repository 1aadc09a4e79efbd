use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Serialize;

use loan_calc_core::loan::{InterestInput, RateSolveInput, ScheduleInput, TenureSolveInput};
use loan_calc_core::planner::{run_calculation, CalculationRequest, History};
use loan_calc_core::{LoanTerms, Percent};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_emi(input_json: String) -> NapiResult<String> {
    let terms: LoanTerms = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = run_calculation(&CalculationRequest::Emi(terms));
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_interest(input_json: String) -> NapiResult<String> {
    let input: InterestInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = run_calculation(&CalculationRequest::Interest(input));
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn calculate_tenure(input_json: String) -> NapiResult<String> {
    let input: TenureSolveInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = run_calculation(&CalculationRequest::Advanced(input));
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Serialize)]
struct SolvedRate {
    rate_pct: Percent,
}

/// Bare rate solve. No EMI recompute and no pinning; use `run_plan` with an
/// `OptimizeRate` request for that.
#[napi]
pub fn solve_rate(input_json: String) -> NapiResult<String> {
    let input: RateSolveInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let solved = SolvedRate {
        rate_pct: input.solve(),
    };
    serde_json::to_string(&solved).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: ScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    serde_json::to_string(&input.schedule()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Planner
// ---------------------------------------------------------------------------

#[napi]
pub fn run_plan(request_json: String) -> NapiResult<String> {
    let request = CalculationRequest::from_json(&request_json).map_err(to_napi_error)?;
    let output = run_calculation(&request);
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Run `request_json`, record it into `history_json` and return the updated
/// history. Errored calculations leave the history unchanged.
#[napi]
pub fn record_history(history_json: String, request_json: String) -> NapiResult<String> {
    let mut history = if history_json.trim().is_empty() {
        History::new()
    } else {
        History::from_json(&history_json).map_err(to_napi_error)?
    };
    let request = CalculationRequest::from_json(&request_json).map_err(to_napi_error)?;
    let output = run_calculation(&request);
    history.record(&request, &output.result, chrono::Utc::now());
    history.to_json().map_err(to_napi_error)
}
