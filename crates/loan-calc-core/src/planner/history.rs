//! Summaries of completed calculations, newest first, bounded in size.
//!
//! Only the summary is kept; how it is stored is up to the host.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::loan::interest::{InterestInput, InterestType};
use crate::loan::solver::TenureSolveInput;
use crate::planner::request::{CalculationRequest, CalculatorType, PlanOutcome};
use crate::types::{LoanTerms, Money, Percent};
use crate::LoanCalcResult;

/// Most recent entries retained.
pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub calculator: CalculatorType,
    pub label: String,
    pub principal: Money,
    pub rate_pct: Percent,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenure_months: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emi: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interest_type: Option<InterestType>,
    /// Solved tenure for tenure solves, total amount otherwise.
    pub result: Decimal,
}

impl HistoryEntry {
    /// Summarise a finished calculation. Errored outcomes are not recorded.
    pub fn record(
        request: &CalculationRequest,
        outcome: &PlanOutcome,
        now: DateTime<Utc>,
    ) -> Option<Self> {
        let calc = &outcome.calculation;
        if !calc.is_ok() {
            return None;
        }

        let calculator = request.calculator_type();
        let (rate_pct, requested_tenure, requested_emi, interest_type) = match request {
            CalculationRequest::Emi(t) => (t.annual_rate_pct, Some(t.tenure_months), None, None),
            CalculationRequest::Interest(i) => (
                i.annual_rate_pct,
                Some(i.tenure_months),
                None,
                Some(i.interest_type),
            ),
            CalculationRequest::Advanced(s) | CalculationRequest::OptimizeTenure(s) => {
                (s.annual_rate_pct, None, Some(s.emi), None)
            }
            CalculationRequest::OptimizeRate(s) => (
                outcome.solved_rate_pct.unwrap_or(Decimal::ZERO),
                Some(s.tenure_months),
                Some(s.target_emi),
                None,
            ),
        };

        let label = match (calculator, interest_type) {
            (CalculatorType::Advanced, _) => "Tenure Solve".to_string(),
            (CalculatorType::Interest, Some(t)) => format!("{} Plan", t),
            _ => "EMI Plan".to_string(),
        };

        let tenure_months = match calculator {
            CalculatorType::Advanced => calc.tenure_months,
            _ => requested_tenure.or(calc.tenure_months),
        };

        let emi = match calculator {
            CalculatorType::Interest => None,
            _ => calc.monthly_payment.or(requested_emi),
        };

        let result = match calculator {
            CalculatorType::Advanced => Decimal::from(calc.tenure_months.unwrap_or(0)),
            _ => calc.total_amount,
        };

        Some(Self {
            id: now.timestamp_millis().to_string(),
            timestamp: now,
            calculator,
            label,
            principal: request.principal(),
            rate_pct,
            tenure_months,
            emi,
            interest_type,
            result,
        })
    }

    /// The request that reloads this entry's inputs.
    pub fn to_request(&self) -> CalculationRequest {
        match self.calculator {
            CalculatorType::Advanced => CalculationRequest::Advanced(TenureSolveInput {
                principal: self.principal,
                annual_rate_pct: self.rate_pct,
                emi: self.emi.unwrap_or(Decimal::ZERO),
            }),
            CalculatorType::Interest => CalculationRequest::Interest(InterestInput {
                principal: self.principal,
                annual_rate_pct: self.rate_pct,
                tenure_months: self.tenure_months.unwrap_or(0),
                interest_type: self.interest_type.unwrap_or(InterestType::Compound),
            }),
            CalculatorType::Emi => CalculationRequest::Emi(LoanTerms::new(
                self.principal,
                self.rate_pct,
                self.tenure_months.unwrap_or(0),
            )),
        }
    }
}

/// Bounded, newest-first list of history entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> LoanCalcResult<Self> {
        let mut history: History = serde_json::from_str(json)?;
        history.entries.truncate(HISTORY_CAPACITY);
        Ok(history)
    }

    pub fn to_json(&self) -> LoanCalcResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Put `entry` at the front, dropping the oldest beyond capacity.
    pub fn push(&mut self, entry: HistoryEntry) {
        debug!(id = %entry.id, label = %entry.label, "history entry added");
        self.entries.insert(0, entry);
        self.entries.truncate(HISTORY_CAPACITY);
    }

    /// Record a finished calculation. Returns whether an entry was added.
    pub fn record(
        &mut self,
        request: &CalculationRequest,
        outcome: &PlanOutcome,
        now: DateTime<Utc>,
    ) -> bool {
        match HistoryEntry::record(request, outcome, now) {
            Some(entry) => {
                self.push(entry);
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::solver::RateSolveInput;
    use crate::planner::request::run_calculation;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn entry_for(request: &CalculationRequest) -> Option<HistoryEntry> {
        let out = run_calculation(request);
        HistoryEntry::record(request, &out.result, at(1_700_000_000))
    }

    #[test]
    fn test_emi_entry() {
        let req = CalculationRequest::Emi(LoanTerms::new(dec!(12000), dec!(0), 12));
        let e = entry_for(&req).unwrap();
        assert_eq!(e.label, "EMI Plan");
        assert_eq!(e.id, "1700000000000");
        assert_eq!(e.tenure_months, Some(12));
        assert_eq!(e.emi, Some(dec!(1000)));
        assert_eq!(e.result, dec!(12000));
    }

    #[test]
    fn test_interest_entry_has_no_emi() {
        let req = CalculationRequest::Interest(InterestInput {
            principal: dec!(10000),
            annual_rate_pct: dec!(10),
            tenure_months: 18,
            interest_type: InterestType::Simple,
        });
        let e = entry_for(&req).unwrap();
        assert_eq!(e.label, "SIMPLE Plan");
        assert!(e.emi.is_none());
        assert_eq!(e.result, dec!(11500));
    }

    #[test]
    fn test_tenure_solve_entry_records_months() {
        let req = CalculationRequest::Advanced(TenureSolveInput {
            principal: dec!(10000),
            annual_rate_pct: dec!(12),
            emi: dec!(1000),
        });
        let e = entry_for(&req).unwrap();
        assert_eq!(e.label, "Tenure Solve");
        assert_eq!(e.tenure_months, Some(11));
        assert_eq!(e.result, dec!(11));
        assert_eq!(e.emi, Some(dec!(1000)));
    }

    #[test]
    fn test_rate_solve_entry_records_solved_rate() {
        let req = CalculationRequest::OptimizeRate(RateSolveInput {
            principal: dec!(10000),
            tenure_months: 24,
            target_emi: dec!(500),
        });
        let out = run_calculation(&req);
        let e = HistoryEntry::record(&req, &out.result, at(0)).unwrap();
        assert_eq!(Some(e.rate_pct), out.result.solved_rate_pct);
        assert_eq!(e.emi, Some(dec!(500)));
        assert_eq!(e.label, "EMI Plan");
    }

    #[test]
    fn test_errored_outcome_not_recorded() {
        let req = CalculationRequest::Emi(LoanTerms::new(dec!(-1), dec!(5), 12));
        assert!(entry_for(&req).is_none());
    }

    #[test]
    fn test_history_caps_at_capacity_newest_first() {
        let req = CalculationRequest::Emi(LoanTerms::new(dec!(1000), dec!(10), 12));
        let out = run_calculation(&req);
        let mut history = History::new();
        for i in 0..15 {
            assert!(history.record(&req, &out.result, at(i)));
        }
        assert_eq!(history.len(), HISTORY_CAPACITY);
        assert_eq!(history.entries()[0].timestamp, at(14));
        assert_eq!(history.entries()[9].timestamp, at(5));
    }

    #[test]
    fn test_history_clear() {
        let req = CalculationRequest::Emi(LoanTerms::new(dec!(1000), dec!(10), 12));
        let out = run_calculation(&req);
        let mut history = History::new();
        history.record(&req, &out.result, at(1));
        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_history_json_is_plain_array() {
        let req = CalculationRequest::Emi(LoanTerms::new(dec!(1000), dec!(10), 12));
        let out = run_calculation(&req);
        let mut history = History::new();
        history.record(&req, &out.result, at(1));
        let json = history.to_json().unwrap();
        assert!(json.starts_with('['));
        assert_eq!(History::from_json(&json).unwrap(), history);
    }

    #[test]
    fn test_to_request_reloads_inputs() {
        let req = CalculationRequest::Interest(InterestInput {
            principal: dec!(5000),
            annual_rate_pct: dec!(7),
            tenure_months: 30,
            interest_type: InterestType::Compound,
        });
        let e = entry_for(&req).unwrap();
        match e.to_request() {
            CalculationRequest::Interest(i) => {
                assert_eq!(i.principal, dec!(5000));
                assert_eq!(i.tenure_months, 30);
                assert_eq!(i.interest_type, InterestType::Compound);
            }
            other => panic!("Expected Interest request, got {:?}", other),
        }
    }
}
