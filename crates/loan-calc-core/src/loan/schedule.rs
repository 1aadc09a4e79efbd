//! Month-by-month amortisation of a level-payment loan.
//!
//! Each month charges interest on the opening balance, applies the rest of
//! the instalment to principal (never more than the balance outstanding) and
//! stops as soon as the balance reaches zero. No validation happens here;
//! callers pass terms that have already been checked.

use std::iter::FusedIterator;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time_value::monthly_rate;
use crate::types::{AmortizationRow, Money, Percent, Rate};

/// Longest loan, in months, the engine will lay out a schedule for.
pub const MAX_TENURE_MONTHS: u32 = 12_000;

/// Input for a standalone schedule build.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    pub annual_rate_pct: Percent,
    pub tenure_months: u32,
    pub emi: Money,
}

/// Lazily generated amortisation rows. Yields at most `tenure_months` rows
/// and ends early once the balance is cleared.
#[derive(Debug, Clone)]
pub struct Amortization {
    balance: Money,
    monthly_rate: Rate,
    emi: Money,
    month: u32,
    tenure_months: u32,
    done: bool,
}

/// Start amortising `principal` at `annual_rate_pct` with a fixed `emi`.
pub fn amortize(
    principal: Money,
    annual_rate_pct: Percent,
    tenure_months: u32,
    emi: Money,
) -> Amortization {
    Amortization {
        balance: principal,
        monthly_rate: monthly_rate(annual_rate_pct),
        emi,
        month: 0,
        tenure_months,
        done: false,
    }
}

impl Iterator for Amortization {
    type Item = AmortizationRow;

    fn next(&mut self) -> Option<AmortizationRow> {
        if self.done || self.month >= self.tenure_months {
            return None;
        }
        // an instalment below the interest grows the balance; stop at the Decimal range
        let step = self.balance.checked_mul(self.monthly_rate).and_then(|interest| {
            let towards_principal = self.emi.checked_sub(interest)?;
            // final instalment never drives the balance negative
            let principal_paid = towards_principal.min(self.balance);
            let balance = self.balance.checked_sub(principal_paid)?;
            Some((interest, principal_paid, balance))
        });
        let (interest_paid, principal_paid, balance) = match step {
            Some(step) => step,
            None => {
                self.done = true;
                return None;
            }
        };
        self.month += 1;
        self.balance = balance.max(Decimal::ZERO);

        if self.balance <= Decimal::ZERO {
            self.done = true;
        }

        Some(AmortizationRow {
            month: self.month,
            principal_paid,
            interest_paid,
            total_payment: principal_paid + interest_paid,
            remaining_balance: self.balance,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let left = self.tenure_months.saturating_sub(self.month) as usize;
        (0, Some(left))
    }
}

impl FusedIterator for Amortization {}

/// Build the full schedule for the given terms and instalment.
pub fn calculate_amortization_schedule(
    principal: Money,
    annual_rate_pct: Percent,
    tenure_months: u32,
    emi: Money,
) -> Vec<AmortizationRow> {
    amortize(principal, annual_rate_pct, tenure_months, emi).collect()
}

impl ScheduleInput {
    pub fn schedule(&self) -> Vec<AmortizationRow> {
        calculate_amortization_schedule(
            self.principal,
            self.annual_rate_pct,
            self.tenure_months,
            self.emi,
        )
    }
}
