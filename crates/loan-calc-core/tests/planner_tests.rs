use chrono::{TimeZone, Utc};
use loan_calc_core::loan::{InterestInput, InterestType, RateSolveInput, TenureSolveInput};
use loan_calc_core::planner::{
    run_calculation, solve_rate_with_pinned_payment, CalculationRequest, CalculatorType, History,
    HistoryEntry,
};
use loan_calc_core::{calculate_emi, LoanTerms};
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

#[test]
fn test_rate_solve_caller_contract() {
    let input = RateSolveInput {
        principal: dec!(10000),
        tenure_months: 12,
        target_emi: dec!(900),
    };
    let solve = solve_rate_with_pinned_payment(&input);

    // steps spelled out: solve, recompute, pin
    let rate = input.solve();
    let mut expected = calculate_emi(dec!(10000), rate, 12);
    expected.pin_monthly_payment(dec!(900));

    assert_eq!(solve.rate_pct, rate);
    assert_eq!(solve.result, expected);
    assert_eq!(solve.result.monthly_payment, Some(dec!(900)));
}

#[test]
fn test_engine_result_not_pinned_without_caller() {
    let input = RateSolveInput {
        principal: dec!(10000),
        tenure_months: 12,
        target_emi: dec!(900),
    };
    let raw = calculate_emi(dec!(10000), input.solve(), 12);
    assert!(raw.monthly_payment != Some(dec!(900)));
}

#[test]
fn test_each_mode_round_trips_through_json() {
    let requests = vec![
        CalculationRequest::Emi(LoanTerms::new(dec!(10000), dec!(18), 24)),
        CalculationRequest::Interest(InterestInput {
            principal: dec!(10000),
            annual_rate_pct: dec!(18),
            tenure_months: 24,
            interest_type: InterestType::Compound,
        }),
        CalculationRequest::Advanced(TenureSolveInput {
            principal: dec!(10000),
            annual_rate_pct: dec!(18),
            emi: dec!(1000),
        }),
        CalculationRequest::OptimizeTenure(TenureSolveInput {
            principal: dec!(10000),
            annual_rate_pct: dec!(18),
            emi: dec!(1200),
        }),
        CalculationRequest::OptimizeRate(RateSolveInput {
            principal: dec!(10000),
            tenure_months: 24,
            target_emi: dec!(1200),
        }),
    ];

    for req in requests {
        let json = serde_json::to_string(&req).unwrap();
        let back = CalculationRequest::from_json(&json).unwrap();
        let a = run_calculation(&req);
        let b = run_calculation(&back);
        assert_eq!(a.result, b.result);
        assert_eq!(a.warnings, b.warnings);
        assert!(a.result.calculation.is_ok(), "{:?} failed", req);
    }
}

#[test]
fn test_history_follows_session() {
    let mut history = History::new();
    let t0 = Utc.timestamp_opt(1_700_000_000, 0).unwrap();

    let emi = CalculationRequest::Emi(LoanTerms::new(dec!(10000), dec!(18), 24));
    let bad = CalculationRequest::Advanced(TenureSolveInput {
        principal: dec!(10000),
        annual_rate_pct: dec!(18),
        emi: dec!(100),
    });
    let solve = CalculationRequest::Advanced(TenureSolveInput {
        principal: dec!(10000),
        annual_rate_pct: dec!(18),
        emi: dec!(1000),
    });

    assert!(history.record(&emi, &run_calculation(&emi).result, t0));
    assert!(!history.record(&bad, &run_calculation(&bad).result, t0));
    assert!(history.record(&solve, &run_calculation(&solve).result, t0));

    assert_eq!(history.len(), 2);
    let newest: &HistoryEntry = &history.entries()[0];
    assert_eq!(newest.calculator, CalculatorType::Advanced);
    assert_eq!(newest.label, "Tenure Solve");

    // reloading reproduces the same calculation
    let replay = run_calculation(&newest.to_request());
    assert_eq!(
        replay.result.calculation.tenure_months,
        newest.tenure_months
    );
}
