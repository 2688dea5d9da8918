use snowball::schedule::{
    simulate, simulate_detailed, snowball_order, summarize, Debt, PaymentKind, MAX_MONTHS,
};
use snowball::{InvalidInput, SimulationError};

const TOLERANCE: f64 = 1e-6;

fn sample_debts() -> Vec<Debt> {
    vec![
        Debt::new("Student Loan", 13.25, 755.0, 7140.74),
        Debt::new("Visa", 29.24, 50.0, 444.7),
        Debt::new("Urgent Care", 0.0, 35.0, 15.0),
        Debt::new("Store Card", 27.49, 50.0, 414.16),
        Debt::new("Trailer Loan", 12.24, 197.39, 2594.08),
        Debt::new("Car Loan", 18.14, 317.48, 11900.49),
    ]
}

#[test]
fn test_single_debt_baseline() {
    let debts = vec![Debt::new("Loan", 0.0, 100.0, 1200.0)];
    let schedules = simulate(&debts, 0.0).unwrap();

    assert_eq!(schedules.len(), 1);
    let months = &schedules[0].months;
    assert_eq!(months.len(), 12);
    assert!(months.iter().all(|m| m.interest_paid == 0.0));
    assert!(months.iter().all(|m| (m.payment - 100.0).abs() < TOLERANCE));
    assert_eq!(months.last().unwrap().remaining_balance, 0.0);
    assert_eq!(months.last().unwrap().kind, PaymentKind::Payoff);
    assert_eq!(schedules[0].payoff_month(), Some(12));
}

#[test]
fn test_two_debt_cascade() {
    let debts = vec![
        Debt::new("A", 0.0, 100.0, 100.0),
        Debt::new("B", 0.0, 50.0, 1000.0),
    ];
    let schedules = simulate(&debts, 0.0).unwrap();

    let a = &schedules[0];
    assert_eq!(a.months.len(), 1);
    assert_eq!(a.months[0].remaining_balance, 0.0);
    assert_eq!(a.months[0].rollover, 0.0);

    let b = &schedules[1];
    assert!((b.months[0].payment - 50.0).abs() < TOLERANCE);
    assert_eq!(b.months[0].kind, PaymentKind::Minimum);
    assert!((b.months[0].remaining_balance - 950.0).abs() < TOLERANCE);

    // A's freed minimum joins the pool from month 2
    assert!((b.months[1].payment - 150.0).abs() < TOLERANCE);
    assert_eq!(b.months[1].kind, PaymentKind::MinimumPlusRollover);
    for record in &b.months[1..b.months.len() - 1] {
        assert!((record.payment - 150.0).abs() < TOLERANCE);
    }

    // 950 at 150/month: six full payments then a final 50
    assert_eq!(b.months.len(), 8);
    let last = b.months.last().unwrap();
    assert!((last.payment - 50.0).abs() < TOLERANCE);
    assert!((last.rollover - 100.0).abs() < TOLERANCE);
    assert_eq!(last.remaining_balance, 0.0);

    assert!(a.is_snowballed(2));
    assert!(!a.is_snowballed(1));
}

#[test]
fn test_overshoot_rolls_to_next_debt_next_month() {
    let debts = vec![
        Debt::new("Small", 0.0, 100.0, 30.0),
        Debt::new("Large", 0.0, 20.0, 500.0),
    ];
    let sim = simulate_detailed(&debts, 0.0).unwrap();
    let small = &sim.schedules[0];
    let large = &sim.schedules[1];

    assert_eq!(small.months.len(), 1);
    assert!((small.months[0].payment - 30.0).abs() < TOLERANCE);
    assert!((small.months[0].rollover - 70.0).abs() < TOLERANCE);

    // Month 2: own minimum 20 + freed minimum 100 + one-off leftover 70
    assert!((large.months[1].payment - 190.0).abs() < TOLERANCE);
    // Month 3: leftover is spent, freed minimum stays
    assert!((large.months[2].payment - 120.0).abs() < TOLERANCE);

    assert!((sim.months[1].carried - 70.0).abs() < TOLERANCE);
    assert_eq!(sim.months[2].carried, 0.0);
}

#[test]
fn test_extra_contribution_goes_to_smallest_balance() {
    let debts = vec![
        Debt::new("Big", 0.0, 50.0, 1000.0),
        Debt::new("Small", 0.0, 25.0, 200.0),
    ];
    let schedules = simulate(&debts, 75.0).unwrap();

    // Output keeps input order, but the smaller debt receives the extra
    assert_eq!(schedules[0].debt.name, "Big");
    assert!((schedules[0].months[0].payment - 50.0).abs() < TOLERANCE);
    assert!((schedules[1].months[0].payment - 100.0).abs() < TOLERANCE);
    assert_eq!(schedules[1].months.len(), 2);
}

#[test]
fn test_already_paid_debt_has_empty_schedule() {
    let debts = vec![
        Debt::new("Paid", 0.0, 500.0, 0.0),
        Debt::new("Open", 0.0, 100.0, 300.0),
    ];
    let schedules = simulate(&debts, 0.0).unwrap();

    assert!(schedules[0].months.is_empty());
    assert_eq!(schedules[0].payoff_month(), None);
    assert!(!schedules[0].is_snowballed(1));

    // The paid debt's minimum does not feed the snowball
    assert_eq!(schedules[1].months.len(), 3);
    assert!(schedules[1]
        .months
        .iter()
        .all(|m| m.kind != PaymentKind::MinimumPlusRollover));
}

#[test]
fn test_all_debts_already_paid() {
    let debts = vec![Debt::new("Paid", 5.0, 50.0, 0.0)];
    let sim = simulate_detailed(&debts, 10.0).unwrap();
    assert_eq!(sim.months_to_payoff(), 0);
    assert!(sim.schedules[0].months.is_empty());
}

#[test]
fn test_non_amortizing_debt_is_rejected() {
    let debts = vec![Debt::new("Payday", 50.0, 1.0, 1000.0)];
    let err = simulate(&debts, 0.0).unwrap_err();

    match err {
        SimulationError::NonAmortizing {
            name,
            balance,
            monthly_interest,
        } => {
            assert_eq!(name, "Payday");
            assert!(balance > 1000.0);
            assert!(monthly_interest > 1.0);
        }
        other => panic!("expected NonAmortizing, got {other:?}"),
    }
}

#[test]
fn test_zero_payment_debt_is_rejected() {
    let debts = vec![Debt::new("Frozen", 0.0, 0.0, 100.0)];
    assert!(matches!(
        simulate(&debts, 0.0),
        Err(SimulationError::NonAmortizing { .. })
    ));
}

#[test]
fn test_extra_rescues_debt_that_minimum_cannot_cover() {
    let debts = vec![Debt::new("Payday", 50.0, 1.0, 1000.0)];
    let schedules = simulate(&debts, 200.0).unwrap();
    assert_eq!(schedules[0].months.last().unwrap().remaining_balance, 0.0);
}

#[test]
fn test_invalid_input() {
    assert_eq!(
        simulate(&[], 0.0).unwrap_err(),
        SimulationError::InvalidInput(InvalidInput::NoDebts)
    );

    let debts = vec![Debt::new("Loan", 5.0, 100.0, 1000.0)];
    assert!(matches!(
        simulate(&debts, -1.0),
        Err(SimulationError::InvalidInput(InvalidInput::NegativeContribution(_)))
    ));

    let bad = vec![Debt::new("Loan", -5.0, 100.0, 1000.0)];
    assert!(matches!(
        simulate(&bad, 0.0),
        Err(SimulationError::InvalidInput(InvalidInput::NegativeValue {
            field: "interest rate",
            ..
        }))
    ));

    let nan = vec![Debt::new("Loan", 5.0, f64::NAN, 1000.0)];
    assert!(matches!(
        simulate(&nan, 0.0),
        Err(SimulationError::InvalidInput(InvalidInput::NegativeValue { .. }))
    ));
}

#[test]
fn test_determinism() {
    let debts = sample_debts();
    let first = simulate_detailed(&debts, 100.0).unwrap();
    let second = simulate_detailed(&debts, 100.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_schedules_terminate_at_zero_and_never_go_negative() {
    let schedules = simulate(&sample_debts(), 100.0).unwrap();

    for schedule in &schedules {
        let last = schedule.months.last().unwrap();
        assert_eq!(last.remaining_balance, 0.0, "{}", schedule.debt.name);
        assert!(schedule.months.iter().all(|m| m.remaining_balance >= 0.0));

        // Only the final month may carry a rollover
        for record in &schedule.months[..schedule.months.len() - 1] {
            assert_eq!(record.rollover, 0.0);
        }
    }
}

#[test]
fn test_payment_conservation() {
    let schedules = simulate(&sample_debts(), 100.0).unwrap();

    for record in schedules.iter().flat_map(|s| &s.months) {
        assert!(
            (record.principal_paid + record.interest_paid - record.payment).abs() < TOLERANCE,
            "month {}: {record:?}",
            record.month
        );
    }
}

#[test]
fn test_snowball_pool_never_shrinks() {
    let sim = simulate_detailed(&sample_debts(), 100.0).unwrap();

    assert!((sim.months[0].snowball - 100.0).abs() < TOLERANCE);
    for pair in sim.months.windows(2) {
        assert!(pair[1].snowball >= pair[0].snowball);
    }

    // Once everything is paid, the pool holds the extra plus every minimum but the last
    let all_minimums: f64 = sample_debts().iter().map(|d| d.monthly_payment).sum();
    assert!(sim.months.last().unwrap().snowball <= 100.0 + all_minimums);
}

#[test]
fn test_month_snapshots_match_records() {
    let sim = simulate_detailed(&sample_debts(), 100.0).unwrap();

    for snapshot in &sim.months {
        let paid: f64 = sim
            .schedules
            .iter()
            .filter_map(|s| s.record(snapshot.month))
            .map(|r| r.payment)
            .sum();
        assert!((paid - snapshot.total_paid).abs() < TOLERANCE);
    }

    let longest = sim.schedules.iter().map(|s| s.months.len()).max().unwrap();
    assert_eq!(sim.months_to_payoff(), longest);
}

#[test]
fn test_interest_accrues_monthly() {
    let debts = vec![Debt::new("Card", 12.0, 100.0, 1000.0)];
    let schedules = simulate(&debts, 0.0).unwrap();
    let first = &schedules[0].months[0];

    assert!((first.interest_paid - 10.0).abs() < TOLERANCE);
    assert!((first.principal_paid - 90.0).abs() < TOLERANCE);
    assert!((first.remaining_balance - 910.0).abs() < TOLERANCE);
}

#[test]
fn test_snowball_order_is_stable() {
    let debts = vec![
        Debt::new("First", 0.0, 10.0, 500.0),
        Debt::new("Smallest", 0.0, 10.0, 100.0),
        Debt::new("Second", 0.0, 10.0, 500.0),
    ];
    assert_eq!(snowball_order(&debts), vec![1, 0, 2]);
}

#[test]
fn test_slow_amortization_hits_horizon() {
    // Pays down a hundredth of a cent at first: amortizing, but not within 100 years
    let debts = vec![Debt::new("Mortgage", 12.0, 100.0001, 10000.0)];
    assert_eq!(
        simulate(&debts, 0.0).unwrap_err(),
        SimulationError::HorizonExceeded { months: MAX_MONTHS }
    );
}

#[test]
fn test_summary_totals_and_comparison() {
    let debts = sample_debts();
    let summary = summarize(&debts, 100.0).unwrap();
    let schedules = simulate(&debts, 100.0).unwrap();

    let interest: f64 = schedules.iter().map(|s| s.total_interest()).sum();
    assert!((summary.total_interest - interest).abs() < TOLERANCE);
    assert_eq!(summary.debts.len(), debts.len());
    assert_eq!(summary.debts[2].payoff_month, Some(1));

    let cmp = summary.comparison.expect("comparison with no extra");
    assert!(cmp.baseline_months >= summary.months_to_payoff);
    assert!(cmp.interest_saved > 0.0);
}

#[test]
fn test_summary_without_extra_has_no_comparison() {
    let debts = vec![Debt::new("Loan", 0.0, 100.0, 1200.0)];
    let summary = summarize(&debts, 0.0).unwrap();
    assert_eq!(summary.months_to_payoff, 12);
    assert!((summary.total_paid - 1200.0).abs() < TOLERANCE);
    assert!(summary.comparison.is_none());
}

#[test]
fn test_float_residue_does_not_add_a_month() {
    // Ten payments of 0.1 leave ~1e-16 behind in f64 arithmetic
    let debts = vec![Debt::new("Dime", 0.0, 0.1, 1.0)];
    let schedules = simulate(&debts, 0.0).unwrap();

    let months = &schedules[0].months;
    assert_eq!(months.len(), 10);
    assert_eq!(months.last().unwrap().kind, PaymentKind::Payoff);
    assert_eq!(months.last().unwrap().remaining_balance, 0.0);
}

#[test]
fn test_growing_active_debt_waits_for_snowball() {
    // A's minimum doesn't cover its interest, but B pays off in month 3
    // and frees 2000/month for A
    let debts = vec![
        Debt::new("A", 50.0, 1.0, 1000.0),
        Debt::new("B", 0.0, 2000.0, 6000.0),
    ];
    let schedules = simulate(&debts, 0.0).unwrap();

    assert_eq!(schedules[1].payoff_month(), Some(3));
    assert_eq!(schedules[0].payoff_month(), Some(4));
    assert!(schedules[0].months[1].remaining_balance > 1000.0);
    assert_eq!(schedules[0].months[3].kind, PaymentKind::Payoff);
}

#[test]
fn test_stalled_plan_rejected_once_other_debts_are_gone() {
    // B clears in month 1; B's freed minimum still leaves A short of its interest
    let debts = vec![
        Debt::new("A", 50.0, 1.0, 1000.0),
        Debt::new("B", 0.0, 5.0, 5.0),
    ];
    let err = simulate(&debts, 0.0).unwrap_err();
    assert!(matches!(err, SimulationError::NonAmortizing { ref name, .. } if name == "A"));
}
