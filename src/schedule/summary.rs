use serde::Serialize;
use tracing::debug;

use super::debt::Debt;
use super::simulator::{simulate_detailed, Simulation};
use crate::error::SimulationError;

/// Payoff figures for a single debt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtPayoff {
    pub name: String,
    /// `None` when the debt was already paid off
    pub payoff_month: Option<usize>,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// How the plan compares with paying the same debts with no extra contribution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub baseline_months: usize,
    pub baseline_interest: f64,
    pub months_saved: usize,
    pub interest_saved: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanSummary {
    pub extra_monthly: f64,
    pub months_to_payoff: usize,
    pub total_paid: f64,
    pub total_interest: f64,
    /// Payoff order matches the input order of the debts
    pub debts: Vec<DebtPayoff>,
    pub comparison: Option<Comparison>,
}

impl PlanSummary {
    pub fn from_simulation(sim: &Simulation, extra_monthly: f64) -> Self {
        let debts: Vec<DebtPayoff> = sim
            .schedules
            .iter()
            .map(|schedule| DebtPayoff {
                name: schedule.debt.name.clone(),
                payoff_month: schedule.payoff_month(),
                total_paid: schedule.total_paid(),
                total_interest: schedule.total_interest(),
            })
            .collect();

        Self {
            extra_monthly,
            months_to_payoff: sim.months_to_payoff(),
            total_paid: debts.iter().map(|d| d.total_paid).sum(),
            total_interest: debts.iter().map(|d| d.total_interest).sum(),
            debts,
            comparison: None,
        }
    }
}

/// Simulate the plan and, when there is an extra contribution, compare it
/// against the same debts snowballed with no extra money.
pub fn summarize(debts: &[Debt], extra_monthly: f64) -> Result<PlanSummary, SimulationError> {
    let sim = simulate_detailed(debts, extra_monthly)?;
    let mut summary = PlanSummary::from_simulation(&sim, extra_monthly);

    if extra_monthly > 0.0 {
        match simulate_detailed(debts, 0.0) {
            Ok(baseline) => {
                let baseline = PlanSummary::from_simulation(&baseline, 0.0);
                summary.comparison = Some(Comparison {
                    baseline_months: baseline.months_to_payoff,
                    baseline_interest: baseline.total_interest,
                    months_saved: baseline
                        .months_to_payoff
                        .saturating_sub(summary.months_to_payoff),
                    interest_saved: baseline.total_interest - summary.total_interest,
                });
            }
            // Minimums alone may never clear the debts; the plan itself is still valid.
            Err(err) => debug!(error = %err, "no baseline without extra contribution"),
        }
    }

    Ok(summary)
}
