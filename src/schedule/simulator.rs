use serde::Serialize;
use tracing::{debug, info, trace, warn};

use super::debt::{snowball_order, validate_input, Debt};
use crate::error::SimulationError;

/// Upper bound on simulated months (100 years).
pub const MAX_MONTHS: usize = 1200;

/// Balances this close to zero are treated as paid off.
pub const BALANCE_EPSILON: f64 = 1e-7;

/// How a month's payment amount was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Contractual minimum only
    Minimum,
    /// Minimum plus the shared snowball pool
    MinimumPlusRollover,
    /// Last payment, sized to what the balance and interest required
    Payoff,
}

/// One debt's ledger entry for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthRecord {
    /// 1-based month of the run
    pub month: usize,
    pub payment: f64,
    pub principal_paid: f64,
    pub interest_paid: f64,
    pub remaining_balance: f64,
    /// Offered amount left over after paying the debt off
    pub rollover: f64,
    pub kind: PaymentKind,
    pub info: String,
}

/// A debt together with its month-by-month payoff records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtSchedule {
    pub debt: Debt,
    pub months: Vec<MonthRecord>,
}

impl DebtSchedule {
    fn new(debt: Debt) -> Self {
        Self {
            debt,
            months: Vec::new(),
        }
    }

    /// Month in which the balance reached zero, or `None` for a debt that started paid off.
    pub fn payoff_month(&self) -> Option<usize> {
        self.months
            .last()
            .filter(|record| record.remaining_balance == 0.0)
            .map(|record| record.month)
    }

    /// True for every month after the payoff month; its minimum now feeds the snowball.
    pub fn is_snowballed(&self, month: usize) -> bool {
        self.payoff_month().is_some_and(|payoff| month > payoff)
    }

    /// Record for a 1-based month, if the debt was still open then.
    pub fn record(&self, month: usize) -> Option<&MonthRecord> {
        month.checked_sub(1).and_then(|idx| self.months.get(idx))
    }

    pub fn total_paid(&self) -> f64 {
        self.months.iter().map(|r| r.payment).sum()
    }

    pub fn total_interest(&self) -> f64 {
        self.months.iter().map(|r| r.interest_paid).sum()
    }
}

/// Plan-wide figures for one simulated month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSnapshot {
    pub month: usize,
    /// Extra contribution plus the minimums of debts already paid off
    pub snowball: f64,
    /// One-off leftover from last month's payoffs, handed to the active debt
    pub carried: f64,
    pub total_paid: f64,
    pub total_interest: f64,
}

/// Full result of a run: per-debt schedules in input order plus the month-level trace.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Simulation {
    pub schedules: Vec<DebtSchedule>,
    pub months: Vec<MonthSnapshot>,
}

impl Simulation {
    /// Number of months until every debt is paid off.
    pub fn months_to_payoff(&self) -> usize {
        self.months.len()
    }
}

/// Run the snowball and return one schedule per debt, in input order.
pub fn simulate(debts: &[Debt], extra_monthly: f64) -> Result<Vec<DebtSchedule>, SimulationError> {
    simulate_detailed(debts, extra_monthly).map(|sim| sim.schedules)
}

/// Tracks how long the plan has gone without any debt paying down.
#[derive(Default)]
struct StallGuard {
    debt: Option<usize>,
    snowball: f64,
    months: u32,
}

impl StallGuard {
    /// Returns true once the active debt has gone two consecutive months
    /// with no open debt paying down and no growth in the snowball.
    fn observe(&mut self, debt: usize, snowball: f64, progressed: bool) -> bool {
        if progressed {
            *self = Self::default();
            return false;
        }

        if self.debt == Some(debt) && snowball <= self.snowball {
            self.months += 1;
        } else {
            *self = Self {
                debt: Some(debt),
                snowball,
                months: 1,
            };
        }

        self.months >= 2
    }
}

/// Run the snowball and keep the month-level trace alongside the schedules.
pub fn simulate_detailed(debts: &[Debt], extra_monthly: f64) -> Result<Simulation, SimulationError> {
    validate_input(debts, extra_monthly)?;

    let order = snowball_order(debts);
    let mut balances: Vec<f64> = debts.iter().map(|d| d.current_balance).collect();
    let mut schedules: Vec<DebtSchedule> = debts.iter().cloned().map(DebtSchedule::new).collect();
    let mut snapshots = Vec::new();

    let mut snowball = extra_monthly;
    let mut carried = 0.0;
    let mut guard = StallGuard::default();
    let mut month = 1;

    while let Some(active) = order.iter().copied().find(|&idx| balances[idx] > 0.0) {
        if month > MAX_MONTHS {
            warn!(months = MAX_MONTHS, "simulation horizon exceeded");
            return Err(SimulationError::HorizonExceeded { months: MAX_MONTHS });
        }
        trace!(month, snowball, carried, active = %debts[active].name, "simulating month");

        let mut freed = 0.0;
        let mut next_carry = 0.0;
        let mut total_paid = 0.0;
        let mut total_interest = 0.0;
        // Any open debt losing balance means the snowball can still grow
        let mut progressed = false;
        let mut active_outcome = (balances[active], 0.0);

        for &idx in &order {
            let balance = balances[idx];
            if balance <= 0.0 {
                continue;
            }

            let debt = &debts[idx];
            let boost = if idx == active { snowball + carried } else { 0.0 };
            let record = apply_payment(debt, month, balance, boost);

            if record.remaining_balance < balance {
                progressed = true;
            }
            if idx == active {
                active_outcome = (record.remaining_balance, record.interest_paid);
            }

            if record.remaining_balance == 0.0 {
                debug!(debt = %debt.name, month, rollover = record.rollover, "debt paid off");
                freed += debt.monthly_payment;
                next_carry += record.rollover;
            }

            total_paid += record.payment;
            total_interest += record.interest_paid;
            balances[idx] = record.remaining_balance;
            schedules[idx].months.push(record);
        }

        if guard.observe(active, snowball, progressed) {
            let (balance, monthly_interest) = active_outcome;
            warn!(debt = %debts[active].name, month, balance, "debt is not amortizing");
            return Err(SimulationError::NonAmortizing {
                name: debts[active].name.clone(),
                balance,
                monthly_interest,
            });
        }

        snapshots.push(MonthSnapshot {
            month,
            snowball,
            carried,
            total_paid,
            total_interest,
        });

        snowball += freed;
        carried = next_carry;
        month += 1;
    }

    info!(
        debts = debts.len(),
        months = snapshots.len(),
        "snowball simulation complete"
    );

    Ok(Simulation {
        schedules,
        months: snapshots,
    })
}

/// Accrue one month of interest on `balance` and apply the minimum plus `boost`.
fn apply_payment(debt: &Debt, month: usize, balance: f64, boost: f64) -> MonthRecord {
    let minimum = debt.monthly_payment;
    let offered = minimum + boost;
    let interest = debt.monthly_interest(balance);
    let due = balance + interest;

    if offered + BALANCE_EPSILON >= due {
        let rollover = (offered - due).max(0.0);
        let info = if rollover > 0.0 {
            format!(
                "Final payoff of {due:.2} ({balance:.2} balance + {interest:.2} interest); {rollover:.2} of the {offered:.2} available rolls over"
            )
        } else {
            format!("Final payoff of {due:.2} ({balance:.2} balance + {interest:.2} interest)")
        };

        return MonthRecord {
            month,
            payment: due,
            principal_paid: balance,
            interest_paid: interest,
            remaining_balance: 0.0,
            rollover,
            kind: PaymentKind::Payoff,
            info,
        };
    }

    let (kind, info) = if boost > 0.0 {
        (
            PaymentKind::MinimumPlusRollover,
            format!("Minimum payment of {minimum:.2} plus {boost:.2} rolled over from the snowball"),
        )
    } else {
        (
            PaymentKind::Minimum,
            format!("Minimum payment of {minimum:.2}"),
        )
    };

    let principal = offered - interest;
    MonthRecord {
        month,
        payment: offered,
        principal_paid: principal,
        interest_paid: interest,
        remaining_balance: balance - principal,
        rollover: 0.0,
        kind,
        info,
    }
}
