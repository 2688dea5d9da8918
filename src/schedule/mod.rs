mod debt;
mod simulator;
mod summary;

pub use debt::{snowball_order, validate_input, Debt};
pub use simulator::{
    simulate, simulate_detailed, DebtSchedule, MonthRecord, MonthSnapshot, PaymentKind,
    Simulation, BALANCE_EPSILON, MAX_MONTHS,
};
pub use summary::{summarize, Comparison, DebtPayoff, PlanSummary};
