pub mod config;
pub mod error;
pub mod render;
pub mod schedule;

pub use config::{Config, DebtBook};
pub use error::{InvalidInput, Result, SimulationError, SnowballError};
pub use schedule::{
    simulate, simulate_detailed, summarize, Debt, DebtSchedule, MonthRecord, PaymentKind,
    PlanSummary, Simulation,
};
