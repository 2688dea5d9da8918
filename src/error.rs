use std::path::PathBuf;
use thiserror::Error;

/// Rejected simulation input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InvalidInput {
    #[error("No debts to simulate")]
    NoDebts,

    #[error("Debt '{debt}' has an invalid {field} ({value}); it must be a non-negative number")]
    NegativeValue {
        debt: String,
        field: &'static str,
        value: f64,
    },

    #[error("Extra monthly contribution must be a non-negative number (got {0})")]
    NegativeContribution(f64),
}

/// Errors raised by the payoff engine. A failed run never yields a partial schedule.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error(
        "Debt '{name}' never pays down: balance {balance:.2} accrues {monthly_interest:.2} interest per month, more than it receives"
    )]
    NonAmortizing {
        name: String,
        balance: f64,
        monthly_interest: f64,
    },

    #[error("Debts are not paid off after {months} months")]
    HorizonExceeded { months: usize },
}

#[derive(Error, Debug)]
pub enum SnowballError {
    #[error("Config directory not found at {0}. Run 'snowball init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Config file not found: {0}")]
    ConfigFileNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: toml::ser::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Debt '{0}' not found in debts.toml")]
    DebtNotFound(String),

    #[error("Debt '{0}' already exists in debts.toml")]
    DuplicateDebt(String),

    #[error("Invalid month '{0}'. Expected YYYY-MM (e.g., '2026-01')")]
    InvalidMonth(String),

    #[error("Failed to serialize schedule: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Simulation(#[from] SimulationError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<InvalidInput> for SnowballError {
    fn from(err: InvalidInput) -> Self {
        SnowballError::Simulation(SimulationError::InvalidInput(err))
    }
}

pub type Result<T> = std::result::Result<T, SnowballError>;
