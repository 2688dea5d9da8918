mod settings;

pub use settings::{Config, DisplaySettings, PlanSettings};

use crate::error::{Result, SnowballError};
use crate::schedule::Debt;
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Debts keyed by their identifier in debts.toml
pub type DebtBook = BTreeMap<String, Debt>;

/// Get the config directory path (XDG config dir, falling back to ~/.snowball/)
pub fn config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "snowball") {
        return Ok(proj_dirs.config_dir().to_path_buf());
    }

    let home = std::env::var_os("HOME").map(PathBuf::from).ok_or_else(|| {
        SnowballError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine home directory",
        ))
    })?;

    Ok(home.join(".snowball"))
}

fn load_toml<T: DeserializeOwned>(path: PathBuf) -> Result<T> {
    if !path.exists() {
        return Err(SnowballError::ConfigFileNotFound(path));
    }
    let content = fs::read_to_string(&path)?;
    toml::from_str(&content).map_err(|e| SnowballError::ConfigParse { path, source: e })
}

/// Load the main config.toml
pub fn load_config(config_dir: &Path) -> Result<Config> {
    load_toml(config_dir.join("config.toml"))
}

/// Load debts.toml, validating every entry
pub fn load_debts(config_dir: &Path) -> Result<DebtBook> {
    let debts: DebtBook = load_toml(config_dir.join("debts.toml"))?;
    for debt in debts.values() {
        debt.validate()?;
    }
    tracing::debug!(count = debts.len(), "loaded debts");
    Ok(debts)
}

/// Save debts.toml
pub fn save_debts(config_dir: &Path, debts: &DebtBook) -> Result<()> {
    let path = config_dir.join("debts.toml");
    let content = toml::to_string_pretty(debts).map_err(|e| SnowballError::ConfigWrite {
        path: path.clone(),
        source: e,
    })?;
    fs::write(path, content)?;
    Ok(())
}

/// Split the book into identifiers and debts, both in identifier order.
pub fn book_entries(debts: &DebtBook) -> (Vec<String>, Vec<Debt>) {
    debts
        .iter()
        .map(|(id, debt)| (id.clone(), debt.clone()))
        .unzip()
}

/// Template content for config.toml
pub const CONFIG_TEMPLATE: &str = r#"[plan]
extra_monthly = 100.0       # paid on top of all minimums every month
# start_month = "2026-01"   # optional, labels months with calendar dates

[display]
currency_symbol = "$"
"#;

/// Template content for debts.toml
pub const DEBTS_TEMPLATE: &str = r#"# Define your debts here. The table name (e.g., [visa]) is used
# as the debt identifier in the add/remove commands.
#
# Debts are paid smallest balance first; once one is gone its minimum
# payment rolls onto the next.

[urgent-care]
name = "Urgent Care Bill"
interest_rate = 0.0         # annual percentage rate
monthly_payment = 35.0      # contractual minimum
current_balance = 15.0

[store-card]
name = "Store Credit Card"
interest_rate = 27.49
monthly_payment = 50.0
current_balance = 414.16

[visa]
name = "Visa Credit Card"
interest_rate = 29.24
monthly_payment = 50.0
current_balance = 444.7

[trailer-loan]
name = "Trailer Loan"
interest_rate = 12.24
monthly_payment = 197.39
current_balance = 2594.08

[student-loan]
name = "Student Loan"
interest_rate = 13.25
monthly_payment = 755.0
current_balance = 7140.74

[car-loan]
name = "Car Loan"
interest_rate = 18.14
monthly_payment = 317.48
current_balance = 11900.49
"#;
