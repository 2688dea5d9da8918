use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct PlanSettings {
    /// Extra amount put toward debts every month on top of the minimums
    #[serde(default)]
    pub extra_monthly: f64,
    /// Calendar month of the first payment, as YYYY-MM
    #[serde(default)]
    pub start_month: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct DisplaySettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}
