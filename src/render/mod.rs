mod calendar;
mod money;
mod table;

pub use calendar::{parse_start_month, MonthLabeler};
pub use money::{format_money, format_rate};
pub use table::{debts_table, schedule_table, summary_table};

use serde::Serialize;

use crate::error::Result;

/// Pretty-printed JSON for any plan output
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
