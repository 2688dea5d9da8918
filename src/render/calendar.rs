use chrono::{Months, NaiveDate};

use crate::error::{Result, SnowballError};

/// Parse a "YYYY-MM" start month into the first day of that month
pub fn parse_start_month(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map_err(|_| SnowballError::InvalidMonth(input.to_string()))
}

/// Labels simulated months either by number or by calendar month.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonthLabeler {
    start: Option<NaiveDate>,
}

impl MonthLabeler {
    pub fn new(start: Option<NaiveDate>) -> Self {
        Self { start }
    }

    /// Label for a 1-based month of the run
    pub fn label(&self, month: usize) -> String {
        let offset = u32::try_from(month.saturating_sub(1)).ok();
        match (self.start, offset) {
            (Some(start), Some(offset)) => start
                .checked_add_months(Months::new(offset))
                .map(|date| date.format("%b %Y").to_string())
                .unwrap_or_else(|| format!("Month {month}")),
            _ => format!("Month {month}"),
        }
    }
}

