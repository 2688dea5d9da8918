use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// A single debt as entered by the user.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Debt {
    pub name: String,
    /// Annual percentage rate (e.g., 13.25 for 13.25%)
    pub interest_rate: f64,
    /// Contractual minimum payment
    pub monthly_payment: f64,
    pub current_balance: f64,
}

impl Debt {
    pub fn new(
        name: impl Into<String>,
        interest_rate: f64,
        monthly_payment: f64,
        current_balance: f64,
    ) -> Self {
        Self {
            name: name.into(),
            interest_rate,
            monthly_payment,
            current_balance,
        }
    }

    /// Interest accrued in one month on `balance`, compounded monthly from the annual rate.
    pub fn monthly_interest(&self, balance: f64) -> f64 {
        balance * (self.interest_rate / 100.0) / 12.0
    }

    /// Reject negative or non-finite amounts.
    pub fn validate(&self) -> Result<(), InvalidInput> {
        let fields = [
            ("interest rate", self.interest_rate),
            ("monthly payment", self.monthly_payment),
            ("balance", self.current_balance),
        ];

        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(InvalidInput::NegativeValue {
                    debt: self.name.clone(),
                    field,
                    value,
                });
            }
        }

        Ok(())
    }
}

/// Validate a whole simulation input.
pub fn validate_input(debts: &[Debt], extra_monthly: f64) -> Result<(), InvalidInput> {
    if debts.is_empty() {
        return Err(InvalidInput::NoDebts);
    }
    if !extra_monthly.is_finite() || extra_monthly < 0.0 {
        return Err(InvalidInput::NegativeContribution(extra_monthly));
    }
    debts.iter().try_for_each(Debt::validate)
}

/// Indices of `debts` in snowball priority: smallest starting balance first.
///
/// The sort is stable, so debts with equal balances keep their input order.
/// Swapping this function is all it would take to change the payoff strategy.
pub fn snowball_order(debts: &[Debt]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..debts.len()).collect();
    order.sort_by(|&a, &b| {
        debts[a]
            .current_balance
            .total_cmp(&debts[b].current_balance)
    });
    order
}
