use tabled::{builder::Builder, settings::Style, Table, Tabled};

use super::calendar::MonthLabeler;
use super::money::{format_money, format_rate};
use crate::schedule::{snowball_order, Debt, MonthRecord, PlanSummary, Simulation};

// Table row structs for tabled
#[derive(Tabled)]
struct DebtRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "RATE")]
    rate: String,
    #[tabled(rename = "PAYMENT")]
    payment: String,
    #[tabled(rename = "BALANCE")]
    balance: String,
}

#[derive(Tabled)]
struct PayoffRow {
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PAID OFF")]
    paid_off: String,
    #[tabled(rename = "INTEREST")]
    interest: String,
    #[tabled(rename = "TOTAL PAID")]
    total_paid: String,
}

/// Debts listed in the order the snowball pays them
pub fn debts_table(ids: &[String], debts: &[Debt], currency_symbol: &str) -> String {
    let rows: Vec<DebtRow> = snowball_order(debts)
        .into_iter()
        .enumerate()
        .map(|(position, idx)| {
            let debt = &debts[idx];
            DebtRow {
                position: position + 1,
                id: ids[idx].clone(),
                name: debt.name.clone(),
                rate: format_rate(debt.interest_rate),
                payment: format_money(debt.monthly_payment, currency_symbol),
                balance: format_money(debt.current_balance, currency_symbol),
            }
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}

fn month_cell(record: &MonthRecord, currency_symbol: &str) -> String {
    let mut lines = vec![
        format!("Pay: {}", format_money(record.payment, currency_symbol)),
        format!("Left: {}", format_money(record.remaining_balance, currency_symbol)),
        format!("Principal: {}", format_money(record.principal_paid, currency_symbol)),
        format!("Interest: {}", format_money(record.interest_paid, currency_symbol)),
    ];
    if record.rollover > 0.0 {
        lines.push(format!(
            "Rollover: {}",
            format_money(record.rollover, currency_symbol)
        ));
    }
    lines.join("\n")
}

/// One column per debt (snowball order), one row per month.
///
/// Months after a debt's payoff show "Snowballed"; `limit` caps the number of rows.
pub fn schedule_table(
    sim: &Simulation,
    labeler: &MonthLabeler,
    currency_symbol: &str,
    limit: Option<usize>,
) -> String {
    let debts: Vec<Debt> = sim.schedules.iter().map(|s| s.debt.clone()).collect();
    let order = snowball_order(&debts);

    let mut builder = Builder::default();

    let mut header = vec!["MONTH".to_string()];
    header.extend(order.iter().map(|&idx| {
        let debt = &debts[idx];
        format!(
            "{}\n{} @ {}/mo\n{}",
            debt.name,
            format_rate(debt.interest_rate),
            format_money(debt.monthly_payment, currency_symbol),
            format_money(debt.current_balance, currency_symbol)
        )
    }));
    builder.push_record(header);

    let months = sim.months_to_payoff();
    let shown = limit.map_or(months, |n| n.min(months));

    for month in 1..=shown {
        let mut row = vec![labeler.label(month)];
        row.extend(order.iter().map(|&idx| {
            let schedule = &sim.schedules[idx];
            if schedule.is_snowballed(month) {
                "Snowballed".to_string()
            } else {
                schedule
                    .record(month)
                    .map(|record| month_cell(record, currency_symbol))
                    .unwrap_or_default()
            }
        }));
        builder.push_record(row);
    }

    builder.build().with(Style::rounded()).to_string()
}

/// Per-debt payoff dates and totals
pub fn summary_table(summary: &PlanSummary, labeler: &MonthLabeler, currency_symbol: &str) -> String {
    let mut payoffs: Vec<_> = summary.debts.iter().collect();
    // Already-paid debts first, then by payoff month
    payoffs.sort_by_key(|d| d.payoff_month.unwrap_or(0));

    let rows: Vec<PayoffRow> = payoffs
        .into_iter()
        .map(|d| PayoffRow {
            name: d.name.clone(),
            paid_off: d
                .payoff_month
                .map(|m| labeler.label(m))
                .unwrap_or_else(|| "already paid".to_string()),
            interest: format_money(d.total_interest, currency_symbol),
            total_paid: format_money(d.total_paid, currency_symbol),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}
