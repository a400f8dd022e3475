//! Contribution plan report.

use crate::domain::advice::dca_tips;
use crate::domain::plan::Plan;

use super::{format_money, heading};

const FUND_NAME_WIDTH: usize = 24;

pub fn render_plan_report(plan: &Plan) -> String {
    let mut out = String::new();
    out.push_str(&render_analysis(plan));
    out.push_str(&render_schedule(plan));
    out.push_str(&render_allocation(plan));
    out.push_str(&render_tips());
    out.push_str(&render_suggestions(plan));
    out.push_str(&render_purchase_plan(plan));
    out
}

fn render_analysis(plan: &Plan) -> String {
    let mut out = heading(&format!("ANALYSIS FOR {}", plan.input.tax_year()), 30);
    out.push_str(&format!(
        "Annual Roth IRA limit: {}\n",
        format_money(plan.annual_limit)
    ));
    out.push_str(&format!(
        "Months remaining in tax year: {}\n",
        plan.months_remaining
    ));
    out.push_str(&format!(
        "Monthly amount needed to max out: {}\n",
        format_money(plan.max_monthly)
    ));
    out
}

fn render_schedule(plan: &Plan) -> String {
    let mut out = heading("CONTRIBUTION SCHEDULE", 25);
    out.push_str(&format!("{:<15} {:<10} {:<12}\n", "Month", "Amount", "Cumulative"));
    out.push_str(&format!("{}\n", "-".repeat(40)));

    if plan.schedule.is_empty() {
        out.push_str("No contributions scheduled.\n");
    }
    for entry in &plan.schedule.entries {
        out.push_str(&format!(
            "{:<15} {:<10} {:<12}\n",
            entry.label(),
            format_money(entry.amount),
            format_money(entry.cumulative)
        ));
    }

    out.push_str(&format!(
        "\nTotal for {}: {}\n",
        plan.input.tax_year(),
        format_money(plan.schedule.total_contributed)
    ));
    let shortfall = plan.shortfall();
    if shortfall > 0.0 {
        out.push_str(&format!(
            "Warning: you'll contribute {} less than the maximum limit\n",
            format_money(shortfall)
        ));
    }
    out
}

fn render_allocation(plan: &Plan) -> String {
    let allocation = &plan.allocation;
    let monthly = plan.input.monthly_contribution;

    let mut out = heading(
        &format!("FIDELITY PORTFOLIO ALLOCATION (Age {})", allocation.age),
        45,
    );
    out.push_str(&format!(
        "{:<8} {:<25} {:<18} {:>4} {:>9}   {}\n",
        "Ticker", "Fund Name", "Type", "%", "$/Month", "Exp Ratio"
    ));
    out.push_str(&format!("{}\n", "-".repeat(75)));

    for fund in &allocation.funds {
        let name: String = fund.fund.name.chars().take(FUND_NAME_WIDTH).collect();
        out.push_str(&format!(
            "{:<8} {:<25} {:<18} {:>3}% {:>9.2}   {:.3}%\n",
            fund.fund.ticker,
            name,
            fund.fund.asset_type,
            fund.percentage,
            fund.monthly_amount,
            fund.fund.expense_ratio_pct()
        ));
    }
    out.push_str(&format!("{}\n", "-".repeat(75)));

    out.push_str("Portfolio Summary:\n");
    out.push_str(&format!("  - Total Funds: {}\n", allocation.total_funds()));
    out.push_str(&format!(
        "  - Stock Allocation: {}%\n",
        allocation.stock_percentage
    ));
    out.push_str(&format!("  - Bond Allocation: {}%\n", allocation.bond_percentage));
    out.push_str(&format!(
        "  - Weighted Average Expense Ratio: {:.3}%\n",
        allocation.weighted_expense_ratio_pct()
    ));
    out.push_str(&format!(
        "  - Annual Expense on {}: {}\n",
        format_money(monthly * 12.0),
        format_money(allocation.annual_expense(monthly))
    ));
    out
}

fn render_tips() -> String {
    let mut out = heading("DOLLAR COST AVERAGING TIPS", 30);
    for (i, tip) in dca_tips().iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, tip));
    }
    out
}

fn render_suggestions(plan: &Plan) -> String {
    let mut out = heading("OPTIMIZATION SUGGESTIONS", 28);
    for suggestion in &plan.suggestions {
        out.push_str(&format!("- {suggestion}\n"));
    }
    out
}

fn render_purchase_plan(plan: &Plan) -> String {
    let mut out = heading("MONTHLY PURCHASE PLAN", 25);
    let purchases = plan.purchase_plan();
    if purchases.is_empty() {
        out.push_str("No fund receives at least $1.00 per month.\n");
        return out;
    }
    out.push_str("Set up automatic investments in Fidelity for:\n");
    for purchase in purchases {
        out.push_str(&format!(
            "  - {}: {} on the same day each month\n",
            purchase.ticker,
            format_money(purchase.monthly_amount)
        ));
    }
    out
}
