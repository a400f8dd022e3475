//! Dollar-cost-averaging tips and plan-specific suggestions.

use super::allocation::PortfolioAllocation;
use super::fund_catalog;

const DCA_TIPS: [&str; 5] = [
    "Contribute on the same day each month (e.g., 1st or 15th)",
    "Set up automatic transfers to ensure consistency",
    "Don't try to time the market - stick to your schedule",
    "Consider splitting large amounts across multiple days in the month",
    "If you get a lump sum, consider spreading it over 3-6 months",
];

/// Funds below this monthly amount are left out of the purchase plan.
pub const MIN_PURCHASE_AMOUNT: f64 = 1.0;

pub fn dca_tips() -> &'static [&'static str] {
    &DCA_TIPS
}

#[derive(Debug, Clone, PartialEq)]
pub enum Suggestion {
    IncreaseMonthly { target: f64, tax_year: i32 },
    CatchUpContribution { shortfall: f64, deadline_year: i32 },
    RebalanceQuarterly,
    NoMinimums,
    CoreHolding { ticker: &'static str, expense_ratio_pct: f64 },
    AutomaticInvesting,
    PortfolioCost { weighted_expense_ratio_pct: f64 },
}

impl std::fmt::Display for Suggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Suggestion::IncreaseMonthly { target, tax_year } => write!(
                f,
                "Consider increasing to ${:.2}/month to maximize your {} contribution",
                target, tax_year
            ),
            Suggestion::CatchUpContribution {
                shortfall,
                deadline_year,
            } => write!(
                f,
                "Make a catch-up contribution of ${:.2} before April 15, {}",
                shortfall, deadline_year
            ),
            Suggestion::RebalanceQuarterly => {
                write!(f, "Review and rebalance your portfolio quarterly")
            }
            Suggestion::NoMinimums => write!(
                f,
                "Fidelity offers $0 minimum investments and no transaction fees for these funds"
            ),
            Suggestion::CoreHolding {
                ticker,
                expense_ratio_pct,
            } => write!(
                f,
                "Consider {} ({:.2}% expense ratio) as your core holding",
                ticker, expense_ratio_pct
            ),
            Suggestion::AutomaticInvesting => write!(
                f,
                "Set up automatic investing for consistent dollar-cost averaging"
            ),
            Suggestion::PortfolioCost {
                weighted_expense_ratio_pct,
            } => write!(
                f,
                "Annual portfolio cost is very low at {:.3}% expense ratio",
                weighted_expense_ratio_pct
            ),
        }
    }
}

/// Inputs the suggestions depend on, pulled from a built plan.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionInputs<'a> {
    pub tax_year: i32,
    pub monthly_contribution: f64,
    pub max_monthly: f64,
    pub annual_limit: f64,
    pub total_contributed: f64,
    pub allocation: &'a PortfolioAllocation,
}

pub fn optimization_suggestions(inputs: &SuggestionInputs<'_>) -> Vec<Suggestion> {
    let mut suggestions = Vec::new();

    if inputs.monthly_contribution < inputs.max_monthly {
        suggestions.push(Suggestion::IncreaseMonthly {
            target: inputs.max_monthly,
            tax_year: inputs.tax_year,
        });
    }
    if inputs.total_contributed < inputs.annual_limit {
        suggestions.push(Suggestion::CatchUpContribution {
            shortfall: inputs.annual_limit - inputs.total_contributed,
            deadline_year: inputs.tax_year + 1,
        });
    }

    let core = fund_catalog::lowest_cost_fund();
    suggestions.extend([
        Suggestion::RebalanceQuarterly,
        Suggestion::NoMinimums,
        Suggestion::CoreHolding {
            ticker: core.ticker,
            expense_ratio_pct: core.expense_ratio_pct(),
        },
        Suggestion::AutomaticInvesting,
        Suggestion::PortfolioCost {
            weighted_expense_ratio_pct: inputs.allocation.weighted_expense_ratio_pct(),
        },
    ]);

    suggestions
}

#[derive(Debug, Clone, PartialEq)]
pub struct Purchase {
    pub ticker: &'static str,
    pub monthly_amount: f64,
}

pub fn purchase_plan(allocation: &PortfolioAllocation) -> Vec<Purchase> {
    allocation
        .funds
        .iter()
        .filter(|f| f.monthly_amount >= MIN_PURCHASE_AMOUNT)
        .map(|f| Purchase {
            ticker: f.fund.ticker,
            monthly_amount: f.monthly_amount,
        })
        .collect()
}
