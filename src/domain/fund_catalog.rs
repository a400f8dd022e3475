//! Static fund catalog.
//!
//! Expense ratios are fractions of 1: `0.00084` is 8.4 basis points, shown
//! to users as `0.084%`.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fund {
    pub ticker: &'static str,
    pub name: &'static str,
    pub asset_type: &'static str,
    pub expense_ratio: f64,
}

impl Fund {
    /// Expense ratio as a percentage, e.g. `0.015` for FXAIX.
    pub fn expense_ratio_pct(&self) -> f64 {
        self.expense_ratio * 100.0
    }
}

pub const FXAIX: Fund = Fund {
    ticker: "FXAIX",
    name: "S&P 500 Index",
    asset_type: "Large Cap US",
    expense_ratio: 0.00015,
};

pub const FZROX: Fund = Fund {
    ticker: "FZROX",
    name: "Total Stock Market",
    asset_type: "Total US Market",
    expense_ratio: 0.0,
};

pub const FSMDX: Fund = Fund {
    ticker: "FSMDX",
    name: "Small Cap Index",
    asset_type: "Small Cap US",
    expense_ratio: 0.00025,
};

pub const FTIHX: Fund = Fund {
    ticker: "FTIHX",
    name: "Total International Index",
    asset_type: "Ex-US Developed",
    expense_ratio: 0.0006,
};

pub const FREL: Fund = Fund {
    ticker: "FREL",
    name: "Real Estate ETF",
    asset_type: "REITs",
    expense_ratio: 0.00084,
};

pub const IAU: Fund = Fund {
    ticker: "IAU",
    name: "Gold Trust",
    asset_type: "Commodities/Gold",
    expense_ratio: 0.0025,
};

pub const FXNAX: Fund = Fund {
    ticker: "FXNAX",
    name: "US Bond Index",
    asset_type: "Bonds",
    expense_ratio: 0.00025,
};

pub const FCOM: Fund = Fund {
    ticker: "FCOM",
    name: "Communication Services",
    asset_type: "Sector",
    expense_ratio: 0.00084,
};

/// Every catalogued fund, one entry per ticker.
pub static CATALOG: [Fund; 8] = [FXAIX, FZROX, FSMDX, FTIHX, FREL, IAU, FXNAX, FCOM];

/// The cheapest fund in the catalog, used as the suggested core holding.
pub fn lowest_cost_fund() -> &'static Fund {
    CATALOG
        .iter()
        .min_by(|a, b| a.expense_ratio.total_cmp(&b.expense_ratio))
        .unwrap_or(&CATALOG[0])
}
