//! Open long position and closed trade records.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub quantity: u64,
    pub entry_price: f64,
    pub entry_date: NaiveDate,
    /// Commission paid on entry not yet attributed to a closed trade.
    pub entry_commission: f64,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        self.quantity as f64 * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.quantity as f64 * (price - self.entry_price)
    }

    /// Fold an additional fill into this position at a volume-weighted entry price.
    pub fn add_fill(&mut self, quantity: u64, price: f64, commission: f64) {
        let total = self.quantity + quantity;
        if total == 0 {
            return;
        }
        self.entry_price = (self.entry_price * self.quantity as f64 + price * quantity as f64)
            / total as f64;
        self.quantity = total;
        self.entry_commission += commission;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClosedTrade {
    pub quantity: u64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
    /// Net of entry and exit commissions.
    pub pnl: f64,
}

impl ClosedTrade {
    /// Net return on the capital committed to this trade.
    pub fn return_pct(&self) -> f64 {
        let basis = self.quantity as f64 * self.entry_price;
        if basis > 0.0 {
            self.pnl / basis * 100.0
        } else {
            0.0
        }
    }

    pub fn duration_days(&self) -> i64 {
        (self.exit_date - self.entry_date).num_days()
    }
}
