//! Order fills against the portfolio.
//!
//! Implements long entry sizing with commission, partial or full exits, and
//! exclusive-order handling. There is no short selling.

use chrono::NaiveDate;

use super::portfolio::Portfolio;
use super::position::{ClosedTrade, Position};

#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionConfig {
    /// Percent of traded value, charged on every fill.
    pub commission_pct: f64,
    /// A new entry first closes any open position.
    pub exclusive_orders: bool,
}

impl Default for ExecutionConfig {
    fn default() -> Self {
        ExecutionConfig {
            commission_pct: 0.2,
            exclusive_orders: true,
        }
    }
}

/// Commission: trade_value * pct / 100.
pub fn calculate_commission(trade_value: f64, config: &ExecutionConfig) -> f64 {
    trade_value * config.commission_pct / 100.0
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryResult {
    Entered {
        quantity: u64,
        execution_price: f64,
        cost: f64,
        commission: f64,
    },
    InsufficientCapital,
}

/// Buy whole shares with `size` (fraction of cash) at `price`.
///
/// Steps:
/// 1. With exclusive orders, close any open position at `price`
/// 2. Size so that cost plus commission fits in `cash * size`
/// 3. If quantity == 0, return InsufficientCapital
/// 4. Deduct cost + commission and open (or add to) the position
pub fn enter_long(
    portfolio: &mut Portfolio,
    price: f64,
    date: NaiveDate,
    size: f64,
    config: &ExecutionConfig,
) -> EntryResult {
    if config.exclusive_orders && portfolio.has_position() {
        close_position(portfolio, price, date, config);
    }

    if price <= 0.0 || size <= 0.0 {
        return EntryResult::InsufficientCapital;
    }

    let available_capital = portfolio.cash * size.min(1.0);
    let unit_cost = price * (1.0 + config.commission_pct / 100.0);
    let quantity = (available_capital / unit_cost).floor() as u64;

    if quantity == 0 {
        return EntryResult::InsufficientCapital;
    }

    let cost = quantity as f64 * price;
    let commission = calculate_commission(cost, config);
    let total_cost = cost + commission;

    if total_cost > portfolio.cash {
        return EntryResult::InsufficientCapital;
    }

    portfolio.cash -= total_cost;
    portfolio.commissions_paid += commission;

    match portfolio.position.as_mut() {
        Some(position) => position.add_fill(quantity, price, commission),
        None => {
            portfolio.position = Some(Position {
                quantity,
                entry_price: price,
                entry_date: date,
                entry_commission: commission,
            })
        }
    }

    EntryResult::Entered {
        quantity,
        execution_price: price,
        cost,
        commission,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExitResult {
    pub quantity: u64,
    pub exit_price: f64,
    pub exit_value: f64,
    pub exit_commission: f64,
    pub pnl: f64,
}

/// Sell `fraction` of the open position, rounded up to whole shares (at least one).
///
/// Entry commission is attributed to the closed trade pro rata by quantity.
/// Returns `None` when flat.
pub fn reduce_position(
    portfolio: &mut Portfolio,
    price: f64,
    date: NaiveDate,
    fraction: f64,
    config: &ExecutionConfig,
) -> Option<ExitResult> {
    let position = portfolio.position.as_mut()?;

    let held = position.quantity;
    let quantity = ((held as f64 * fraction.clamp(0.0, 1.0)).ceil() as u64).clamp(1, held);
    let entry_commission_share = position.entry_commission * quantity as f64 / held as f64;

    let exit_value = quantity as f64 * price;
    let exit_commission = calculate_commission(exit_value, config);
    let pnl = quantity as f64 * (price - position.entry_price)
        - entry_commission_share
        - exit_commission;

    let trade = ClosedTrade {
        quantity,
        entry_price: position.entry_price,
        exit_price: price,
        entry_date: position.entry_date,
        exit_date: date,
        pnl,
    };

    position.quantity -= quantity;
    position.entry_commission -= entry_commission_share;
    if position.quantity == 0 {
        portfolio.position = None;
    }

    portfolio.cash += exit_value - exit_commission;
    portfolio.commissions_paid += exit_commission;
    portfolio.record_trade(trade);

    Some(ExitResult {
        quantity,
        exit_price: price,
        exit_value,
        exit_commission,
        pnl,
    })
}

pub fn close_position(
    portfolio: &mut Portfolio,
    price: f64,
    date: NaiveDate,
    config: &ExecutionConfig,
) -> Option<ExitResult> {
    reduce_position(portfolio, price, date, 1.0, config)
}
