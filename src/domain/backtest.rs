//! Backtest engine and event loop.
//!
//! Each bar is processed in two steps:
//! 1. A signal raised on the previous bar's close is filled at this bar's open
//! 2. Equity is marked at this bar's close, then the strategy is asked for a signal
//!
//! A signal raised on the final bar is never filled. An open position at the
//! end of the run stays open and counts toward final equity at the last close.

use chrono::NaiveDate;
use tracing::debug;

use super::error::RothkitError;
use super::execution::{self, ExecutionConfig};
use super::metrics::BacktestStats;
use super::ohlcv::{self, OhlcvBar};
use super::portfolio::Portfolio;
use super::strategy::{
    CrossoverParams, CrossoverVariant, Signal, SmaCrossover, Strategy, StrategyContext,
};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    pub start_date: Option<NaiveDate>,
    /// Exclusive.
    pub end_date: Option<NaiveDate>,
    pub initial_cash: f64,
    pub commission_pct: f64,
    pub exclusive_orders: bool,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            start_date: None,
            end_date: None,
            initial_cash: 10_000.0,
            commission_pct: 0.2,
            exclusive_orders: true,
        }
    }
}

impl BacktestConfig {
    pub fn execution(&self) -> ExecutionConfig {
        ExecutionConfig {
            commission_pct: self.commission_pct,
            exclusive_orders: self.exclusive_orders,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BacktestResult {
    pub strategy_name: String,
    pub bars: Vec<OhlcvBar>,
    pub portfolio: Portfolio,
    /// Bars on which a position was held at the close.
    pub exposure_bars: usize,
}

impl BacktestResult {
    pub fn stats(&self) -> BacktestStats {
        BacktestStats::compute(self)
    }
}

/// Filter `bars` to the configured window and run `strategy` over it.
pub fn run(
    code: &str,
    bars: &[OhlcvBar],
    strategy: &mut dyn Strategy,
    config: &BacktestConfig,
) -> Result<BacktestResult, RothkitError> {
    let window = ohlcv::filter_window(bars, config.start_date, config.end_date);
    if window.is_empty() {
        return Err(RothkitError::NoData {
            code: code.to_string(),
        });
    }
    let minimum = strategy.warmup();
    if window.len() < minimum {
        return Err(RothkitError::InsufficientData {
            code: code.to_string(),
            bars: window.len(),
            minimum,
        });
    }
    Ok(run_backtest(window, strategy, config))
}

pub fn run_backtest(
    bars: Vec<OhlcvBar>,
    strategy: &mut dyn Strategy,
    config: &BacktestConfig,
) -> BacktestResult {
    let exec = config.execution();
    let mut portfolio = Portfolio::new(config.initial_cash);
    let mut pending: Option<Signal> = None;
    let mut exposure_bars = 0usize;

    strategy.init(&bars);

    for (index, bar) in bars.iter().enumerate() {
        if let Some(signal) = pending.take() {
            apply_signal(&mut portfolio, signal, bar, &exec);
        }

        if portfolio.has_position() {
            exposure_bars += 1;
        }
        let equity = portfolio.total_equity(bar.close);
        portfolio.record_equity(bar.date, equity);

        let ctx = StrategyContext {
            index,
            position_quantity: portfolio.position_quantity(),
        };
        pending = strategy.on_bar(&ctx);
    }

    BacktestResult {
        strategy_name: strategy.name(),
        bars,
        portfolio,
        exposure_bars,
    }
}

/// Run each crossover variant over the same bars and window.
pub fn compare_crossover_variants(
    code: &str,
    bars: &[OhlcvBar],
    base: CrossoverParams,
    variants: &[CrossoverVariant],
    config: &BacktestConfig,
) -> Result<Vec<(CrossoverVariant, BacktestStats)>, RothkitError> {
    variants
        .iter()
        .map(|&variant| {
            let mut strategy = SmaCrossover::new(variant.params(base));
            let result = run(code, bars, &mut strategy, config)?;
            Ok((variant, result.stats()))
        })
        .collect()
}

fn apply_signal(portfolio: &mut Portfolio, signal: Signal, bar: &OhlcvBar, exec: &ExecutionConfig) {
    match signal {
        Signal::Buy { size } => {
            let result = execution::enter_long(portfolio, bar.open, bar.date, size, exec);
            debug!(date = %bar.date, price = bar.open, ?result, "buy");
        }
        Signal::Sell { size } => {
            let result = execution::reduce_position(portfolio, bar.open, bar.date, size, exec);
            debug!(date = %bar.date, price = bar.open, ?result, "sell");
        }
    }
}
