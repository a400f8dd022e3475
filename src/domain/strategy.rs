//! Strategy interface and the moving-average crossover strategy.
//!
//! A strategy sees the whole bar series once in [`Strategy::init`] (to
//! precompute indicators) and is then asked for at most one signal per bar.

use std::fmt;

use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator::{crossed_above, crossed_below, IndicatorSeries};
use crate::domain::ohlcv::OhlcvBar;

/// An order request produced on a bar's close.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    /// Buy with `size` as a fraction of available cash.
    Buy { size: f64 },
    /// Sell `size` as a fraction of the open position.
    Sell { size: f64 },
}

/// What a strategy can see on each bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrategyContext {
    pub index: usize,
    /// Shares held at this bar's close.
    pub position_quantity: u64,
}

pub trait Strategy {
    fn name(&self) -> String;

    /// Bars needed before the first signal can fire.
    fn warmup(&self) -> usize;

    fn init(&mut self, bars: &[OhlcvBar]);

    fn on_bar(&mut self, ctx: &StrategyContext) -> Option<Signal>;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverParams {
    pub fast_period: usize,
    pub slow_period: usize,
    pub entry_size: f64,
    pub exit_size: f64,
}

impl Default for CrossoverParams {
    fn default() -> Self {
        CrossoverParams {
            fast_period: 10,
            slow_period: 20,
            entry_size: 1.0,
            exit_size: 1.0,
        }
    }
}

/// Exit sizing for a crossover run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrossoverVariant {
    /// Sell the whole position on the bearish cross.
    Full,
    /// Sell half of the position on the bearish cross.
    Half,
    /// Keep the `exit_size` from `[strategy]`.
    Configured,
}

impl CrossoverVariant {
    /// The two shipped variants compared by default.
    pub const ALL: [CrossoverVariant; 2] = [CrossoverVariant::Full, CrossoverVariant::Half];

    /// Fixed exit size, or `None` when it comes from the base params.
    pub fn exit_size(self) -> Option<f64> {
        match self {
            CrossoverVariant::Full => Some(1.0),
            CrossoverVariant::Half => Some(0.5),
            CrossoverVariant::Configured => None,
        }
    }

    pub fn params(self, base: CrossoverParams) -> CrossoverParams {
        CrossoverParams {
            exit_size: self.exit_size().unwrap_or(base.exit_size),
            ..base
        }
    }
}

impl fmt::Display for CrossoverVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverVariant::Full => write!(f, "full"),
            CrossoverVariant::Half => write!(f, "half"),
            CrossoverVariant::Configured => write!(f, "configured"),
        }
    }
}

/// Buy when the fast SMA crosses above the slow SMA, sell when it crosses below.
#[derive(Debug, Clone)]
pub struct SmaCrossover {
    pub params: CrossoverParams,
    fast: Option<IndicatorSeries>,
    slow: Option<IndicatorSeries>,
}

impl SmaCrossover {
    pub fn new(params: CrossoverParams) -> Self {
        SmaCrossover {
            params,
            fast: None,
            slow: None,
        }
    }
}

impl Strategy for SmaCrossover {
    fn name(&self) -> String {
        format!(
            "SMA({}/{}) crossover, exit {:.0}%",
            self.params.fast_period,
            self.params.slow_period,
            self.params.exit_size * 100.0
        )
    }

    fn warmup(&self) -> usize {
        self.params.fast_period.max(self.params.slow_period) + 1
    }

    fn init(&mut self, bars: &[OhlcvBar]) {
        self.fast = Some(calculate_sma(bars, self.params.fast_period));
        self.slow = Some(calculate_sma(bars, self.params.slow_period));
    }

    fn on_bar(&mut self, ctx: &StrategyContext) -> Option<Signal> {
        let (fast, slow) = (self.fast.as_ref()?, self.slow.as_ref()?);

        if crossed_above(fast, slow, ctx.index) {
            Some(Signal::Buy {
                size: self.params.entry_size,
            })
        } else if ctx.position_quantity > 0 && crossed_below(fast, slow, ctx.index) {
            Some(Signal::Sell {
                size: self.params.exit_size,
            })
        } else {
            None
        }
    }
}
