//! Backtest summary statistics.
//!
//! Percent-valued fields are in percent units (12.5 means 12.5%).

use chrono::NaiveDate;

use super::backtest::BacktestResult;
use super::portfolio::EquityPoint;

const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestStats {
    pub strategy_name: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub duration_days: i64,
    pub exposure_time_pct: f64,
    pub equity_final: f64,
    pub equity_peak: f64,
    pub return_pct: f64,
    pub buy_and_hold_return_pct: f64,
    pub return_ann_pct: f64,
    pub volatility_ann_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub max_drawdown_duration: i64,
    pub trades: usize,
    pub win_rate_pct: f64,
    pub best_trade_pct: f64,
    pub worst_trade_pct: f64,
    pub avg_trade_pct: f64,
    pub commissions: f64,
}

impl BacktestStats {
    pub fn compute(result: &BacktestResult) -> Self {
        let portfolio = &result.portfolio;
        let equity_curve = &portfolio.equity_curve;
        let initial = portfolio.initial_capital;

        let start = result.bars.first().map(|b| b.date).unwrap_or_default();
        let end = result.bars.last().map(|b| b.date).unwrap_or_default();

        let equity_final = equity_curve.last().map_or(initial, |p| p.equity);
        let equity_peak = equity_curve
            .iter()
            .map(|p| p.equity)
            .fold(initial, f64::max);

        let total_return = if initial > 0.0 {
            (equity_final - initial) / initial
        } else {
            0.0
        };

        let bars = equity_curve.len() as f64;
        let years = bars / TRADING_DAYS_PER_YEAR;
        let annualized_return = if years > 0.0 && total_return > -1.0 {
            (1.0 + total_return).powf(1.0 / years) - 1.0
        } else {
            0.0
        };

        let volatility = annualized_volatility(equity_curve);
        let sharpe_ratio = if volatility > 0.0 {
            annualized_return / volatility
        } else {
            0.0
        };

        let (max_drawdown, max_drawdown_duration) = compute_drawdown(equity_curve);

        let buy_and_hold = match (result.bars.first(), result.bars.last()) {
            (Some(first), Some(last)) if first.close > 0.0 => {
                (last.close - first.close) / first.close
            }
            _ => 0.0,
        };

        let exposure_time_pct = if result.bars.is_empty() {
            0.0
        } else {
            result.exposure_bars as f64 / result.bars.len() as f64 * 100.0
        };

        let trade_returns: Vec<f64> = portfolio
            .closed_trades
            .iter()
            .map(|t| t.return_pct())
            .collect();
        let trades = trade_returns.len();
        let wins = portfolio.closed_trades.iter().filter(|t| t.pnl > 0.0).count();

        let (win_rate_pct, best_trade_pct, worst_trade_pct, avg_trade_pct) = if trades > 0 {
            (
                wins as f64 / trades as f64 * 100.0,
                trade_returns.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                trade_returns.iter().copied().fold(f64::INFINITY, f64::min),
                trade_returns.iter().sum::<f64>() / trades as f64,
            )
        } else {
            (0.0, 0.0, 0.0, 0.0)
        };

        BacktestStats {
            strategy_name: result.strategy_name.clone(),
            start,
            end,
            duration_days: (end - start).num_days(),
            exposure_time_pct,
            equity_final,
            equity_peak,
            return_pct: total_return * 100.0,
            buy_and_hold_return_pct: buy_and_hold * 100.0,
            return_ann_pct: annualized_return * 100.0,
            volatility_ann_pct: volatility * 100.0,
            sharpe_ratio,
            max_drawdown_pct: max_drawdown * 100.0,
            max_drawdown_duration,
            trades,
            win_rate_pct,
            best_trade_pct,
            worst_trade_pct,
            avg_trade_pct,
            commissions: portfolio.commissions_paid,
        }
    }
}

fn annualized_volatility(equity_curve: &[EquityPoint]) -> f64 {
    if equity_curve.len() < 2 {
        return 0.0;
    }

    let returns: Vec<f64> = equity_curve
        .windows(2)
        .map(|w| {
            let prev = w[0].equity;
            if prev > 0.0 {
                (w[1].equity - prev) / prev
            } else {
                0.0
            }
        })
        .collect();

    let n = returns.len() as f64;
    let mean: f64 = returns.iter().sum::<f64>() / n;
    let variance: f64 = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;

    variance.sqrt() * TRADING_DAYS_PER_YEAR.sqrt()
}

/// Max drawdown as a fraction, and the longest run of bars spent below a peak.
fn compute_drawdown(equity_curve: &[EquityPoint]) -> (f64, i64) {
    let Some(first) = equity_curve.first() else {
        return (0.0, 0);
    };

    let mut peak = first.equity;
    let mut max_dd = 0.0_f64;
    let mut max_dd_duration = 0i64;
    let mut current_dd_duration = 0i64;

    for point in equity_curve {
        if point.equity >= peak {
            peak = point.equity;
            current_dd_duration = 0;
        } else if peak > 0.0 {
            let dd = (peak - point.equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
            current_dd_duration += 1;
            if current_dd_duration > max_dd_duration {
                max_dd_duration = current_dd_duration;
            }
        }
    }

    (max_dd, max_dd_duration)
}
