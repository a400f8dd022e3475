//! Backtest statistics report and variant comparison.

use crate::domain::metrics::BacktestStats;
use crate::domain::strategy::CrossoverVariant;

use super::{format_money, heading};

const LABEL_WIDTH: usize = 26;

pub fn render_backtest_report(ticker: &str, results: &[(CrossoverVariant, BacktestStats)]) -> String {
    let mut out = String::new();
    for (variant, stats) in results {
        out.push_str(&heading(
            &format!("{} - {} exit", ticker.to_uppercase(), variant),
            40,
        ));
        out.push_str(&render_stats(stats));
    }
    if !results.is_empty() {
        out.push_str(&render_comparison(results));
    }
    out
}

pub fn render_stats(stats: &BacktestStats) -> String {
    let rows: Vec<(&str, String)> = vec![
        ("Strategy", stats.strategy_name.clone()),
        ("Start", stats.start.to_string()),
        ("End", stats.end.to_string()),
        ("Duration", format!("{} days", stats.duration_days)),
        ("Exposure Time [%]", format!("{:.2}", stats.exposure_time_pct)),
        ("Equity Final [$]", format_money(stats.equity_final)),
        ("Equity Peak [$]", format_money(stats.equity_peak)),
        ("Return [%]", format!("{:.2}", stats.return_pct)),
        ("Buy & Hold Return [%]", format!("{:.2}", stats.buy_and_hold_return_pct)),
        ("Return (Ann.) [%]", format!("{:.2}", stats.return_ann_pct)),
        ("Volatility (Ann.) [%]", format!("{:.2}", stats.volatility_ann_pct)),
        ("Sharpe Ratio", format!("{:.2}", stats.sharpe_ratio)),
        ("Max. Drawdown [%]", format!("{:.2}", -stats.max_drawdown_pct)),
        (
            "Max. Drawdown Duration",
            format!("{} bars", stats.max_drawdown_duration),
        ),
        ("# Trades", stats.trades.to_string()),
        ("Win Rate [%]", optional_pct(stats.trades, stats.win_rate_pct)),
        ("Best Trade [%]", optional_pct(stats.trades, stats.best_trade_pct)),
        ("Worst Trade [%]", optional_pct(stats.trades, stats.worst_trade_pct)),
        ("Avg. Trade [%]", optional_pct(stats.trades, stats.avg_trade_pct)),
        ("Commissions [$]", format_money(stats.commissions)),
    ];

    rows.iter()
        .map(|(label, value)| format!("{label:<LABEL_WIDTH$}{value}\n"))
        .collect()
}

fn optional_pct(trades: usize, value: f64) -> String {
    if trades == 0 {
        "n/a".to_string()
    } else {
        format!("{value:.2}")
    }
}

fn render_comparison(results: &[(CrossoverVariant, BacktestStats)]) -> String {
    let mut out = heading("ANNUALIZED RETURN COMPARISON", 40);
    for (variant, stats) in results {
        out.push_str(&format!(
            "{:<LABEL_WIDTH$}{:.2}%\n",
            format!("SMA {variant} exit:"),
            stats.return_ann_pct
        ));
    }
    if let Some((_, first)) = results.first() {
        out.push_str(&format!(
            "{:<LABEL_WIDTH$}{:.2}%\n",
            "Buy/Hold Return:", first.buy_and_hold_return_pct
        ));
    }
    out
}
