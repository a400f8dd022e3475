//! Plain-text reports written to stdout.
//!
//! Each renderer returns the finished text so the CLI decides where it goes.

pub mod backtest;
pub mod planner;

pub use backtest::render_backtest_report;
pub use planner::render_plan_report;

/// Section heading underlined with `=`.
fn heading(title: &str, underline: usize) -> String {
    format!("\n{}\n{}\n", title, "=".repeat(underline))
}

/// Dollar amount with thousands separators, e.g. `$7,000.00`.
pub fn format_money(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let cents = format!("{:.2}", value.abs());
    let (whole, frac) = cents.split_once('.').unwrap_or((cents.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}${grouped}.{frac}")
}
