//! Daily OHLCV bars and date-window helpers.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub struct OhlcvBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Bars with `start <= date < end`. Either bound may be open.
pub fn filter_window(
    bars: &[OhlcvBar],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<OhlcvBar> {
    bars.iter()
        .filter(|b| start.is_none_or(|s| b.date >= s))
        .filter(|b| end.is_none_or(|e| b.date < e))
        .cloned()
        .collect()
}

/// Sort ascending by date and keep the last bar seen for each date.
pub fn normalize(mut bars: Vec<OhlcvBar>) -> Vec<OhlcvBar> {
    bars.sort_by_key(|b| b.date);
    let mut out: Vec<OhlcvBar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match out.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => out.push(bar),
        }
    }
    out
}

pub fn closes(bars: &[OhlcvBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}
