#![allow(dead_code)]

use chrono::NaiveDate;
use rothkit::domain::backtest::BacktestConfig;
use rothkit::domain::error::RothkitError;
pub use rothkit::domain::ohlcv::OhlcvBar;
use rothkit::ports::price_history_port::PriceHistoryPort;
use rothkit::ports::prompt_port::PromptPort;
use std::collections::{HashMap, VecDeque};

pub struct MockPriceHistory {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockPriceHistory {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, code: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(code.to_string(), bars);
        self
    }

    pub fn with_error(mut self, code: &str, reason: &str) -> Self {
        self.errors.insert(code.to_string(), reason.to_string());
        self
    }
}

impl PriceHistoryPort for MockPriceHistory {
    fn fetch(
        &self,
        ticker: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, RothkitError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(RothkitError::Data {
                reason: reason.clone(),
            });
        }
        let bars = self.data.get(ticker).cloned().unwrap_or_default();
        Ok(rothkit::domain::ohlcv::filter_window(&bars, start, end))
    }
}

/// Answers prompts from a script, then reports end of input.
pub struct ScriptedPrompt {
    pub answers: VecDeque<String>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

impl PromptPort for ScriptedPrompt {
    fn prompt(&mut self, label: &str) -> Result<Option<String>, RothkitError> {
        self.asked.push(label.to_string());
        Ok(self.answers.pop_front())
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_bar(date: NaiveDate, open: f64, close: f64) -> OhlcvBar {
    OhlcvBar {
        date,
        open,
        high: open.max(close) + 1.0,
        low: open.min(close) - 1.0,
        close,
        volume: 1000,
    }
}

/// Consecutive daily bars whose open equals the previous close.
pub fn bars_from_closes(start: NaiveDate, closes: &[f64]) -> Vec<OhlcvBar> {
    let mut prev = closes.first().copied().unwrap_or(100.0);
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let bar = make_bar(start + chrono::Duration::days(i as i64), prev, close);
            prev = close;
            bar
        })
        .collect()
}

/// A slowly rising wave that produces several SMA(10/20) crossovers.
pub fn wave_closes(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + 0.05 * i as f64 + 10.0 * (i as f64 / 8.0).sin())
        .collect()
}

pub fn wave_bars(n: usize) -> Vec<OhlcvBar> {
    bars_from_closes(date(2023, 1, 2), &wave_closes(n))
}

pub fn bars_to_csv(bars: &[OhlcvBar]) -> String {
    let mut out = String::from("date,open,high,low,close,volume\n");
    for b in bars {
        out.push_str(&format!(
            "{},{},{},{},{},{}\n",
            b.date, b.open, b.high, b.low, b.close, b.volume
        ));
    }
    out
}

pub fn sample_config() -> BacktestConfig {
    BacktestConfig {
        start_date: None,
        end_date: None,
        initial_cash: 10_000.0,
        commission_pct: 0.0,
        exclusive_orders: true,
    }
}
