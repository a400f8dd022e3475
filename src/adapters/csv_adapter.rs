//! CSV price history adapter.
//!
//! Reads `<base>/<TICKER>.csv` with a `date,open,high,low,close,volume`
//! header. Capitalized headers (as exported by most charting sites) are
//! accepted and extra columns are ignored.

use std::fs::File;
use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::debug;

use crate::domain::error::RothkitError;
use crate::domain::ohlcv::{self, OhlcvBar};
use crate::ports::price_history_port::PriceHistoryPort;

#[derive(Debug, Deserialize)]
struct PriceRow {
    #[serde(alias = "Date")]
    date: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
}

impl PriceRow {
    fn into_bar(self) -> Result<OhlcvBar, RothkitError> {
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|e| {
            RothkitError::Data {
                reason: format!("invalid date {:?}: {}", self.date, e),
            }
        })?;
        Ok(OhlcvBar {
            date,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume.max(0.0).round() as u64,
        })
    }
}

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{ticker}.csv"))
    }
}

impl PriceHistoryPort for CsvAdapter {
    fn fetch(
        &self,
        ticker: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, RothkitError> {
        let path = self.csv_path(ticker);
        let file = File::open(&path).map_err(|e| RothkitError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(file);
        let mut bars = Vec::new();
        for (line, row) in rdr.deserialize::<PriceRow>().enumerate() {
            let row = row.map_err(|e| RothkitError::Data {
                reason: format!("{} row {}: {}", path.display(), line + 1, e),
            })?;
            bars.push(row.into_bar()?);
        }

        let total = bars.len();
        let bars = ohlcv::filter_window(&ohlcv::normalize(bars), start, end);
        debug!(ticker, rows = total, bars = bars.len(), "loaded price history");
        Ok(bars)
    }
}
