//! Daily price history port.

use chrono::NaiveDate;

use crate::domain::error::RothkitError;
use crate::domain::ohlcv::OhlcvBar;

pub trait PriceHistoryPort {
    /// Bars for `ticker` in `[start, end)`, ascending by date with one bar
    /// per date. Either bound may be open.
    fn fetch(
        &self,
        ticker: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Vec<OhlcvBar>, RothkitError>;
}
