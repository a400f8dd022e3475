//! Technical indicators over daily bars.
//!
//! - `IndicatorPoint`: one value in a series, flagged invalid during warmup
//! - `IndicatorSeries`: a named series aligned one-to-one with the input bars
//! - `crossed_above` / `crossed_below`: two-series crossover tests

pub mod sma;

use chrono::NaiveDate;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub valid: bool,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
        }
    }
}

#[derive(Debug, Clone)]
pub struct IndicatorSeries {
    pub indicator_type: IndicatorType,
    pub values: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values
            .get(index)
            .filter(|p| p.valid)
            .map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// `left` was strictly below `right` on bar `index - 1` and is strictly above on `index`.
///
/// False at index 0 and whenever any of the four values is still warming up.
pub fn crossed_above(left: &IndicatorSeries, right: &IndicatorSeries, index: usize) -> bool {
    if index == 0 {
        return false;
    }
    match (
        left.value_at(index),
        right.value_at(index),
        left.value_at(index - 1),
        right.value_at(index - 1),
    ) {
        (Some(l), Some(r), Some(lp), Some(rp)) => l > r && lp < rp,
        _ => false,
    }
}

pub fn crossed_below(left: &IndicatorSeries, right: &IndicatorSeries, index: usize) -> bool {
    crossed_above(right, left, index)
}
