//! Configuration access port trait.
//!
//! Numeric getters fall back to `default` when the key is missing or does
//! not parse; callers that need to tell the two apart validate first.

use chrono::NaiveDate;

use crate::domain::error::RothkitError;

pub trait ConfigPort {
    fn get_string(&self, section: &str, key: &str) -> Option<String>;
    fn get_int(&self, section: &str, key: &str, default: i64) -> i64;
    fn get_double(&self, section: &str, key: &str, default: f64) -> f64;
    fn get_bool(&self, section: &str, key: &str, default: bool) -> bool;

    /// Optional `YYYY-MM-DD` date. Blank values count as absent.
    fn get_date(&self, section: &str, key: &str) -> Result<Option<NaiveDate>, RothkitError> {
        match self.get_string(section, key) {
            None => Ok(None),
            Some(s) if s.trim().is_empty() => Ok(None),
            Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(Some)
                .map_err(|_| RothkitError::ConfigInvalid {
                    section: section.to_string(),
                    key: key.to_string(),
                    reason: format!("invalid {key} format, expected YYYY-MM-DD"),
                }),
        }
    }
}
