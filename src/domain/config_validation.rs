//! Configuration validation.
//!
//! Every section is optional; a missing key takes its built-in default.
//! Present keys must parse and fall in range.

use crate::domain::contribution::LIMITS_2025;
use crate::domain::error::RothkitError;
use crate::ports::config_port::ConfigPort;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), RothkitError> {
    validate_limits_config(config)?;
    validate_planner_config(config)?;
    validate_backtest_config(config)?;
    validate_strategy_config(config)?;
    Ok(())
}

pub fn validate_limits_config(config: &dyn ConfigPort) -> Result<(), RothkitError> {
    let standard = number(config, "limits", "standard", LIMITS_2025.standard)?;
    if standard <= 0.0 {
        return Err(invalid("limits", "standard", "standard must be positive"));
    }
    let catch_up = number(config, "limits", "catch_up", LIMITS_2025.catch_up)?;
    if catch_up < standard {
        return Err(invalid(
            "limits",
            "catch_up",
            "catch_up must be at least the standard limit",
        ));
    }
    let age = number(config, "limits", "catch_up_age", f64::from(LIMITS_2025.catch_up_age))?;
    if age.fract() != 0.0 || !(1.0..=120.0).contains(&age) {
        return Err(invalid(
            "limits",
            "catch_up_age",
            "catch_up_age must be a whole number between 1 and 120",
        ));
    }
    Ok(())
}

pub fn validate_planner_config(config: &dyn ConfigPort) -> Result<(), RothkitError> {
    match config.get_string("planner", "chart_path") {
        Some(path) if path.trim().is_empty() => {
            Err(invalid("planner", "chart_path", "chart_path must not be empty"))
        }
        _ => Ok(()),
    }
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), RothkitError> {
    let cash = number(config, "backtest", "initial_cash", 10_000.0)?;
    if cash <= 0.0 {
        return Err(invalid("backtest", "initial_cash", "initial_cash must be positive"));
    }
    let commission = number(config, "backtest", "commission_pct", 0.2)?;
    if !(0.0..100.0).contains(&commission) {
        return Err(invalid(
            "backtest",
            "commission_pct",
            "commission_pct must be between 0 and 100",
        ));
    }
    if let Some(value) = config.get_string("backtest", "exclusive_orders") {
        if !matches!(
            value.trim().to_lowercase().as_str(),
            "true" | "yes" | "1" | "false" | "no" | "0"
        ) {
            return Err(invalid(
                "backtest",
                "exclusive_orders",
                "exclusive_orders must be true or false",
            ));
        }
    }

    let start = config.get_date("backtest", "start_date")?;
    let end = config.get_date("backtest", "end_date")?;
    match (start, end) {
        (Some(start), Some(end)) if start >= end => Err(invalid(
            "backtest",
            "start_date",
            "start_date must be before end_date",
        )),
        _ => Ok(()),
    }
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), RothkitError> {
    let fast = period(config, "fast_period", 10)?;
    let slow = period(config, "slow_period", 20)?;
    if fast >= slow {
        return Err(invalid(
            "strategy",
            "fast_period",
            "fast_period must be less than slow_period",
        ));
    }
    for key in ["entry_size", "exit_size"] {
        let size = number(config, "strategy", key, 1.0)?;
        if size <= 0.0 || size > 1.0 {
            return Err(invalid(
                "strategy",
                key,
                &format!("{key} must be greater than 0 and at most 1"),
            ));
        }
    }
    Ok(())
}

fn period(config: &dyn ConfigPort, key: &str, default: i64) -> Result<i64, RothkitError> {
    let raw = config.get_string("strategy", key);
    let value = match raw.as_deref().map(str::trim) {
        None => default,
        Some(s) => s
            .parse::<i64>()
            .map_err(|_| invalid("strategy", key, &format!("{key} must be an integer")))?,
    };
    if value < 1 {
        return Err(invalid("strategy", key, &format!("{key} must be at least 1")));
    }
    Ok(value)
}

fn number(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    default: f64,
) -> Result<f64, RothkitError> {
    match config.get_string(section, key) {
        None => Ok(default),
        Some(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| invalid(section, key, &format!("{key} must be a number"))),
    }
}

fn invalid(section: &str, key: &str, reason: &str) -> RothkitError {
    RothkitError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
