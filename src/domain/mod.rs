//! Core domain types and logic.
//!
//! The planner side: contribution limits and schedules, the fund catalog,
//! age-based allocation, the glide path and advice. The backtest side: price
//! bars, indicators, strategies and the execution engine with its statistics.

pub mod advice;
pub mod allocation;
pub mod backtest;
pub mod config_validation;
pub mod contribution;
pub mod error;
pub mod execution;
pub mod fund_catalog;
pub mod glide_path;
pub mod indicator;
pub mod metrics;
pub mod ohlcv;
pub mod plan;
pub mod portfolio;
pub mod position;
pub mod strategy;
