//! Port traits the domain depends on.

pub mod chart_port;
pub mod config_port;
pub mod price_history_port;
pub mod prompt_port;
