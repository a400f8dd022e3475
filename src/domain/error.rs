//! Domain error types.

/// Top-level error type for rothkit.
#[derive(Debug, thiserror::Error)]
pub enum RothkitError {
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("price data error: {reason}")]
    Data { reason: String },

    #[error("no price data for {code}")]
    NoData { code: String },

    #[error("insufficient data for {code}: have {bars} bars, need {minimum}")]
    InsufficientData {
        code: String,
        bars: usize,
        minimum: usize,
    },

    #[error("chart error: {reason}")]
    Chart { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl RothkitError {
    pub fn invalid_input(field: &str, reason: impl Into<String>) -> Self {
        RothkitError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<&RothkitError> for std::process::ExitCode {
    fn from(err: &RothkitError) -> Self {
        let code: u8 = match err {
            RothkitError::Io(_) | RothkitError::Chart { .. } => 1,
            RothkitError::ConfigParse { .. }
            | RothkitError::ConfigMissing { .. }
            | RothkitError::ConfigInvalid { .. } => 2,
            RothkitError::InvalidInput { .. } => 3,
            RothkitError::Data { .. }
            | RothkitError::NoData { .. }
            | RothkitError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
