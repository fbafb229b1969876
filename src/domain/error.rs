//! Domain error types.

/// A date that could not be turned into an instant.
///
/// Recorded per point; the offending observation keeps its index with a
/// `NaN` timestamp.
#[derive(Debug, Clone, PartialEq, thiserror::Error, serde::Serialize)]
#[error("invalid date at index {index}: {raw:?}")]
pub struct InvalidDateError {
    pub index: usize,
    pub raw: String,
}

/// Top-level error type for stockchart.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error(transparent)]
    InvalidDate(#[from] InvalidDateError),

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("no history for {symbol}")]
    NoData { symbol: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ChartError {
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        ChartError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this error category.
    pub fn exit_status(&self) -> u8 {
        match self {
            ChartError::Io(_) | ChartError::Json(_) => 1,
            ChartError::ConfigParse { .. } | ChartError::ConfigInvalid { .. } => 2,
            ChartError::Data { .. } | ChartError::NoData { .. } => 3,
            ChartError::InvalidParameter { .. } => 4,
            ChartError::InvalidDate(_) => 5,
        }
    }
}

impl From<&ChartError> for std::process::ExitCode {
    fn from(err: &ChartError) -> Self {
        std::process::ExitCode::from(err.exit_status())
    }
}
