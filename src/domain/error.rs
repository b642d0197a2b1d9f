//! Domain error types.

/// Top-level error type for barsignal.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("invalid configuration [{key}]: {reason}")]
    InvalidConfiguration { key: String, reason: String },

    #[error("malformed series at bar {position}: {reason}")]
    MalformedSeries { position: usize, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SignalError {
    pub(crate) fn invalid_config(key: &str, reason: impl Into<String>) -> Self {
        SignalError::InvalidConfiguration {
            key: key.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        SignalError::MalformedSeries {
            position,
            reason: reason.into(),
        }
    }
}

impl From<&SignalError> for std::process::ExitCode {
    fn from(err: &SignalError) -> Self {
        let code: u8 = match err {
            SignalError::Io(_) => 1,
            SignalError::InvalidConfiguration { .. } | SignalError::ConfigParse { .. } => 2,
            SignalError::MalformedSeries { .. } | SignalError::Data { .. } => 3,
            SignalError::Report { .. } => 4,
        };
        std::process::ExitCode::from(code)
    }
}
