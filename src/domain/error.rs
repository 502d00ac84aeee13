//! Domain error types.

/// Top-level error type for gbce.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("no trades for {symbol} in the last {window_minutes} minutes")]
    EmptyWindow { symbol: String, window_minutes: i64 },

    #[error("cannot compute all share index: {reason}")]
    EmptyOrInvalidLedger { reason: String },

    #[error("unknown stock {symbol}")]
    UnknownStock { symbol: String },

    #[error("stock data error: {reason}")]
    StockData { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MarketError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        MarketError::InvalidInput {
            reason: reason.into(),
        }
    }
}

impl From<&MarketError> for std::process::ExitCode {
    fn from(err: &MarketError) -> Self {
        let code: u8 = match err {
            MarketError::Io(_) | MarketError::Report { .. } => 1,
            MarketError::ConfigParse { .. } | MarketError::ConfigInvalid { .. } => 2,
            MarketError::StockData { .. } | MarketError::UnknownStock { .. } => 3,
            MarketError::InvalidInput { .. } => 4,
            MarketError::EmptyWindow { .. } | MarketError::EmptyOrInvalidLedger { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
