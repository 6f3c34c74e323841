//! Domain error types.

/// Top-level error type for lsbot.
#[derive(Debug, thiserror::Error)]
pub enum LsbotError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("http error for {symbol}: {reason}")]
    Http { symbol: String, reason: String },

    #[error("bad price data for {symbol}: {reason}")]
    BadData { symbol: String, reason: String },

    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient history for {symbol}: have {have} closes, need {need}")]
    InsufficientHistory {
        symbol: String,
        have: usize,
        need: usize,
    },

    #[error("could not fetch data for any symbol: {symbols}")]
    AllSymbolsFailed { symbols: String },

    #[error("notification delivery failed: {reason}")]
    Notify { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&LsbotError> for std::process::ExitCode {
    fn from(err: &LsbotError) -> Self {
        let code: u8 = match err {
            LsbotError::Io(_) => 1,
            LsbotError::ConfigParse { .. } | LsbotError::ConfigInvalid { .. } => 2,
            LsbotError::Http { .. }
            | LsbotError::BadData { .. }
            | LsbotError::AllSymbolsFailed { .. } => 3,
            LsbotError::NoData { .. } | LsbotError::InsufficientHistory { .. } => 4,
            LsbotError::Notify { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
