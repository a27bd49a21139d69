//! Domain error types.

/// Top-level error type for stockfeed.
///
/// Components never terminate the process; failures propagate up to
/// [`crate::cli::run`], which alone decides the exit code.
#[derive(Debug, thiserror::Error)]
pub enum StockfeedError {
    #[error("field ({field}) not found in header: {header}")]
    FieldNotFound { field: String, header: String },

    #[error("row has no column {index}: {row}")]
    ColumnOutOfRange { index: usize, row: String },

    #[error("invalid date (expected YYYY-MM-DD): {text}")]
    InvalidDate { text: String },

    #[error("failed to parse number: {text}")]
    InvalidNumber { text: String },

    #[error("failed to open {path}: {reason}")]
    SourceUnavailable { path: String, reason: String },

    #[error("source is empty (no header line)")]
    EmptySource,

    #[error("{name}: {error}")]
    InSource {
        name: String,
        #[source]
        error: Box<StockfeedError>,
    },

    #[error("failed to fetch {symbol}: {reason}")]
    Fetch { symbol: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StockfeedError> for std::process::ExitCode {
    fn from(err: &StockfeedError) -> Self {
        let code: u8 = match err {
            StockfeedError::Io(_) => 1,
            StockfeedError::ConfigParse { .. } | StockfeedError::ConfigMissing { .. } => 2,
            StockfeedError::SourceUnavailable { .. }
            | StockfeedError::EmptySource
            | StockfeedError::Fetch { .. } => 3,
            StockfeedError::FieldNotFound { .. }
            | StockfeedError::ColumnOutOfRange { .. }
            | StockfeedError::InvalidDate { .. }
            | StockfeedError::InvalidNumber { .. } => 4,
            StockfeedError::InSource { error, .. } => return Self::from(error.as_ref()),
        };
        std::process::ExitCode::from(code)
    }
}
