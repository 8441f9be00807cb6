use thiserror::Error;

use crate::data::model::ColumnType;

/// Canonical result for the processor.
pub type Result<T> = std::result::Result<T, ProcessorError>;

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("File '{path}' not found")]
    FileNotFound { path: String },

    #[error("Invalid condition format: {0}")]
    InvalidConditionFormat(String),

    #[error("'{0}' not found in data columns")]
    ColumnNotFound(String),

    #[error("Unsupported function: {0}")]
    UnsupportedFunction(String),

    #[error("Aggregation is not supported for text columns")]
    AggregationUnsupported(String),

    #[error("Sort direction must be 'asc' or 'desc', got: {0}")]
    InvalidDirection(String),

    #[error("Cannot convert '{value}' to {expected} for column '{column}'")]
    ValueCoercion {
        value: String,
        column: String,
        expected: ColumnType,
    },

    #[error("Cannot aggregate an empty dataset")]
    EmptyDataset,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ProcessorError {
    /// Errors outside the processor's own taxonomy, reported as unexpected.
    pub fn is_unexpected(&self) -> bool {
        matches!(
            self,
            ProcessorError::Csv(_) | ProcessorError::Json(_) | ProcessorError::Io(_)
        )
    }
}
