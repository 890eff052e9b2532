use thiserror::Error;

/// Error type that captures the common failure modes of the expense tracker.
#[derive(Debug, Error)]
pub enum ExpenseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Validation(String),
    #[error("Unknown category `{0}`")]
    UnknownCategory(String),
    #[error("No expense matches `{0}`")]
    UnknownExpense(String),
    #[error("`{0}` matches more than one expense; use a longer id prefix")]
    AmbiguousExpense(String),
    #[error("Duplicate expense id `{0}`")]
    DuplicateId(uuid::Uuid),
}
