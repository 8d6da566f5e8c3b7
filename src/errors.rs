use thiserror::Error;

/// Reasons a transaction submission is turned away before it reaches the collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    #[error("label must not be empty")]
    EmptyLabel,
    #[error("invalid amount `{0}`: expected a number")]
    InvalidAmount(String),
    #[error("unknown category `{0}`")]
    UnknownCategory(String),
    #[error("invalid date `{0}`: expected YYYY-MM-DD")]
    InvalidDate(String),
    #[error("invalid period `{0}`: expected YYYY-MM")]
    InvalidPeriod(String),
}

/// Error type that captures common budget failures.
#[derive(Debug, Error)]
pub enum BudgetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    Transaction(#[from] TransactionError),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Configuration error: {0}")]
    Config(String),
}
