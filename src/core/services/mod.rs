pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{CategoryTotals, MonthlySummary, SummaryService};
pub use transaction_service::TransactionService;

use crate::errors::{BudgetError, TransactionError};

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Budget(#[from] BudgetError),
    #[error(transparent)]
    Rejected(#[from] TransactionError),
    #[error("{0}")]
    Invalid(String),
}
