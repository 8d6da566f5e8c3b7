//! Transaction domain models and the period filter key.

pub mod category;
pub mod period;
pub mod transaction;

pub use category::Category;
pub use period::Period;
pub use transaction::{parse_date, Transaction, TransactionKind};
