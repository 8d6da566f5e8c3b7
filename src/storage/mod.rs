pub mod blob;
pub mod json_backend;
pub mod records;

use serde::{Deserialize, Serialize};

use crate::{
    errors::BudgetError,
    ledger::{Period, Transaction},
};

pub type Result<T> = std::result::Result<T, BudgetError>;

/// Which partitioning a deployment persists transactions under. Exactly one is
/// used for the lifetime of a data directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageScope {
    /// One collection covering all time, filtered by period at read time.
    #[default]
    Global,
    /// One collection per calendar month, loaded when the month is selected.
    Monthly,
}

impl StorageScope {
    /// The partition holding transactions for `period` under this scope.
    pub fn scope_for(&self, period: Period) -> Scope {
        match self {
            StorageScope::Global => Scope::Global,
            StorageScope::Monthly => Scope::Period(period),
        }
    }
}

/// Partition key a collection is loaded from and saved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Global,
    Period(Period),
}

/// Abstraction over persistence backends holding transaction collections.
pub trait TransactionStorage: Send + Sync {
    /// Reads the collection stored for `scope`. Missing or unreadable data
    /// yields an empty collection rather than an error.
    fn load(&self, scope: Scope) -> Vec<Transaction>;

    /// Replaces whatever is stored for `scope` with `transactions`.
    fn save(&self, scope: Scope, transactions: &[Transaction]) -> Result<()>;
}

pub use blob::{BlobStore, JsonFileStore, MemoryBlobStore};
pub use json_backend::{JsonStorage, EXPENSES_KEY, INCOMES_KEY};
