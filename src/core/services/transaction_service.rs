//! Business logic helpers for managing the transaction collection.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::ledger::Transaction;

/// Collection helpers that keep ids unique and never leave a half-applied change.
pub struct TransactionService;

impl TransactionService {
    /// Inserts `transaction` at the front (newest first) and returns its identifier.
    pub fn add(collection: &mut Vec<Transaction>, transaction: Transaction) -> ServiceResult<Uuid> {
        let id = transaction.id();
        if Self::find(collection, id).is_some() {
            return Err(ServiceError::Invalid(format!(
                "Transaction {id} already exists"
            )));
        }
        collection.insert(0, transaction);
        Ok(id)
    }

    /// Removes the transaction identified by `id`. Unknown ids leave the collection untouched.
    pub fn remove(collection: &mut Vec<Transaction>, id: Uuid) -> Option<Transaction> {
        let index = collection.iter().position(|txn| txn.id() == id)?;
        Some(collection.remove(index))
    }

    pub fn find(collection: &[Transaction], id: Uuid) -> Option<&Transaction> {
        collection.iter().find(|txn| txn.id() == id)
    }

    /// Resolves a full id or a unique leading fragment of one, as typed by a user.
    pub fn resolve_id(collection: &[Transaction], needle: &str) -> ServiceResult<Uuid> {
        let needle = needle.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(ServiceError::Invalid("Transaction id is required".into()));
        }
        if let Ok(id) = Uuid::parse_str(&needle) {
            return Ok(id);
        }
        let mut matches = collection
            .iter()
            .map(Transaction::id)
            .filter(|id| id.to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(id), None) => Ok(id),
            (None, _) => Err(ServiceError::Invalid(format!(
                "No transaction matches `{needle}`"
            ))),
            (Some(_), Some(_)) => Err(ServiceError::Invalid(format!(
                "`{needle}` matches more than one transaction"
            ))),
        }
    }
}
