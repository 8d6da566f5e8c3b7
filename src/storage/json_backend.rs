use std::collections::HashSet;

use serde::{de::DeserializeOwned, Serialize};

use crate::ledger::{Period, Transaction};

use super::{
    blob::BlobStore,
    records::{ExpenseRecord, IncomeRecord, TransactionRecord},
    Result, Scope, TransactionStorage,
};

pub const EXPENSES_KEY: &str = "month-manager-expenses";
pub const INCOMES_KEY: &str = "month-manager-incomes";
const PERIOD_KEY_PREFIX: &str = "month-manager-transactions";

/// JSON encoding of transaction collections on top of any [`BlobStore`].
///
/// Under [`Scope::Global`] expenses and incomes live in two arrays; a reload
/// yields the expenses followed by the incomes, each in saved order. Under
/// [`Scope::Period`] a single array per month keeps the exact saved order.
#[derive(Debug, Clone)]
pub struct JsonStorage<B> {
    blobs: B,
}

impl<B: BlobStore> JsonStorage<B> {
    pub fn new(blobs: B) -> Self {
        Self { blobs }
    }

    pub fn blobs(&self) -> &B {
        &self.blobs
    }

    pub fn period_key(period: Period) -> String {
        format!("{PERIOD_KEY_PREFIX}-{period}")
    }

    /// Decodes the array stored under `key`, treating absence or any failure as empty.
    fn read_array<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.blobs.read(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(key, error = %err, "unable to read stored transactions; starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(key, error = %err, "discarding undecodable transaction data");
                Vec::new()
            }
        }
    }

    fn write_array<T: Serialize>(&self, key: &str, records: &[T]) -> Result<()> {
        let json = serde_json::to_string_pretty(records)?;
        self.blobs.write(key, &json)
    }
}

impl<B: BlobStore> TransactionStorage for JsonStorage<B> {
    fn load(&self, scope: Scope) -> Vec<Transaction> {
        let loaded: Vec<Transaction> = match scope {
            Scope::Global => {
                let expenses = self.read_array::<ExpenseRecord>(EXPENSES_KEY);
                let incomes = self.read_array::<IncomeRecord>(INCOMES_KEY);
                expenses
                    .into_iter()
                    .map(Transaction::from)
                    .chain(incomes.into_iter().map(Transaction::from))
                    .collect()
            }
            Scope::Period(period) => self
                .read_array::<TransactionRecord>(&Self::period_key(period))
                .into_iter()
                .map(Transaction::from)
                .collect(),
        };
        dedup_ids(loaded)
    }

    fn save(&self, scope: Scope, transactions: &[Transaction]) -> Result<()> {
        match scope {
            Scope::Global => {
                let expenses: Vec<ExpenseRecord> = transactions
                    .iter()
                    .filter_map(ExpenseRecord::from_transaction)
                    .collect();
                let incomes: Vec<IncomeRecord> = transactions
                    .iter()
                    .filter_map(IncomeRecord::from_transaction)
                    .collect();
                self.write_array(EXPENSES_KEY, &expenses)?;
                self.write_array(INCOMES_KEY, &incomes)?;
            }
            Scope::Period(period) => {
                let records: Vec<TransactionRecord> =
                    transactions.iter().map(TransactionRecord::from).collect();
                self.write_array(&Self::period_key(period), &records)?;
            }
        }
        tracing::debug!(?scope, count = transactions.len(), "transactions saved");
        Ok(())
    }
}

/// Drops later entries that reuse an id already seen, keeping ids unique in memory.
fn dedup_ids(transactions: Vec<Transaction>) -> Vec<Transaction> {
    let mut seen = HashSet::new();
    transactions
        .into_iter()
        .filter(|txn| {
            let fresh = seen.insert(txn.id());
            if !fresh {
                tracing::warn!(id = %txn.id(), "ignoring stored transaction with duplicate id");
            }
            fresh
        })
        .collect()
}
