//! The single control point the view layer talks to: owns the in-memory
//! collection and selected month, and persists after every mutation.

use uuid::Uuid;

use crate::config::{Config, ConfigManager};
use crate::core::clock::{Clock, SystemClock};
use crate::core::services::{MonthlySummary, ServiceResult, SummaryService, TransactionService};
use crate::errors::BudgetError;
use crate::ledger::{parse_date, Category, Period, Transaction};
use crate::storage::{JsonFileStore, JsonStorage, StorageScope, TransactionStorage};

/// Facade that coordinates the transaction collection, period selection, and persistence.
pub struct BudgetManager {
    storage: Box<dyn TransactionStorage>,
    clock: Box<dyn Clock>,
    scope: StorageScope,
    period: Period,
    transactions: Vec<Transaction>,
}

impl BudgetManager {
    /// Selects the clock's current month and loads its collection.
    pub fn new(
        storage: Box<dyn TransactionStorage>,
        scope: StorageScope,
        clock: Box<dyn Clock>,
    ) -> Self {
        let period = Period::current(clock.as_ref());
        let transactions = storage.load(scope.scope_for(period));
        tracing::debug!(%period, ?scope, count = transactions.len(), "budget loaded");
        Self {
            storage,
            clock,
            scope,
            period,
            transactions,
        }
    }

    /// Opens the JSON file store in the data directory named by `config`.
    pub fn open(config_manager: &ConfigManager, config: &Config) -> Result<Self, BudgetError> {
        let data_dir = config_manager.data_dir(config);
        let blobs = JsonFileStore::new(data_dir)?;
        Ok(Self::new(
            Box::new(JsonStorage::new(blobs)),
            config.storage_scope,
            Box::new(SystemClock),
        ))
    }

    pub fn scope(&self) -> StorageScope {
        self.scope
    }

    pub fn period(&self) -> Period {
        self.period
    }

    /// Everything held in memory: all time under the global scope, the
    /// selected month under the monthly scope.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Transactions dated in the selected month, in collection order: entries
    /// added this session come first. After a global-scope reload that order
    /// is every expense followed by every income, each kind in insertion order.
    pub fn visible(&self) -> Vec<Transaction> {
        SummaryService::filter_by_period(&self.transactions, self.period)
    }

    pub fn summary(&self) -> MonthlySummary {
        SummaryService::summarize(&self.transactions, self.period)
    }

    /// Switches the selected month, reloading when each month is stored separately.
    pub fn select_period(&mut self, period: Period) {
        if period == self.period {
            return;
        }
        self.period = period;
        if self.scope == StorageScope::Monthly {
            self.reload();
        }
        tracing::info!(%period, "period selected");
    }

    /// Discards the in-memory collection and reads it again from storage.
    pub fn reload(&mut self) {
        self.transactions = self.storage.load(self.scope.scope_for(self.period));
    }

    /// Validates and records an expense from raw form text.
    pub fn add_expense(
        &mut self,
        name: &str,
        amount_text: &str,
        category_text: Option<&str>,
        date_text: Option<&str>,
    ) -> ServiceResult<Uuid> {
        let category = category_text.map(str::parse::<Category>).transpose()?;
        let date = date_text.map(parse_date).transpose()?;
        let txn = Transaction::expense(name, amount_text, category, date, self.clock.as_ref())?;
        self.add(txn)
    }

    /// Validates and records an income entry from raw form text.
    pub fn add_income(
        &mut self,
        source: &str,
        amount_text: &str,
        date_text: Option<&str>,
    ) -> ServiceResult<Uuid> {
        let date = date_text.map(parse_date).transpose()?;
        let txn = Transaction::income(source, amount_text, date, self.clock.as_ref())?;
        self.add(txn)
    }

    /// Records an already-validated transaction and saves. Memory is only
    /// updated once the save succeeds.
    pub fn add(&mut self, transaction: Transaction) -> ServiceResult<Uuid> {
        let current = self.scope.scope_for(self.period);
        let target = self.scope.scope_for(Period::from_date(transaction.date()));
        let kind = transaction.kind();

        let id = if target == current {
            let mut next = self.transactions.clone();
            let id = TransactionService::add(&mut next, transaction)?;
            self.storage.save(current, &next)?;
            self.transactions = next;
            id
        } else {
            // dated outside the selected month under the monthly scope
            let mut other = self.storage.load(target);
            let id = TransactionService::add(&mut other, transaction)?;
            self.storage.save(target, &other)?;
            id
        };

        tracing::info!(%id, ?kind, "transaction added");
        Ok(id)
    }

    /// Deletes by id and saves. Returns `false`, without touching storage,
    /// when no transaction matched.
    pub fn delete(&mut self, id: Uuid) -> ServiceResult<bool> {
        let mut next = self.transactions.clone();
        if TransactionService::remove(&mut next, id).is_none() {
            tracing::debug!(%id, "delete ignored; no such transaction");
            return Ok(false);
        }
        self.storage.save(self.scope.scope_for(self.period), &next)?;
        self.transactions = next;
        tracing::info!(%id, "transaction deleted");
        Ok(true)
    }

    /// Deletes using a full id or unique prefix as typed by the user.
    pub fn delete_matching(&mut self, needle: &str) -> ServiceResult<bool> {
        let id = TransactionService::resolve_id(&self.transactions, needle)?;
        self.delete(id)
    }
}
