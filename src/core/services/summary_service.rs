//! Pure derivations over a transaction collection: period filtering and the
//! figures shown in the monthly summary.

use std::collections::BTreeMap;

use crate::ledger::{Category, Period, Transaction, TransactionKind};

/// Spend per category. Every category is always present.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTotals {
    totals: BTreeMap<Category, f64>,
}

impl CategoryTotals {
    fn zeroed() -> Self {
        Self {
            totals: Category::ALL.into_iter().map(|c| (c, 0.0)).collect(),
        }
    }

    pub fn get(&self, category: Category) -> f64 {
        self.totals.get(&category).copied().unwrap_or(0.0)
    }

    /// Iterates in [`Category::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.totals.iter().map(|(category, amount)| (*category, *amount))
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlySummary {
    pub period: Period,
    pub total_income: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub category_totals: CategoryTotals,
    pub transaction_count: usize,
}

pub struct SummaryService;

impl SummaryService {
    /// Keeps transactions dated inside `period`, preserving input order.
    pub fn filter_by_period(transactions: &[Transaction], period: Period) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| period.contains(txn.date()))
            .cloned()
            .collect()
    }

    pub fn total_income(transactions: &[Transaction]) -> f64 {
        Self::sum_kind(transactions, TransactionKind::Income)
    }

    pub fn total_expenses(transactions: &[Transaction]) -> f64 {
        Self::sum_kind(transactions, TransactionKind::Expense)
    }

    pub fn balance(transactions: &[Transaction]) -> f64 {
        Self::total_income(transactions) - Self::total_expenses(transactions)
    }

    pub fn category_totals(transactions: &[Transaction]) -> CategoryTotals {
        let mut totals = CategoryTotals::zeroed();
        for txn in transactions {
            if let (TransactionKind::Expense, Some(category)) = (txn.kind(), txn.category()) {
                *totals.totals.entry(category).or_insert(0.0) += txn.amount();
            }
        }
        totals
    }

    /// Splits a collection into `(expenses, incomes)`, each in input order.
    pub fn split_by_kind(transactions: &[Transaction]) -> (Vec<Transaction>, Vec<Transaction>) {
        transactions
            .iter()
            .cloned()
            .partition(|txn| txn.kind() == TransactionKind::Expense)
    }

    /// Filters to `period` and computes every summary figure in one go.
    pub fn summarize(transactions: &[Transaction], period: Period) -> MonthlySummary {
        let visible = Self::filter_by_period(transactions, period);
        let total_income = Self::total_income(&visible);
        let total_expenses = Self::total_expenses(&visible);
        MonthlySummary {
            period,
            total_income,
            total_expenses,
            balance: total_income - total_expenses,
            category_totals: Self::category_totals(&visible),
            transaction_count: visible.len(),
        }
    }

    fn sum_kind(transactions: &[Transaction], kind: TransactionKind) -> f64 {
        transactions
            .iter()
            .filter(|txn| txn.kind() == kind)
            .map(Transaction::amount)
            .sum()
    }
}
