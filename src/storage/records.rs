//! Wire shapes for persisted transactions.
//!
//! The global layout keeps expenses and incomes in separate arrays with the
//! field names the browser version of the app wrote (`name` / `source`). The
//! monthly layout stores one unified array tagged by `type`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ledger::{Category, Transaction, TransactionKind};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub id: Uuid,
    pub name: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Category,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IncomeRecord {
    pub id: Uuid,
    pub source: String,
    pub amount: f64,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub label: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub date: NaiveDate,
}

impl From<ExpenseRecord> for Transaction {
    fn from(record: ExpenseRecord) -> Self {
        Transaction::from_parts(
            record.id,
            TransactionKind::Expense,
            record.name,
            record.amount,
            Some(record.category),
            record.date,
        )
    }
}

impl From<IncomeRecord> for Transaction {
    fn from(record: IncomeRecord) -> Self {
        Transaction::from_parts(
            record.id,
            TransactionKind::Income,
            record.source,
            record.amount,
            None,
            record.date,
        )
    }
}

impl From<TransactionRecord> for Transaction {
    fn from(record: TransactionRecord) -> Self {
        Transaction::from_parts(
            record.id,
            record.kind,
            record.label,
            record.amount,
            record.category,
            record.date,
        )
    }
}

impl From<&Transaction> for TransactionRecord {
    fn from(txn: &Transaction) -> Self {
        Self {
            id: txn.id(),
            kind: txn.kind(),
            label: txn.label().to_string(),
            amount: txn.amount(),
            category: txn.category(),
            date: txn.date(),
        }
    }
}

impl ExpenseRecord {
    /// `None` for income transactions.
    pub fn from_transaction(txn: &Transaction) -> Option<Self> {
        if !txn.is_expense() {
            return None;
        }
        Some(Self {
            id: txn.id(),
            name: txn.label().to_string(),
            amount: txn.amount(),
            category: txn.category().unwrap_or_default(),
            date: txn.date(),
        })
    }
}

impl IncomeRecord {
    /// `None` for expense transactions.
    pub fn from_transaction(txn: &Transaction) -> Option<Self> {
        if !txn.is_income() {
            return None;
        }
        Some(Self {
            id: txn.id(),
            source: txn.label().to_string(),
            amount: txn.amount(),
            date: txn.date(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_browser_expense_payload() {
        let raw = r#"[{"id":"6f1c2b1e-8a0e-4d5b-9c4e-2f3a1b0c9d8e","name":"Rent","amount":1000,"category":"Rent","date":"2024-05-01"}]"#;
        let records: Vec<ExpenseRecord> = serde_json::from_str(raw).unwrap();
        let txn = Transaction::from(records[0].clone());
        assert_eq!(txn.label(), "Rent");
        assert_eq!(txn.amount(), 1000.0);
        assert_eq!(txn.category(), Some(Category::Rent));
        assert_eq!(txn.date(), NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn expense_without_category_falls_back_to_other() {
        let raw = r#"{"id":"6f1c2b1e-8a0e-4d5b-9c4e-2f3a1b0c9d8e","name":"Gift","amount":5.5,"date":"2024-05-01"}"#;
        let record: ExpenseRecord = serde_json::from_str(raw).unwrap();
        assert_eq!(record.category, Category::Other);
    }

    #[test]
    fn unified_record_omits_category_for_income() {
        let raw = r#"{"id":"6f1c2b1e-8a0e-4d5b-9c4e-2f3a1b0c9d8e","type":"income","label":"Salary","amount":3000,"date":"2024-05-01"}"#;
        let record: TransactionRecord = serde_json::from_str(raw).unwrap();
        let txn = Transaction::from(record);
        let json = serde_json::to_value(TransactionRecord::from(&txn)).unwrap();
        assert_eq!(json["type"], "income");
        assert!(json.get("category").is_none());
    }

    #[test]
    fn per_kind_records_skip_the_other_kind() {
        let raw = r#"{"id":"6f1c2b1e-8a0e-4d5b-9c4e-2f3a1b0c9d8e","source":"Salary","amount":3000,"date":"2024-05-01"}"#;
        let income = Transaction::from(serde_json::from_str::<IncomeRecord>(raw).unwrap());
        assert!(ExpenseRecord::from_transaction(&income).is_none());
        assert!(IncomeRecord::from_transaction(&income).is_some());
    }
}
