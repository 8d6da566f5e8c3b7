use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use crate::{core::clock::Clock, errors::TransactionError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Whether a transaction adds to or draws from the monthly balance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A single recorded income or expense.
///
/// Instances are only created through [`Transaction::expense`] and
/// [`Transaction::income`], so an expense always carries a category and an
/// income never does.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    id: Uuid,
    kind: TransactionKind,
    label: String,
    amount: f64,
    category: Option<Category>,
    date: NaiveDate,
}

impl Transaction {
    /// Validates form input for an expense. A missing category falls back to
    /// [`Category::Other`] and a missing date to the clock's current day.
    pub fn expense(
        name: &str,
        amount_input: &str,
        category: Option<Category>,
        date: Option<NaiveDate>,
        clock: &dyn Clock,
    ) -> Result<Self, TransactionError> {
        let label = parse_label(name)?;
        let amount = parse_amount(amount_input)?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind: TransactionKind::Expense,
            label,
            amount,
            category: Some(category.unwrap_or_default()),
            date: date.unwrap_or_else(|| clock.today()),
        })
    }

    /// Validates form input for an income entry.
    pub fn income(
        source: &str,
        amount_input: &str,
        date: Option<NaiveDate>,
        clock: &dyn Clock,
    ) -> Result<Self, TransactionError> {
        let label = parse_label(source)?;
        let amount = parse_amount(amount_input)?;
        Ok(Self {
            id: Uuid::new_v4(),
            kind: TransactionKind::Income,
            label,
            amount,
            category: None,
            date: date.unwrap_or_else(|| clock.today()),
        })
    }

    /// Rebuilds a transaction from persisted fields, coercing the category to
    /// match the kind.
    pub(crate) fn from_parts(
        id: Uuid,
        kind: TransactionKind,
        label: String,
        amount: f64,
        category: Option<Category>,
        date: NaiveDate,
    ) -> Self {
        let category = match kind {
            TransactionKind::Expense => Some(category.unwrap_or_default()),
            TransactionKind::Income => None,
        };
        Self {
            id,
            kind,
            label,
            amount,
            category,
            date,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    /// Expense name or income source.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }
}

/// Parses a `YYYY-MM-DD` date as typed into a form.
pub fn parse_date(input: &str) -> Result<NaiveDate, TransactionError> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| TransactionError::InvalidDate(input.to_string()))
}

fn parse_label(input: &str) -> Result<String, TransactionError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(TransactionError::EmptyLabel);
    }
    Ok(trimmed.to_string())
}

fn parse_amount(input: &str) -> Result<f64, TransactionError> {
    let invalid = || TransactionError::InvalidAmount(input.to_string());
    let value: f64 = input.trim().parse().map_err(|_| invalid())?;
    if !value.is_finite() {
        return Err(invalid());
    }
    // folds -0.0 into 0.0
    Ok(value + 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::FixedClock;
    use std::collections::HashSet;

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::new(may(20))
    }

    #[test]
    fn expense_keeps_the_submitted_fields() {
        let txn =
            Transaction::expense("Coffee", "4.5", Some(Category::Food), Some(may(3)), &clock())
                .unwrap();
        assert_eq!(txn.kind(), TransactionKind::Expense);
        assert_eq!(txn.label(), "Coffee");
        assert_eq!(txn.amount(), 4.5);
        assert_eq!(txn.category(), Some(Category::Food));
        assert_eq!(txn.date(), may(3));
    }

    #[test]
    fn expense_defaults_category_and_date() {
        let txn = Transaction::expense("Misc", "10", None, None, &clock()).unwrap();
        assert_eq!(txn.category(), Some(Category::Other));
        assert_eq!(txn.date(), may(20));
    }

    #[test]
    fn income_has_no_category() {
        let txn = Transaction::income("Salary", "3000", Some(may(1)), &clock()).unwrap();
        assert_eq!(txn.kind(), TransactionKind::Income);
        assert_eq!(txn.category(), None);
    }

    #[test]
    fn rejects_empty_label_and_amount() {
        let food = Some(Category::Food);
        assert_eq!(
            Transaction::expense("", "10", food, Some(may(1)), &clock()),
            Err(TransactionError::EmptyLabel)
        );
        assert_eq!(
            Transaction::expense("   ", "10", food, Some(may(1)), &clock()),
            Err(TransactionError::EmptyLabel)
        );
        assert!(matches!(
            Transaction::expense("Coffee", "", food, Some(may(1)), &clock()),
            Err(TransactionError::InvalidAmount(_))
        ));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite_amounts() {
        for raw in ["abc", "NaN", "inf", "-inf", "1,5"] {
            let result = Transaction::income("Gift", raw, None, &clock());
            assert!(
                matches!(result, Err(TransactionError::InvalidAmount(_))),
                "accepted `{raw}`"
            );
        }
    }

    #[test]
    fn negative_amounts_are_recorded_as_entered() {
        let txn = Transaction::expense("Refund correction", "-5", None, None, &clock()).unwrap();
        assert_eq!(txn.amount(), -5.0);
        let txn = Transaction::income("Adjustment", " -0 ", None, &clock()).unwrap();
        assert_eq!(txn.amount().to_bits(), 0.0f64.to_bits());
    }

    #[test]
    fn ids_are_unique_across_creations() {
        let ids: HashSet<Uuid> = (0..200)
            .map(|i| {
                Transaction::expense("Item", &i.to_string(), None, None, &clock())
                    .unwrap()
                    .id()
            })
            .collect();
        assert_eq!(ids.len(), 200);
    }

    #[test]
    fn from_parts_coerces_category_to_kind() {
        let expense =
            Transaction::from_parts(Uuid::new_v4(), TransactionKind::Expense, "x".into(), 1.0, None, may(1));
        assert_eq!(expense.category(), Some(Category::Other));
        let income = Transaction::from_parts(
            Uuid::new_v4(),
            TransactionKind::Income,
            "y".into(),
            1.0,
            Some(Category::Rent),
            may(1),
        );
        assert_eq!(income.category(), None);
    }

    #[test]
    fn parse_date_accepts_iso_dates_only() {
        assert_eq!(parse_date("2024-05-15").unwrap(), may(15));
        assert!(parse_date("15/05/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }
}
