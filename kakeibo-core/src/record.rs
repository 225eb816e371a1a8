//! Ledger record types and the income/fixed/variable classifier.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Placeholder label for any missing select/title value ("unknown").
pub const UNKNOWN_LABEL: &str = "不明";

/// One dated income/expense entry, decoded from the external ledger store.
///
/// Sign convention: positive amount = income, negative = expense.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LedgerRecord {
    /// Item name (題名 title property)
    pub item_name: String,
    /// Signed amount in yen
    pub amount: f64,
    /// True when the entry came from the fixed-cost master
    pub fixed_cost: bool,
    /// Category label; `None` when the select has no value
    pub category: Option<String>,
    /// Execution date; `None` when the store's formula produced no date
    pub execution_date: Option<NaiveDate>,
    /// Whether the entry has already been executed
    pub status: RecordStatus,
    /// Payment method label
    pub payment_method: String,
    /// Direction label (出口・入口)
    pub direction: String,
}

/// Execution status of a ledger entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RecordStatus {
    /// Not yet executed; contributes to the planned table, not the totals
    Pending,
    /// Executed (today or earlier); contributes to income/expense
    Executed,
}

/// Classification of a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordClass {
    Income,
    FixedExpense,
    VariableExpense,
}

/// Classify one record by amount sign, then by the fixed-cost flag.
///
/// Zero-amount records count as income. That is the store's historical
/// behavior and downstream totals depend on it, so it stays.
pub fn classify(record: &LedgerRecord) -> RecordClass {
    if record.amount >= 0.0 {
        RecordClass::Income
    } else if record.fixed_cost {
        RecordClass::FixedExpense
    } else {
        RecordClass::VariableExpense
    }
}

impl LedgerRecord {
    /// Category label, falling back to the unknown bucket.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or(UNKNOWN_LABEL)
    }

    /// Returns true if this is an expense (negative amount)
    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }

    /// Returns true if this is income (positive amount)
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }
}
