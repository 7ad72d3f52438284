//! Record and wire types

use serde::{Deserialize, Serialize};

/// One row of financial activity
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Free-form date/time text as entered in the sheet
    pub date_time: String,
    /// Income-side label; non-empty after trim means income
    pub credit_label: String,
    /// Expense-side label; non-empty after trim means expense
    pub debit_label: String,
    /// Category name, empty when uncategorized
    pub category: String,
    /// Non-negative magnitude
    pub amount: f64,
    /// Free-text note
    pub purpose: String,
}

impl TransactionRecord {
    /// Income-side entry
    pub fn is_income(&self) -> bool {
        !self.credit_label.trim().is_empty()
    }

    /// Expense-side entry
    pub fn is_expense(&self) -> bool {
        !self.debit_label.trim().is_empty()
    }

    /// Trimmed category, `None` when blank
    pub fn category_name(&self) -> Option<&str> {
        let name = self.category.trim();
        if name.is_empty() {
            None
        } else {
            Some(name)
        }
    }
}

/// A single cell from the Sheets API.
///
/// Formatted values arrive as strings, but unformatted reads return
/// numbers and booleans as JSON scalars.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Number(serde_json::Number),
    Bool(bool),
    Empty(()),
}

impl Cell {
    pub fn into_string(self) -> String {
        match self {
            Cell::Text(s) => s,
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Empty(()) => String::new(),
        }
    }
}

/// Body of `GET /v4/spreadsheets/{id}/values/{range}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueRange {
    #[serde(default)]
    pub range: String,
    #[serde(default)]
    pub major_dimension: Option<String>,
    /// Absent entirely when the range holds no data
    #[serde(default)]
    pub values: Option<Vec<Vec<Cell>>>,
}

impl ValueRange {
    /// Rows as plain strings; empty when the range had no values
    pub fn into_rows(self) -> Vec<Vec<String>> {
        self.values
            .unwrap_or_default()
            .into_iter()
            .map(|row| row.into_iter().map(Cell::into_string).collect())
            .collect()
    }
}
