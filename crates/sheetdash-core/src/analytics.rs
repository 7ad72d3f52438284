//! Aggregate totals over the record set

use sheetdash_parser::TransactionRecord;

use crate::models::AnalyticsSummary;

/// Sum of amounts over income-side records
pub fn total_income(records: &[TransactionRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.is_income())
        .map(|r| r.amount)
        .sum()
}

/// Sum of amounts over expense-side records
pub fn total_expenses(records: &[TransactionRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.is_expense())
        .map(|r| r.amount)
        .sum()
}

/// Compute income, expenses, balance and count.
///
/// A record carrying both a credit and a debit label is counted on both
/// sides.
pub fn calculate_analytics(records: &[TransactionRecord]) -> AnalyticsSummary {
    let income = total_income(records);
    let expenses = total_expenses(records);

    AnalyticsSummary {
        income,
        expenses,
        balance: income - expenses,
        total_transactions: records.len(),
    }
}
