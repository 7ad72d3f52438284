//! Expense breakdown by category

use sheetdash_parser::TransactionRecord;

use crate::analytics::total_expenses;
use crate::models::CategorySummary;

/// Group categorized expense records into buckets sorted by total, largest
/// first. Ties keep the order in which categories were first seen.
///
/// Income-side records and uncategorized expenses are left out.
pub fn category_breakdown(records: &[TransactionRecord]) -> Vec<CategorySummary> {
    let expenses = total_expenses(records);

    // Vec keeps first-seen order; the category count is small.
    let mut buckets: Vec<CategorySummary> = Vec::new();

    for record in records.iter().filter(|r| r.is_expense()) {
        let Some(name) = record.category_name() else {
            continue;
        };

        match buckets.iter_mut().find(|b| b.name == name) {
            Some(bucket) => {
                bucket.total += record.amount;
                bucket.count += 1;
            }
            None => buckets.push(CategorySummary {
                name: name.to_string(),
                total: record.amount,
                count: 1,
                percentage: 0.0,
            }),
        }
    }

    for bucket in &mut buckets {
        bucket.percentage = if expenses > 0.0 {
            bucket.total / expenses * 100.0
        } else {
            0.0
        };
    }

    // sort_by is stable
    buckets.sort_by(|a, b| b.total.total_cmp(&a.total));
    buckets
}
