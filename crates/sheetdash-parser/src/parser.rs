//! Positional row parser

use crate::error::ParseError;
use crate::types::{TransactionRecord, ValueRange};

const COL_DATE_TIME: usize = 0;
const COL_CREDIT: usize = 1;
const COL_DEBIT: usize = 2;
const COL_CATEGORY: usize = 3;
const COL_AMOUNT: usize = 4;
const COL_PURPOSE: usize = 5;

/// Parse an amount cell, defaulting to zero on failure.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"50 INR"` reads as 50. Empty, non-numeric and non-finite input gives 0.
pub fn parse_amount(raw: &str) -> f64 {
    let prefix = numeric_prefix(raw.trim_start());
    if prefix.is_empty() {
        return 0.0;
    }

    match prefix.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Longest prefix of `s` shaped like a decimal float literal
fn numeric_prefix(s: &str) -> &str {
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut digits = i - int_start;

    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }

    if digits == 0 {
        return "";
    }

    // Exponent only counts when at least one digit follows it
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    &s[..i]
}

fn cell(row: &[String], index: usize) -> String {
    row.get(index).cloned().unwrap_or_default()
}

/// Parse one row positionally. Short rows are padded with empty cells.
pub fn parse_row(row: &[String]) -> TransactionRecord {
    TransactionRecord {
        date_time: cell(row, COL_DATE_TIME),
        credit_label: cell(row, COL_CREDIT),
        debit_label: cell(row, COL_DEBIT),
        category: cell(row, COL_CATEGORY),
        amount: row.get(COL_AMOUNT).map(|s| parse_amount(s)).unwrap_or(0.0),
        purpose: cell(row, COL_PURPOSE),
    }
}

/// Parse all rows, preserving input order (oldest first)
pub fn parse_rows(rows: &[Vec<String>]) -> Vec<TransactionRecord> {
    rows.iter().map(|row| parse_row(row)).collect()
}

/// Decode a Sheets `values` response body
pub fn parse_value_range(body: &str) -> Result<ValueRange, ParseError> {
    Ok(serde_json::from_str(body)?)
}

// ==================== Tests ====================
