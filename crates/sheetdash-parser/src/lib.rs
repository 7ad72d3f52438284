//! Spreadsheet row parser
//!
//! Turns the raw cell grid returned by the Sheets `values` endpoint into
//! typed [`TransactionRecord`]s. Parsing never fails: missing cells become
//! empty strings and malformed amounts become zero.

pub mod error;
pub mod parser;
pub mod types;

pub use error::ParseError;
pub use parser::{parse_amount, parse_row, parse_rows, parse_value_range};
pub use types::{Cell, TransactionRecord, ValueRange};
