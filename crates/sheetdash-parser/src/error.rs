//! Error types for sheetdash-parser
//!
//! Row parsing itself is total; only decoding of the API response body can fail.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Malformed response body: {0}")]
    InvalidJson(#[from] serde_json::Error),
}
