//! Error types for sheetdash-core
//!
//! Every failure of a refresh cycle ends up here: it is logged, converted
//! into a sync status for the dashboard, and never escapes the poll loop.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Network or HTTP failure reaching the data source
    FetchError,
    /// Data source returned no rows
    EmptyData,
    /// Response body could not be decoded
    InvalidResponse,
    /// Configuration error
    ConfigError,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FetchError => write!(f, "FETCH_ERROR"),
            ErrorCode::EmptyData => write!(f, "EMPTY_DATA"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Warning - the next cycle will likely recover
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - the dashboard cannot work until fixed
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for sheetdash-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("{message}")]
    Fetch { message: String },

    #[error("No data found in the spreadsheet")]
    EmptyData,

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::Fetch { .. } => ErrorCode::FetchError,
            CoreError::EmptyData => ErrorCode::EmptyData,
            CoreError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::Fetch { .. } => ErrorSeverity::Warning,
            CoreError::EmptyData => ErrorSeverity::Warning,
            CoreError::InvalidResponse { .. } => ErrorSeverity::Error,
            CoreError::ConfigError { .. } => ErrorSeverity::Critical,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::Fetch { .. } => {
                details = details.with_suggestion(
                    "Check network access to the Sheets API.".to_string()
                );
                details = details.with_suggestion(
                    "Verify the API key and that the sheet is shared for reading.".to_string()
                );
            }
            CoreError::EmptyData => {
                details = details.with_suggestion(
                    "Check that source.range covers the rows holding transactions.".to_string()
                );
            }
            CoreError::InvalidResponse { message } => {
                details = details.with_detail(serde_json::json!({ "decode_message": message }));
                details = details.with_suggestion(
                    "Check that source.base_url points at the Sheets API.".to_string()
                );
            }
            CoreError::ConfigError { message } => {
                details = details.with_suggestion(message.clone());
            }
            CoreError::InternalError { .. } => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<reqwest::Error> for CoreError {
    fn from(error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "Request timed out".to_string()
        } else if error.is_connect() {
            "Could not connect to the data source".to_string()
        } else {
            // Drop the URL: it carries the API key.
            error.without_url().to_string()
        };
        CoreError::Fetch { message }
    }
}

impl From<sheetdash_parser::ParseError> for CoreError {
    fn from(error: sheetdash_parser::ParseError) -> Self {
        CoreError::InvalidResponse {
            message: error.to_string(),
        }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        match error.severity() {
            ErrorSeverity::Warning => log::warn!(
                target: "sheetdash::error",
                "[{}] {} - Operation: {} - Context: {}",
                error.code(),
                error,
                context.operation,
                context.data
            ),
            _ => log::error!(
                target: "sheetdash::error",
                "[{}] {} - Operation: {} - Context: {}",
                error.code(),
                error.to_details(),
                context.operation,
                context.data
            ),
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::FetchError.to_string(), "FETCH_ERROR");
        assert_eq!(ErrorCode::EmptyData.to_string(), "EMPTY_DATA");
        assert_eq!(ErrorCode::InvalidResponse.to_string(), "INVALID_RESPONSE");
    }

    #[test]
    fn test_fetch_message_is_shown_verbatim() {
        let error = CoreError::Fetch {
            message: "HTTP error! status: 403".to_string(),
        };
        assert_eq!(error.to_string(), "HTTP error! status: 403");
        assert_eq!(error.code(), ErrorCode::FetchError);
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_empty_data_message() {
        let error = CoreError::EmptyData;
        assert_eq!(error.to_string(), "No data found in the spreadsheet");
        assert_eq!(error.severity(), ErrorSeverity::Warning);
    }

    #[test]
    fn test_error_details_invalid_response() {
        let error = CoreError::InvalidResponse {
            message: "expected value at line 1".to_string(),
        };
        let details = error.to_details();

        assert_eq!(details.code, ErrorCode::InvalidResponse);
        assert!(details.details.is_some());
        assert!(!details.suggestions.is_empty());
    }

    #[test]
    fn test_parse_error_conversion() {
        let parse_err = sheetdash_parser::parse_value_range("not json").unwrap_err();
        let error: CoreError = parse_err.into();
        assert_eq!(error.code(), ErrorCode::InvalidResponse);
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("refresh_cycle")
            .with_data("range", serde_json::json!("Sheet1!A2:F"));

        assert_eq!(context.operation, "refresh_cycle");
        assert_eq!(context.data["range"], "Sheet1!A2:F");
    }
}
