//! Errors raised while loading `config.yaml`
//!
//! The binary prints [`ConfigErrorDetails`] and exits, so every variant
//! carries enough to point the user at the offending file, line or field.

use serde::Serialize;
use thiserror::Error;

/// Stable codes printed in front of startup errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConfigErrorCode {
    FileNotFound,
    Unreadable,
    InvalidYaml,
    MissingField,
    InvalidValue,
}

impl ConfigErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigErrorCode::FileNotFound => "FILE_NOT_FOUND",
            ConfigErrorCode::Unreadable => "UNREADABLE",
            ConfigErrorCode::InvalidYaml => "INVALID_YAML",
            ConfigErrorCode::MissingField => "MISSING_FIELD",
            ConfigErrorCode::InvalidValue => "INVALID_VALUE",
        }
    }
}

impl std::fmt::Display for ConfigErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the binary prints when the config is rejected
#[derive(Debug, Clone, Serialize)]
pub struct ConfigErrorDetails {
    pub code: ConfigErrorCode,
    pub message: String,
    /// Dotted path such as `polling.interval_secs`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// `line L, column C` inside the YAML file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl std::fmt::Display for ConfigErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref field) = self.field {
            write!(f, "\nField: {}", field)?;
        }
        if let Some(ref location) = self.location {
            write!(f, "\nAt: {}", location)?;
        }
        for suggestion in &self.suggestions {
            write!(f, "\n  hint: {}", suggestion)?;
        }
        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    FileNotFound { path: String },

    #[error("Could not read {path}: {message}")]
    Unreadable { path: String, message: String },

    /// `line` and `column` are 1-based when serde_yaml knows them
    #[error("Invalid YAML: {message}")]
    InvalidYaml {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(error: serde_yaml::Error) -> Self {
        let location = error.location();
        ConfigError::InvalidYaml {
            message: error.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}

impl ConfigError {
    pub fn code(&self) -> ConfigErrorCode {
        match self {
            ConfigError::FileNotFound { .. } => ConfigErrorCode::FileNotFound,
            ConfigError::Unreadable { .. } => ConfigErrorCode::Unreadable,
            ConfigError::InvalidYaml { .. } => ConfigErrorCode::InvalidYaml,
            ConfigError::MissingField { .. } => ConfigErrorCode::MissingField,
            ConfigError::InvalidValue { .. } => ConfigErrorCode::InvalidValue,
        }
    }

    /// Config key the error is about, if any
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingField { field } | ConfigError::InvalidValue { field, .. } => {
                Some(field)
            }
            _ => None,
        }
    }

    pub fn to_details(&self) -> ConfigErrorDetails {
        let location = match self {
            ConfigError::InvalidYaml {
                line: Some(line),
                column,
                ..
            } => Some(match column {
                Some(column) => format!("line {}, column {}", line, column),
                None => format!("line {}", line),
            }),
            _ => None,
        };

        let suggestions = match self {
            ConfigError::FileNotFound { .. } => vec![
                "Pass the file with --config <path>.".to_string(),
                "Run with --print-default-config > config.yaml to create one.".to_string(),
            ],
            ConfigError::Unreadable { .. } => {
                vec!["Check the file permissions.".to_string()]
            }
            ConfigError::InvalidYaml { .. } => vec![
                "Compare your file against the output of --print-default-config.".to_string(),
            ],
            ConfigError::MissingField { field } => {
                vec![format!("Add '{}' to your config file.", field)]
            }
            ConfigError::InvalidValue { .. } => vec![],
        };

        ConfigErrorDetails {
            code: self.code(),
            message: self.to_string(),
            field: self.field().map(str::to_string),
            location,
            suggestions,
        }
    }
}

pub type ConfigResult<T> = Result<T, ConfigError>;
