// src/error.rs

//! Unified error handling for the catalog scraper.

use std::fmt;

use thiserror::Error;

/// Result type alias for scraper operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSV writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Pattern failed to compile
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Request timed out before a response arrived
    #[error("Timed out loading {url}")]
    Timeout { url: String },

    /// Server answered with a non-success status
    #[error("HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    /// A page kept failing after every retry attempt
    #[error("Giving up on {url} after {attempts} attempts: {message}")]
    PageLoad {
        url: String,
        attempts: u32,
        message: String,
    },

    /// No page has been loaded into the session yet
    #[error("No page loaded in session")]
    NoPage,

    /// Expected element is not on the current page
    #[error("No element matches '{selector}'")]
    NotFound { selector: String },

    /// Extraction of a page region failed
    #[error("Extraction error for {context}: {message}")]
    Extract { context: String, message: String },

    /// Table is missing a column the transform depends on
    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a not-found error for a selector.
    pub fn not_found(selector: impl Into<String>) -> Self {
        Self::NotFound {
            selector: selector.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create an extraction error with context.
    pub fn extract(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Extract {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create a missing-column error.
    pub fn missing_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Whether reloading the same page might succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}
