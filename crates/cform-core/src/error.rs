//! Application error types with rich context

use std::path::PathBuf;
use thiserror::Error;

use crate::schema::SchemaIssue;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Application error types organized by layer/domain
#[derive(Debug, Error)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Common/Infrastructure Errors
    // ─────────────────────────────────────────────────────────────
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Terminal/TUI Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Terminal error: {message}")]
    Terminal { message: String },

    #[error("Failed to initialize terminal: {0}")]
    TerminalInit(String),

    // ─────────────────────────────────────────────────────────────
    // Schema Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Schema file not found: {path}")]
    SchemaNotFound { path: PathBuf },

    #[error("Invalid schema document: {}", format_issues(.issues))]
    SchemaInvalid { issues: Vec<SchemaIssue> },

    #[error("Initial value must be a JSON object, got {kind}")]
    InvalidInitialValue { kind: &'static str },

    #[error("Invalid key mapping '{mapping}': expected NAME=PATH")]
    InvalidKeyMapping { mapping: String },

    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

fn format_issues(issues: &[SchemaIssue]) -> String {
    issues
        .iter()
        .map(|issue| issue.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ─────────────────────────────────────────────────────────────────
// Convenience Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    pub fn terminal(message: impl Into<String>) -> Self {
        Self::Terminal {
            message: message.into(),
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    pub fn schema_not_found(path: impl Into<PathBuf>) -> Self {
        Self::SchemaNotFound { path: path.into() }
    }

    pub fn schema_invalid(issues: Vec<SchemaIssue>) -> Self {
        Self::SchemaInvalid { issues }
    }

    pub fn invalid_key_mapping(mapping: impl Into<String>) -> Self {
        Self::InvalidKeyMapping { mapping: mapping.into() }
    }

    /// Check if this is a recoverable error
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Config { .. } | Error::Terminal { .. })
    }

    /// Check if this error should trigger application exit
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Error::SchemaNotFound { .. }
                | Error::SchemaInvalid { .. }
                | Error::InvalidInitialValue { .. }
                | Error::InvalidKeyMapping { .. }
                | Error::TerminalInit(_)
        )
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Context Extensions (for use with color-eyre)
// ─────────────────────────────────────────────────────────────────

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", context.into(), err);
            err
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err = e.into();
            tracing::error!("{}: {:?}", f(), err);
            err
        })
    }
}
