//! Error types for salesboard-core
//!
//! Error codes, severities and detailed messages with suggestions for the
//! dataset loader and the combined view.

use salesboard_source::SourceError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Remote dataset could not be fetched or decoded
    FetchError,
    /// A step of the combined view failed
    UpstreamCallError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FetchError => write!(f, "FETCH_ERROR"),
            ErrorCode::UpstreamCallError => write!(f, "UPSTREAM_CALL_ERROR"),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    Warning,
    Error,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
        }
    }
}

/// Detailed error information for server-side logs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
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

    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, " | details: {}", details)?;
        }
        for suggestion in &self.suggestions {
            write!(f, " | hint: {}", suggestion)?;
        }
        Ok(())
    }
}

/// Main error type for salesboard-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Failed to fetch dataset from {location}: {source}")]
    FetchError {
        location: String,
        #[source]
        source: SourceError,
    },

    #[error("Combined view step '{operation}' failed: {message}")]
    UpstreamCallError { operation: String, message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FetchError { .. } => ErrorCode::FetchError,
            CoreError::UpstreamCallError { .. } => ErrorCode::UpstreamCallError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::FetchError { source, .. } if source.is_unreachable() => ErrorSeverity::Warning,
            CoreError::FetchError { .. } => ErrorSeverity::Error,
            CoreError::UpstreamCallError { .. } => ErrorSeverity::Error,
        }
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::FetchError { location, source } => {
                details = details.with_detail(serde_json::json!({ "location": location }));
                details = match source {
                    SourceError::Timeout { .. } => details.with_suggestion(
                        "Raise source.timeout_secs or check the network path to the dataset.".to_string(),
                    ),
                    SourceError::UnexpectedStatus { status, .. } => details.with_suggestion(format!(
                        "The dataset host answered {}; check source.url.",
                        status
                    )),
                    SourceError::InvalidPayload { .. } => details.with_suggestion(
                        "The dataset must be a JSON array of transaction objects.".to_string(),
                    ),
                    _ => details.with_suggestion("Check that source.url is reachable.".to_string()),
                };
                details = details.with_suggestion("The previously loaded data is still served.".to_string());
            }
            CoreError::UpstreamCallError { operation, .. } => {
                details = details.with_detail(serde_json::json!({ "operation": operation }));
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            data: serde_json::json!({}),
        }
    }

    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        let level = match error.severity() {
            ErrorSeverity::Warning => log::Level::Warn,
            ErrorSeverity::Error => log::Level::Error,
        };
        log::log!(
            target: "salesboard::error",
            level,
            "{} - Operation: {} - Context: {}",
            error.to_details(),
            context.operation,
            context.data
        );
    }
}

// ==================== Tests ====================
