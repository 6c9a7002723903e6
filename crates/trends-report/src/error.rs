//! Error types for the shopping trends reporting library.
//!
//! All fallible operations return [`ReportingError`], built with `thiserror`.
//! Errors are serializable so a presentation layer can display them as
//! `{ code, message }` objects.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for loading and reporting.
#[derive(Error, Debug)]
pub enum ReportingError {
    /// The dataset file is missing, unreadable, or lacks required columns.
    #[error("Failed to load dataset: {0}")]
    DatasetLoad(String),

    /// A column outside the permitted set was requested.
    #[error("Invalid column: {0}")]
    InvalidColumn(String),

    /// A parameter was out of range (e.g. a top-N of zero).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The requested export format is not implemented.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<ReportingError>,
    },
}

impl ReportingError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        ReportingError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::DatasetLoad(_) => "DATASET_LOAD_ERROR",
            Self::InvalidColumn(_) => "INVALID_COLUMN",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error is recoverable.
    ///
    /// Recoverable errors come from a bad user selection; the previously
    /// displayed view stays valid and the caller only reports the message.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::InvalidColumn(_) | Self::InvalidArgument(_) | Self::UnsupportedFormat(_) => true,
            Self::WithContext { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for ReportingError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ReportingError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for reporting operations.
pub type Result<T> = std::result::Result<T, ReportingError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| ReportingError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            ReportingError::DatasetLoad("missing".to_string()).error_code(),
            "DATASET_LOAD_ERROR"
        );
        assert_eq!(
            ReportingError::InvalidColumn("Price".to_string()).error_code(),
            "INVALID_COLUMN"
        );
    }

    #[test]
    fn test_is_recoverable() {
        assert!(ReportingError::InvalidColumn("Price".to_string()).is_recoverable());
        assert!(ReportingError::InvalidArgument("n".to_string()).is_recoverable());
        assert!(ReportingError::UnsupportedFormat("xml".to_string()).is_recoverable());
        assert!(!ReportingError::DatasetLoad("missing".to_string()).is_recoverable());
    }

    #[test]
    fn test_error_serialization() {
        let error = ReportingError::InvalidColumn("Price".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("INVALID_COLUMN"));
        assert!(json.contains("Price"));
    }

    #[test]
    fn test_with_context() {
        let error = ReportingError::UnsupportedFormat("xml".to_string())
            .with_context("While exporting dataset");
        assert!(error.to_string().contains("While exporting dataset"));
        assert_eq!(error.error_code(), "UNSUPPORTED_FORMAT");
        assert!(error.is_recoverable());
    }
}
