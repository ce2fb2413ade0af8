//! Error handling for CookVis-RS
//!
//! This module defines the crate error type and a Result alias for use
//! throughout the library.
//!
//! Errors come in two tiers. A document that cannot be split into a preamble
//! and a table is fatal ([`CookVisError::MalformedDocument`]). A single data
//! line that fails to decode produces [`CookVisError::InvalidField`], which the
//! codec turns into a dropped row rather than a failed load.

use thiserror::Error;

/// Main error type for CookVis-RS operations
#[derive(Error, Debug)]
pub enum CookVisError {
    /// The text has no blank-line separator between the preamble and the table
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// A required column is missing or does not parse to its declared type
    #[error("Invalid value {value:?} for field {field}")]
    InvalidField { field: String, value: Option<String> },

    /// Errors related to settings loading/saving
    #[error("Configuration error: {0}")]
    Config(String),

    /// Errors reported by the cloud storage collaborator
    #[error("Transport error: {0}")]
    Transport(String),

    /// A downloaded document exceeds the accepted size
    #[error("File too large: {size} bytes (maximum {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<CookVisError>,
    },
}

impl CookVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        CookVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Build an [`CookVisError::InvalidField`] for a column header
    pub fn invalid_field(field: impl Into<String>, value: Option<&str>) -> Self {
        CookVisError::InvalidField {
            field: field.into(),
            value: value.map(str::to_string),
        }
    }

    /// Whether this error (or the error it wraps) is a malformed document
    pub fn is_malformed_document(&self) -> bool {
        match self {
            CookVisError::MalformedDocument(_) => true,
            CookVisError::WithContext { source, .. } => source.is_malformed_document(),
            _ => false,
        }
    }
}

impl From<serde_json::Error> for CookVisError {
    fn from(err: serde_json::Error) -> Self {
        CookVisError::Serialization(err.to_string())
    }
}

/// Result type alias for CookVis-RS operations
pub type Result<T> = std::result::Result<T, CookVisError>;

/// Extension trait for adding context to Results
pub trait ResultExt<T> {
    /// Add context to an error result
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context lazily to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.with_context(f()))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| CookVisError::Io(e).with_context(context))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| CookVisError::Io(e).with_context(f()))
    }
}
