//! Error handling for the pvvis visualization core
//!
//! This module defines custom error types and a Result alias for use
//! throughout the crate.

use thiserror::Error;

/// Main error type for pvvis operations
#[derive(Error, Debug)]
pub enum PvVisError {
    /// A caller requested a variable name that is not registered with the widget
    #[error("unknown variable: {name}")]
    InvalidSelection { name: String },

    /// The controller failed to produce a value (transport error, timeout,
    /// stale/uninitialized PV)
    #[error("fetch failed for {name}: {message}")]
    Fetch { name: String, message: String },

    /// Missing or invalid construction parameters
    #[error("configuration error: {0}")]
    Config(String),

    /// A fetched image payload is inconsistent with its declared shape
    #[error("malformed image payload for {name}: expected {expected} pixels, got {actual}")]
    MalformedPayload {
        name: String,
        expected: usize,
        actual: usize,
    },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization errors
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Generic errors with context
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<PvVisError>,
    },
}

impl PvVisError {
    /// Add context to an error
    pub fn with_context(self, context: impl Into<String>) -> Self {
        PvVisError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Create a fetch error for the given variable
    pub fn fetch(name: impl Into<String>, message: impl Into<String>) -> Self {
        PvVisError::Fetch {
            name: name.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for pvvis operations
pub type Result<T> = std::result::Result<T, PvVisError>;

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
