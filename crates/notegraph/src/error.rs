//! Error types for notegraph operations.
//!
//! This module provides the main error type [`NotegraphError`] which wraps
//! the error conditions of loading, configuring and exporting diagrams.
//! Layout, edge routing and dragging cannot fail and never produce one.

use std::io;

use thiserror::Error;

/// The main error type for notegraph operations.
///
/// # Diagnostic Variants
///
/// The `Parse` variant keeps the JSON source next to the decoder error, so a
/// reporter can point at the offending line and column.
#[derive(Debug, Error)]
pub enum NotegraphError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Parse {
        err: serde_json::Error,
        src: String,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for NotegraphError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl NotegraphError {
    /// Create a new `Parse` error with the associated source text.
    pub fn new_parse_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Parse {
            err,
            src: src.into(),
        }
    }
}
