//! Export of laid-out diagrams.
//!
//! # Pipeline Position
//!
//! ```text
//! JSON payload
//!     ↓ descriptor
//! Semantic Model (Diagram)
//!     ↓ layout / interaction
//! PositionMap + EdgeRoutes
//!     ↓ export (this module)
//! SVG document
//! ```
//!
//! # Available Backends
//!
//! - [`svg`] - SVG output via [`svg::SvgRenderer`]
//!
//! # Error Handling
//!
//! Export operations return [`Error`], which converts into
//! [`NotegraphError::Export`] at the crate boundary.
//!
//! [`NotegraphError::Export`]: crate::NotegraphError::Export

pub mod svg;

use thiserror::Error;

/// Errors that can occur during diagram export.
#[derive(Debug, Error)]
pub enum Error {
    /// A rendering failure described by the message.
    #[error("Render error: {0}")]
    Render(String),

    /// An I/O error encountered while writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
