//! Semantic diagram model types.
//!
//! These types describe a diagram exactly as the analysis service hands it
//! over: typed nodes, edges between them and a diagram kind. They carry no
//! positions; layout derives those separately.
//!
//! # Pipeline Position
//!
//! ```text
//! Analysis service JSON
//!     ↓ descriptor loading
//! Semantic Model (these types)
//!     ↓ layout
//! PositionMap  ⇄  interaction (drag / reset)
//!     ↓ export
//! SVG
//! ```
//!
//! # Organization
//!
//! - [`diagram`] - [`Diagram`], [`DiagramKind`], [`LayoutFamily`]
//! - [`element`] - [`Node`], [`Edge`]

pub mod diagram;
pub mod element;

pub use diagram::*;
pub use element::*;
