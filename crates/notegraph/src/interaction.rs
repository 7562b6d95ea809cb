//! Interactive repositioning of laid-out nodes.
//!
//! A [`DiagramView`] owns the live positions of one rendered diagram. It is
//! seeded by the layout engine, mutated by pointer drags and restored by
//! [`DiagramView::reset`]. Views never share state: two views built from the
//! same descriptor move independently.
//!
//! # Drag lifecycle
//!
//! ```text
//!            pointer_down(node)
//!   Idle ───────────────────────▶ Dragging { node, offset }
//!    ▲                              │    │
//!    │   pointer_up / cancel /      │    │ pointer_move
//!    └───── reset / drop ───────────┘    └──▶ clamp, store
//! ```
//!
//! The controller does not read pointer coordinates directly. Screen points go
//! through a [`CoordinateMapper`] into logical canvas space, and the global
//! pointer listener is represented by a [`CaptureGuard`] obtained from a
//! [`PointerHost`] that lives exactly as long as the drag.
//!
//! # Submodules
//!
//! - [`transform`] - Screen to canvas coordinate mapping
//! - [`capture`] - Scoped ownership of the document-wide pointer listener

pub mod capture;
mod controller;
pub mod transform;

pub use capture::{CaptureGuard, DetachedHost, PointerHost};
pub use controller::{DiagramView, DragBounds, DragState};
pub use transform::{CoordinateMapper, ViewTransform};
