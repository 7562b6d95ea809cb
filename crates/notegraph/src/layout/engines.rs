//! Placement engines, one per [`LayoutFamily`](notegraph_core::semantic::LayoutFamily).
//!
//! Each engine is a stateless unit struct; [`LayoutEngine`](super::LayoutEngine)
//! picks one by the diagram kind's family.

pub mod layered;
pub mod linear;
pub mod radial;

use notegraph_core::semantic::Node;

use crate::layout::{Canvas, PositionMap};

/// Trait implemented by every placement rule.
pub trait PlacementEngine {
    /// Compute one position per node id on `canvas`.
    ///
    /// When ids repeat, the later node's position wins.
    fn place(&self, nodes: &[Node], canvas: &Canvas) -> PositionMap;
}
