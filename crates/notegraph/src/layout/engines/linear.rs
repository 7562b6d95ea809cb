//! Single-row placement for linked lists.

use notegraph_core::{geometry::Point, semantic::Node};

use crate::layout::{
    Canvas, PositionMap, engines::PlacementEngine, positioning::distribute_slots,
};

/// Places nodes left to right at mid-height, one equal slot per node.
///
/// Input order is the list order and is preserved.
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl PlacementEngine for Engine {
    fn place(&self, nodes: &[Node], canvas: &Canvas) -> PositionMap {
        let content = canvas.content_bounds();
        let y = canvas.size().height() / 2.0;

        let mut positions = PositionMap::with_capacity(nodes.len());
        for (node, x) in nodes
            .iter()
            .zip(distribute_slots(content.min_x(), content.width(), nodes.len()))
        {
            positions.insert(node.id(), Point::new(x, y));
        }
        positions
    }
}
