//! Row-per-level placement for trees.

use std::collections::BTreeMap;

use log::trace;

use notegraph_core::{geometry::Point, semantic::Node};

use crate::layout::{
    Canvas, PositionMap, engines::PlacementEngine, positioning::distribute_slots,
};

/// Places each tree level on its own row.
///
/// The padded height is split into `max_level + 1` bands; a row sits at the
/// top of its band nudged down by the canvas row offset. Within a row nodes
/// keep input order and share the full padded width. Rows are processed in
/// ascending level order.
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl PlacementEngine for Engine {
    fn place(&self, nodes: &[Node], canvas: &Canvas) -> PositionMap {
        let mut rows: BTreeMap<i32, Vec<&Node>> = BTreeMap::new();
        for node in nodes {
            rows.entry(node.level_or_default()).or_default().push(node);
        }

        let content = canvas.content_bounds();
        let max_level = rows.keys().copied().max().unwrap_or(0).max(0);
        // Counted in f32 so a level of `i32::MAX` cannot overflow.
        let level_height = content.height() / (max_level as f32 + 1.0);

        let mut positions = PositionMap::with_capacity(nodes.len());
        for (level, row) in &rows {
            let y = content.min_y() + *level as f32 * level_height + canvas.row_offset();
            trace!(level = *level, nodes_count = row.len(), y = y; "Placing tree row");

            let xs = distribute_slots(content.min_x(), content.width(), row.len());
            for (node, x) in row.iter().zip(xs) {
                positions.insert(node.id(), Point::new(x, y));
            }
        }
        positions
    }
}
