//! Ring placement for general graphs, directed graphs and flowcharts.

use std::f32::consts::{FRAC_PI_2, TAU};

use notegraph_core::{geometry::Point, semantic::Node};

use crate::layout::{Canvas, PositionMap, engines::PlacementEngine};

/// Places nodes evenly on a circle around the canvas center.
///
/// The first node sits at the top and the rest follow clockwise. The radius is
/// half the shorter canvas side minus the padding and the ring inset.
#[derive(Debug, Default, Clone, Copy)]
pub struct Engine;

impl Engine {
    /// Radius of the ring on `canvas`.
    pub fn radius(canvas: &Canvas) -> f32 {
        let size = canvas.size();
        size.width().min(size.height()) / 2.0 - canvas.padding() - canvas.ring_inset()
    }
}

impl PlacementEngine for Engine {
    fn place(&self, nodes: &[Node], canvas: &Canvas) -> PositionMap {
        let center = canvas.center();
        let radius = Self::radius(canvas);
        let angle_step = TAU / nodes.len().max(1) as f32;

        let mut positions = PositionMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            let angle = angle_step * index as f32 - FRAC_PI_2;
            positions.insert(node.id(), Point::on_circle(center, radius, angle));
        }
        positions
    }
}
