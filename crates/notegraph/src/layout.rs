//! Layout engine for positioning diagram nodes.
//!
//! Layout is a pure, deterministic function of the node list and the diagram
//! kind. Every node id receives exactly one position on a fixed logical canvas;
//! there is no iterative solver and no failure mode.
//!
//! # Pipeline Position
//!
//! ```text
//! Semantic Model (Diagram)
//!     ↓ layout (this module)
//! PositionMap
//!     ↓ interaction / edge routing
//! Rendered diagram
//! ```
//!
//! # Submodules
//!
//! - [`positioning`] - Slot distribution shared by the row-based engines
//!
//! # Placement rules
//!
//! | Family | Kinds | Rule |
//! |--------|-------|------|
//! | Linear | `linked-list` | one row at mid-height, equal slots in input order |
//! | Layered | `tree`, `binary-tree` | one row per level, equal slots per row |
//! | Radial | `graph`, `directed`, `flowchart` | evenly spaced on a circle, clockwise from the top |

mod engines;
pub mod positioning;

use indexmap::IndexMap;
use log::{debug, trace};

use notegraph_core::{
    geometry::{Bounds, Insets, Point, Size},
    identifier::Id,
    semantic::{DiagramKind, LayoutFamily, Node},
};

use engines::PlacementEngine;

/// The fixed logical drawing area all layout math is expressed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    size: Size,
    padding: f32,
    row_offset: f32,
    ring_inset: f32,
}

impl Canvas {
    /// Create a canvas of the given size with the default padding and offsets.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Set the padding kept free on every side.
    pub fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the downward nudge applied to every tree row.
    pub fn with_row_offset(mut self, row_offset: f32) -> Self {
        self.row_offset = row_offset;
        self
    }

    /// Set how far inside the padding the radial ring sits.
    pub fn with_ring_inset(mut self, ring_inset: f32) -> Self {
        self.ring_inset = ring_inset;
        self
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn padding(&self) -> f32 {
        self.padding
    }

    pub fn row_offset(&self) -> f32 {
        self.row_offset
    }

    pub fn ring_inset(&self) -> f32 {
        self.ring_inset
    }

    /// The whole canvas as bounds anchored at the origin.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(Point::default(), self.size)
    }

    /// The canvas minus its padding.
    pub fn content_bounds(&self) -> Bounds {
        self.bounds().inset(Insets::uniform(self.padding))
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            size: Size::new(600.0, 400.0),
            padding: 60.0,
            row_offset: 30.0,
            ring_inset: 20.0,
        }
    }
}

/// Node positions keyed by node id.
///
/// Iteration follows insertion order. Inserting an id that is already present
/// replaces its position but keeps its original slot in the order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PositionMap {
    positions: IndexMap<Id, Point>,
}

impl PositionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: IndexMap::with_capacity(capacity),
        }
    }

    pub fn get(&self, id: Id) -> Option<Point> {
        self.positions.get(&id).copied()
    }

    pub fn contains(&self, id: Id) -> bool {
        self.positions.contains_key(&id)
    }

    /// Insert or replace a position, returning the previous one.
    pub fn insert(&mut self, id: Id, position: Point) -> Option<Point> {
        self.positions.insert(id, position)
    }

    /// Replace the position of an id that is already present.
    ///
    /// Returns `false`, leaving the map untouched, when the id is unknown.
    pub fn update(&mut self, id: Id, position: Point) -> bool {
        match self.positions.get_mut(&id) {
            Some(slot) => {
                *slot = position;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Id, Point)> + '_ {
        self.positions.iter().map(|(id, point)| (*id, *point))
    }

    pub fn ids(&self) -> impl Iterator<Item = Id> + '_ {
        self.positions.keys().copied()
    }
}

impl FromIterator<(Id, Point)> for PositionMap {
    fn from_iter<I: IntoIterator<Item = (Id, Point)>>(iter: I) -> Self {
        Self {
            positions: iter.into_iter().collect(),
        }
    }
}

/// Computes positions for a list of nodes on a [`Canvas`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutEngine {
    canvas: Canvas,
}

impl LayoutEngine {
    pub fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Lay out `nodes` according to the placement rule of `kind`.
    ///
    /// Total and deterministic: the same input always yields the same map, and
    /// an empty node list yields an empty map.
    pub fn calculate(&self, nodes: &[Node], kind: DiagramKind) -> PositionMap {
        let family = kind.family();
        debug!(kind:% = kind, family:? = family, nodes_count = nodes.len(); "Calculating layout");

        let engine: &dyn PlacementEngine = match family {
            LayoutFamily::Linear => &engines::linear::Engine,
            LayoutFamily::Layered => &engines::layered::Engine,
            LayoutFamily::Radial => &engines::radial::Engine,
        };
        let positions = engine.place(nodes, &self.canvas);

        trace!(positions:? = positions; "Layout calculated");
        positions
    }
}

/// Lay out `nodes` for `kind` on the default 600×400 canvas.
pub fn compute_layout(nodes: &[Node], kind: DiagramKind) -> PositionMap {
    LayoutEngine::default().calculate(nodes, kind)
}
