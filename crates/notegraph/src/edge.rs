//! Edge endpoint geometry.
//!
//! Edges are straight lines between node centers, shortened so they start and
//! end on the node circles instead of under them. Directional edges are
//! shortened a little more at the destination to leave room for the arrowhead.

use log::debug;

use notegraph_core::{
    geometry::Point,
    identifier::Id,
    semantic::Diagram,
};

use crate::layout::PositionMap;

/// A straight line segment in logical canvas space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    start: Point,
    end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }
}

/// Radii and offsets used to trim edges and place their labels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeGeometry {
    node_radius: f32,
    arrow_gap: f32,
    label_lift: f32,
}

impl EdgeGeometry {
    pub fn new(node_radius: f32, arrow_gap: f32) -> Self {
        Self {
            node_radius,
            arrow_gap,
            ..Self::default()
        }
    }

    /// Set how far above the segment midpoint the edge label sits.
    pub fn with_label_lift(mut self, label_lift: f32) -> Self {
        self.label_lift = label_lift;
        self
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn arrow_gap(&self) -> f32 {
        self.arrow_gap
    }

    pub fn label_lift(&self) -> f32 {
        self.label_lift
    }

    /// Trim the center-to-center line between `from` and `to`.
    ///
    /// The start moves `node_radius` towards `to`; the end moves back
    /// `node_radius` (plus `arrow_gap` when `directional`) towards `from`.
    /// Returns `None` when the centers coincide, since no direction exists.
    pub fn trim(&self, from: Point, to: Point, directional: bool) -> Option<Segment> {
        let delta = to.sub_point(from);
        let distance = delta.hypot();
        if distance == 0.0 {
            return None;
        }

        let unit = delta.scale(1.0 / distance);
        let end_trim = if directional {
            self.node_radius + self.arrow_gap
        } else {
            self.node_radius
        };

        Some(Segment::new(
            from.add_point(unit.scale(self.node_radius)),
            to.sub_point(unit.scale(end_trim)),
        ))
    }
}

impl Default for EdgeGeometry {
    fn default() -> Self {
        Self {
            node_radius: 25.0,
            arrow_gap: 8.0,
            label_lift: 8.0,
        }
    }
}

/// Trim an edge using the default arrow gap.
///
/// # Examples
///
/// ```
/// use notegraph::edge::trim_segment;
/// use notegraph_core::geometry::Point;
///
/// let segment = trim_segment(Point::new(0.0, 0.0), Point::new(100.0, 0.0), 25.0, true).unwrap();
/// assert_eq!(segment.start(), Point::new(25.0, 0.0));
/// assert_eq!(segment.end(), Point::new(67.0, 0.0));
///
/// assert!(trim_segment(Point::new(5.0, 5.0), Point::new(5.0, 5.0), 25.0, false).is_none());
/// ```
pub fn trim_segment(from: Point, to: Point, radius: f32, directional: bool) -> Option<Segment> {
    EdgeGeometry::new(radius, EdgeGeometry::default().arrow_gap()).trim(from, to, directional)
}

/// A drawable edge: trimmed segment plus label placement.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeRoute {
    source: Id,
    target: Id,
    segment: Segment,
    label: Option<String>,
    label_anchor: Point,
    directional: bool,
}

impl EdgeRoute {
    pub fn source(&self) -> Id {
        self.source
    }

    pub fn target(&self) -> Id {
        self.target
    }

    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Where the label text is anchored (centered horizontally).
    pub fn label_anchor(&self) -> Point {
        self.label_anchor
    }

    /// Whether the route ends in an arrowhead.
    pub fn is_directional(&self) -> bool {
        self.directional
    }
}

/// Compute the drawable edges of `diagram` for the given positions.
///
/// Routes keep the input order of the edges. An edge is skipped, without
/// affecting the others, when either endpoint has no position or when both
/// endpoints share the same position.
pub fn route_edges(
    diagram: &Diagram,
    positions: &PositionMap,
    geometry: &EdgeGeometry,
) -> Vec<EdgeRoute> {
    let directional = diagram.kind().is_directional();

    diagram
        .edges()
        .iter()
        .filter_map(|edge| {
            let (Some(from), Some(to)) =
                (positions.get(edge.source()), positions.get(edge.target()))
            else {
                debug!(
                    source:% = edge.source(),
                    target:% = edge.target();
                    "Skipping edge with a missing endpoint"
                );
                return None;
            };

            let Some(segment) = geometry.trim(from, to, directional) else {
                debug!(
                    source:% = edge.source(),
                    target:% = edge.target();
                    "Skipping edge between coincident nodes"
                );
                return None;
            };

            Some(EdgeRoute {
                source: edge.source(),
                target: edge.target(),
                segment,
                label: edge.label().map(str::to_string),
                label_anchor: segment.midpoint().offset_y(-geometry.label_lift()),
                directional,
            })
        })
        .collect()
}
