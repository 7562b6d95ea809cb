use std::rc::Rc;

use log::{debug, trace};

use notegraph_core::{
    geometry::{Bounds, Insets, Point},
    identifier::Id,
    semantic::Diagram,
};

use crate::{
    edge::{EdgeGeometry, EdgeRoute, route_edges},
    interaction::{
        capture::{CaptureGuard, PointerHost},
        transform::CoordinateMapper,
    },
    layout::{Canvas, LayoutEngine, PositionMap},
};

/// The area a dragged node center is confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBounds {
    bounds: Bounds,
}

impl DragBounds {
    pub fn new(bounds: Bounds) -> Self {
        Self { bounds }
    }

    /// Keep a node of `node_radius` fully on `canvas`, plus `margin`.
    ///
    /// On a canvas too small for the inset, the bounds collapse onto the
    /// canvas center line of the affected axis.
    pub fn for_canvas(canvas: &Canvas, node_radius: f32, margin: f32) -> Self {
        let full = canvas.bounds();
        let inset = (node_radius + margin).max(0.0);
        let horizontal = inset.min(full.width() / 2.0);
        let vertical = inset.min(full.height() / 2.0);

        Self::new(full.inset(Insets::new(vertical, horizontal, vertical, horizontal)))
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Clamp each axis of `point` independently.
    pub fn clamp(&self, point: Point) -> Point {
        self.bounds.clamp_point(point)
    }
}

impl Default for DragBounds {
    fn default() -> Self {
        Self::for_canvas(&Canvas::default(), 25.0, 5.0)
    }
}

/// Observable drag state of a [`DiagramView`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging {
        node: Id,
        /// Pointer position minus node center, in logical units, fixed at
        /// press time.
        offset: Point,
    },
}

#[derive(Debug)]
struct ActiveDrag {
    node: Id,
    offset: Point,
    _capture: CaptureGuard,
}

/// Live, per-instance positions of one rendered diagram.
///
/// # Examples
///
/// ```
/// use notegraph::interaction::{DetachedHost, DiagramView, ViewTransform};
/// use notegraph_core::{
///     geometry::Point,
///     identifier::Id,
///     semantic::{Diagram, DiagramKind, Node},
/// };
///
/// let diagram = Diagram::new(
///     "Pair",
///     DiagramKind::LinkedList,
///     vec![Node::new("a", "A"), Node::new("b", "B")],
///     vec![],
/// );
/// let mut view = DiagramView::new(diagram);
/// let screen = ViewTransform::identity();
///
/// let a = view.position(Id::new("a")).unwrap();
/// assert!(view.pointer_down(Id::new("a"), a, &screen, &DetachedHost));
/// view.pointer_move(Point::new(1000.0, 1000.0), &screen);
/// view.pointer_up();
///
/// assert_eq!(view.position(Id::new("a")), Some(Point::new(570.0, 370.0)));
///
/// view.reset();
/// assert_eq!(view.position(Id::new("a")), Some(a));
/// ```
#[derive(Debug)]
pub struct DiagramView {
    diagram: Rc<Diagram>,
    engine: LayoutEngine,
    geometry: EdgeGeometry,
    drag_bounds: DragBounds,
    positions: PositionMap,
    drag: Option<ActiveDrag>,
}

impl DiagramView {
    /// Create a view on the default canvas.
    pub fn new(diagram: impl Into<Rc<Diagram>>) -> Self {
        Self::with_settings(
            diagram,
            LayoutEngine::default(),
            EdgeGeometry::default(),
            DragBounds::default(),
        )
    }

    /// Create a view with explicit layout, edge and drag settings.
    pub fn with_settings(
        diagram: impl Into<Rc<Diagram>>,
        engine: LayoutEngine,
        geometry: EdgeGeometry,
        drag_bounds: DragBounds,
    ) -> Self {
        let diagram = diagram.into();
        let positions = engine.calculate(diagram.nodes(), diagram.kind());
        debug!(title = diagram.title(), nodes_count = positions.len(); "Created diagram view");

        Self {
            diagram,
            engine,
            geometry,
            drag_bounds,
            positions,
            drag: None,
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn canvas(&self) -> &Canvas {
        self.engine.canvas()
    }

    pub fn drag_bounds(&self) -> DragBounds {
        self.drag_bounds
    }

    /// Current positions, including drag edits.
    pub fn positions(&self) -> &PositionMap {
        &self.positions
    }

    pub fn position(&self, node: Id) -> Option<Point> {
        self.positions.get(node)
    }

    pub fn drag_state(&self) -> DragState {
        match &self.drag {
            Some(drag) => DragState::Dragging {
                node: drag.node,
                offset: drag.offset,
            },
            None => DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start dragging `node` from the pointer position `screen`.
    ///
    /// Returns `false`, without capturing the pointer, when a drag is already
    /// active or when `node` has no position.
    pub fn pointer_down(
        &mut self,
        node: Id,
        screen: Point,
        mapper: &impl CoordinateMapper,
        host: &impl PointerHost,
    ) -> bool {
        if let Some(active) = &self.drag {
            debug!(node:% = node, active:% = active.node; "Ignoring press during active drag");
            return false;
        }

        let Some(current) = self.positions.get(node) else {
            debug!(node:% = node; "Ignoring press on unknown node");
            return false;
        };

        let offset = mapper.to_logical(screen).sub_point(current);
        debug!(node:% = node, offset:? = offset; "Drag started");

        self.drag = Some(ActiveDrag {
            node,
            offset,
            _capture: host.capture(),
        });
        true
    }

    /// Move the dragged node so it stays under the pointer, clamped to the
    /// drag bounds.
    ///
    /// Returns the stored position, or `None` while idle.
    pub fn pointer_move(&mut self, screen: Point, mapper: &impl CoordinateMapper) -> Option<Point> {
        let drag = self.drag.as_ref()?;

        let candidate = mapper.to_logical(screen).sub_point(drag.offset);
        let position = self.drag_bounds.clamp(candidate);
        if !self.positions.update(drag.node, position) {
            return None;
        }

        trace!(node:% = drag.node, x = position.x(), y = position.y(); "Node dragged");
        Some(position)
    }

    /// Finish the active drag, releasing the pointer capture.
    ///
    /// Returns the node that was being dragged.
    pub fn pointer_up(&mut self) -> Option<Id> {
        let drag = self.drag.take()?;
        debug!(node:% = drag.node; "Drag finished");
        Some(drag.node)
    }

    /// Abandon the active drag, for example when the pointer leaves the
    /// window. The node keeps its last position.
    pub fn cancel(&mut self) -> Option<Id> {
        let drag = self.drag.take()?;
        debug!(node:% = drag.node; "Drag cancelled");
        Some(drag.node)
    }

    /// Discard every drag edit by laying the diagram out again.
    ///
    /// An active drag is ended first.
    pub fn reset(&mut self) {
        if self.cancel().is_some() {
            debug!("Reset ended an active drag");
        }
        self.positions = self
            .engine
            .calculate(self.diagram.nodes(), self.diagram.kind());
        debug!(title = self.diagram.title(); "Positions reset");
    }

    /// Trimmed edges for the current positions.
    pub fn edge_routes(&self) -> Vec<EdgeRoute> {
        route_edges(&self.diagram, &self.positions, &self.geometry)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use notegraph_core::{
        geometry::Size,
        semantic::{DiagramKind, Edge, Node},
    };

    use super::*;
    use crate::{
        interaction::{capture::DetachedHost, transform::ViewTransform},
        layout::compute_layout,
    };

    fn graph() -> Diagram {
        Diagram::new(
            "Square",
            DiagramKind::Directed,
            vec![
                Node::new("a", "A"),
                Node::new("b", "B"),
                Node::new("c", "C"),
                Node::new("d", "D"),
            ],
            vec![Edge::new("a", "b"), Edge::new("b", "c"), Edge::new("c", "ghost")],
        )
    }

    fn id(name: &str) -> Id {
        Id::new(name)
    }

    /// A host that counts how many captures are currently held.
    struct CountingHost {
        held: Rc<Cell<i32>>,
    }

    impl CountingHost {
        fn new() -> Self {
            Self {
                held: Rc::new(Cell::new(0)),
            }
        }

        fn held(&self) -> i32 {
            self.held.get()
        }
    }

    impl PointerHost for CountingHost {
        fn capture(&self) -> CaptureGuard {
            self.held.set(self.held.get() + 1);
            let held = Rc::clone(&self.held);
            CaptureGuard::new(move || held.set(held.get() - 1))
        }
    }

    #[test]
    fn test_view_starts_at_computed_layout() {
        let diagram = graph();
        let view = DiagramView::new(diagram.clone());

        assert_eq!(
            view.positions(),
            &compute_layout(diagram.nodes(), diagram.kind())
        );
        assert_eq!(view.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_keeps_pointer_offset() {
        let mut view = DiagramView::new(graph());
        let identity = ViewTransform::identity();
        let start = view.position(id("a")).unwrap();

        // Grab 10 units right of the center.
        assert!(view.pointer_down(
            id("a"),
            start.add_point(Point::new(10.0, 0.0)),
            &identity,
            &DetachedHost
        ));
        let DragState::Dragging { node, offset } = view.drag_state() else {
            panic!("expected an active drag");
        };
        assert_eq!(node, id("a"));
        assert_approx_eq!(f32, offset.x(), 10.0, epsilon = 1e-3);
        assert_approx_eq!(f32, offset.y(), 0.0, epsilon = 1e-3);

        let moved = view.pointer_move(Point::new(210.0, 150.0), &identity).unwrap();
        assert_approx_eq!(f32, moved.x(), 200.0, epsilon = 1e-3);
        assert_approx_eq!(f32, moved.y(), 150.0, epsilon = 1e-3);
        assert_eq!(view.position(id("a")), Some(moved));
    }

    #[test]
    fn test_drag_only_moves_dragged_node() {
        let mut view = DiagramView::new(graph());
        let identity = ViewTransform::identity();
        let before = view.positions().clone();

        let b = view.position(id("b")).unwrap();
        view.pointer_down(id("b"), b, &identity, &DetachedHost);
        view.pointer_move(Point::new(100.0, 100.0), &identity);
        view.pointer_up();

        for (node, point) in before.iter() {
            if node == "b" {
                assert_eq!(view.position(node), Some(Point::new(100.0, 100.0)));
            } else {
                assert_eq!(view.position(node), Some(point));
            }
        }
    }

    #[test]
    fn test_drag_clamps_to_canvas() {
        let mut view = DiagramView::new(graph());
        let identity = ViewTransform::identity();
        let c = view.position(id("c")).unwrap();

        view.pointer_down(id("c"), c, &identity, &DetachedHost);
        assert_eq!(
            view.pointer_move(Point::new(1000.0, 1000.0), &identity),
            Some(Point::new(570.0, 370.0))
        );
        assert_eq!(
            view.pointer_move(Point::new(-50.0, 200.0), &identity),
            Some(Point::new(30.0, 200.0))
        );
    }

    #[test]
    fn test_drag_under_scaled_transform() {
        // Canvas drawn at half size, 100px from the left of the page.
        let viewport = Bounds::new_from_top_left(Point::new(100.0, 0.0), Size::new(300.0, 200.0));
        let transform = ViewTransform::fit(Size::new(600.0, 400.0), viewport);

        let mut view = DiagramView::new(graph());
        let a = view.position(id("a")).unwrap();
        let pressed = transform.to_screen(a);

        view.pointer_down(id("a"), pressed, &transform, &DetachedHost);
        let moved = view
            .pointer_move(pressed.add_point(Point::new(50.0, 25.0)), &transform)
            .unwrap();

        // 50x25 screen pixels are 100x50 logical units at half scale.
        assert_approx_eq!(f32, moved.x(), a.x() + 100.0, epsilon = 1e-3);
        assert_approx_eq!(f32, moved.y(), a.y() + 50.0, epsilon = 1e-3);
    }

    #[test]
    fn test_capture_lives_exactly_as_long_as_drag() {
        let host = CountingHost::new();
        let identity = ViewTransform::identity();
        let mut view = DiagramView::new(graph());
        let a = view.position(id("a")).unwrap();

        assert_eq!(host.held(), 0);
        view.pointer_down(id("a"), a, &identity, &host);
        assert_eq!(host.held(), 1);

        // A second press while dragging is ignored and captures nothing.
        assert!(!view.pointer_down(id("b"), a, &identity, &host));
        assert_eq!(host.held(), 1);

        assert_eq!(view.pointer_up(), Some(id("a")));
        assert_eq!(host.held(), 0);
        assert!(!view.is_dragging());
    }

    #[test]
    fn test_capture_released_on_cancel_reset_and_drop() {
        let host = CountingHost::new();
        let identity = ViewTransform::identity();
        let mut view = DiagramView::new(graph());
        let origin = view.position(id("a")).unwrap();

        view.pointer_down(id("a"), origin, &identity, &host);
        view.pointer_move(Point::new(320.0, 90.0), &identity);
        assert_eq!(view.cancel(), Some(id("a")));
        assert_eq!(host.held(), 0);
        assert_eq!(view.position(id("a")), Some(Point::new(320.0, 90.0)));

        view.pointer_down(id("a"), origin, &identity, &host);
        view.reset();
        assert_eq!(host.held(), 0);
        assert!(!view.is_dragging());

        view.pointer_down(id("a"), origin, &identity, &host);
        drop(view);
        assert_eq!(host.held(), 0);
    }

    #[test]
    fn test_unknown_node_is_ignored() {
        let host = CountingHost::new();
        let mut view = DiagramView::new(graph());
        let before = view.positions().clone();

        let pressed = view.pointer_down(
            id("ghost"),
            Point::new(1.0, 1.0),
            &ViewTransform::identity(),
            &host,
        );
        assert!(!pressed);
        assert_eq!(host.held(), 0);
        assert_eq!(view.positions(), &before);
    }

    #[test]
    fn test_idle_move_and_up_are_no_ops() {
        let mut view = DiagramView::new(graph());
        let before = view.positions().clone();

        assert_eq!(view.pointer_move(Point::new(5.0, 5.0), &ViewTransform::identity()), None);
        assert_eq!(view.pointer_up(), None);
        assert_eq!(view.cancel(), None);
        assert_eq!(view.positions(), &before);
    }

    #[test]
    fn test_reset_restores_layout() {
        let diagram = graph();
        let identity = ViewTransform::identity();
        let mut view = DiagramView::new(diagram.clone());

        for (node, target) in [("a", (40.0, 40.0)), ("c", (500.0, 300.0)), ("a", (90.0, 60.0))] {
            let current = view.position(id(node)).unwrap();
            view.pointer_down(id(node), current, &identity, &DetachedHost);
            view.pointer_move(Point::new(target.0, target.1), &identity);
            view.pointer_up();
        }
        assert_ne!(view.positions(), &compute_layout(diagram.nodes(), diagram.kind()));

        view.reset();
        assert_eq!(view.positions(), &compute_layout(diagram.nodes(), diagram.kind()));
    }

    #[test]
    fn test_views_are_independent() {
        let diagram = Rc::new(graph());
        let mut first = DiagramView::new(Rc::clone(&diagram));
        let second = DiagramView::new(Rc::clone(&diagram));
        let identity = ViewTransform::identity();

        let d = first.position(id("d")).unwrap();
        first.pointer_down(id("d"), d, &identity, &DetachedHost);
        first.pointer_move(Point::new(450.0, 60.0), &identity);
        first.pointer_up();

        assert_eq!(first.position(id("d")), Some(Point::new(450.0, 60.0)));
        assert_eq!(second.position(id("d")), Some(d));
    }

    #[test]
    fn test_edge_routes_follow_drag() {
        let mut view = DiagramView::new(graph());
        let identity = ViewTransform::identity();
        let before = view.edge_routes();
        assert_eq!(before.len(), 2);

        let b = view.position(id("b")).unwrap();
        view.pointer_down(id("b"), b, &identity, &DetachedHost);
        view.pointer_move(Point::new(300.0, 200.0), &identity);

        let after = view.edge_routes();
        assert_eq!(after.len(), 2);
        assert_ne!(before[0].segment(), after[0].segment());
        // a sits at (300, 80); b now at (300, 200) directly below.
        assert_approx_eq!(f32, after[0].segment().start().y(), 105.0, epsilon = 1e-3);
        assert_approx_eq!(f32, after[0].segment().end().y(), 167.0, epsilon = 1e-3);
    }

    #[test]
    fn test_drag_bounds_for_canvas() {
        let bounds = DragBounds::default().bounds();
        assert_eq!(bounds.min_x(), 30.0);
        assert_eq!(bounds.max_x(), 570.0);
        assert_eq!(bounds.min_y(), 30.0);
        assert_eq!(bounds.max_y(), 370.0);

        let tiny = DragBounds::for_canvas(&Canvas::new(Size::new(40.0, 100.0)), 25.0, 5.0);
        assert_eq!(tiny.bounds().min_x(), 20.0);
        assert_eq!(tiny.bounds().max_x(), 20.0);
        assert_eq!(tiny.clamp(Point::new(0.0, 0.0)), Point::new(20.0, 30.0));
    }

    #[test]
    fn test_drag_with_nan_bounds_does_not_panic() {
        let bounds = DragBounds::for_canvas(&Canvas::new(Size::new(f32::NAN, 400.0)), 25.0, 5.0);
        let mut view = DiagramView::with_settings(
            graph(),
            LayoutEngine::default(),
            EdgeGeometry::default(),
            bounds,
        );
        let identity = ViewTransform::identity();

        let a = view.position(id("a")).unwrap();
        assert!(view.pointer_down(id("a"), a, &identity, &DetachedHost));
        let stored = view
            .pointer_move(Point::new(1000.0, 1000.0), &identity)
            .unwrap();

        assert_eq!(stored.y(), 370.0);
        assert!(stored.x() >= 30.0);
        assert_eq!(view.pointer_up(), Some(id("a")));
    }

    proptest! {
        #[test]
        fn dragged_positions_stay_in_bounds(
            moves in prop::collection::vec((-2000.0f32..2000.0, -2000.0f32..2000.0), 1..20),
        ) {
            let mut view = DiagramView::new(graph());
            let identity = ViewTransform::identity();
            let a = view.position(id("a")).unwrap();
            view.pointer_down(id("a"), a, &identity, &DetachedHost);

            for (x, y) in moves {
                let stored = view.pointer_move(Point::new(x, y), &identity).unwrap();
                prop_assert!(view.drag_bounds().bounds().contains(stored));
            }
        }
    }
}
