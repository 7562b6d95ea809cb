//! Notegraph - layout, drag interaction and SVG rendering for the small
//! structural diagrams extracted from study notes.
//!
//! A diagram descriptor (trees, linked lists, graphs and flowcharts) is laid
//! out deterministically on a fixed logical canvas, can be repositioned by
//! dragging through a [`DiagramView`], and is exported as SVG.

pub mod config;
pub mod descriptor;
pub mod edge;
pub mod export;
pub mod interaction;
pub mod layout;

mod error;

pub use notegraph_core::{color, geometry, identifier, semantic};

pub use error::NotegraphError;
pub use interaction::DiagramView;
pub use layout::{LayoutEngine, PositionMap, compute_layout};

use log::{debug, info, trace};

use config::AppConfig;
use export::svg::SvgRenderer;
use semantic::Diagram;

/// Builder for loading, laying out and rendering notegraph diagrams.
///
/// # Examples
///
/// ```rust
/// use notegraph::{DiagramBuilder, config::AppConfig};
///
/// let source = r#"{
///     "title": "Stack",
///     "type": "linked-list",
///     "nodes": [{"id": "a", "label": "push"}, {"id": "b", "label": "pop"}],
///     "edges": [{"from": "a", "to": "b"}]
/// }"#;
///
/// let builder = DiagramBuilder::new(AppConfig::default());
/// let diagrams = builder.parse(source).expect("Failed to parse");
///
/// let svg = builder.render_svg(&diagrams[0]).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct DiagramBuilder {
    config: AppConfig,
}

impl DiagramBuilder {
    /// Create a new diagram builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse a JSON payload into diagram descriptors.
    ///
    /// Accepts a single descriptor, an array of descriptors, or an object with
    /// a `graphDiagrams` array.
    ///
    /// # Errors
    ///
    /// Returns [`NotegraphError::Parse`] with the source attached when the
    /// payload is not valid JSON or not a descriptor.
    pub fn parse(&self, source: &str) -> Result<Vec<Diagram>, NotegraphError> {
        info!("Parsing diagram payload");

        let diagrams = descriptor::parse_diagrams(source)
            .map_err(|err| NotegraphError::new_parse_error(err, source))?;

        debug!(diagrams_count = diagrams.len(); "Payload parsed successfully");
        trace!(diagrams:?; "Parsed diagrams");

        Ok(diagrams)
    }

    /// A layout engine on the configured canvas.
    pub fn layout_engine(&self) -> LayoutEngine {
        LayoutEngine::new(self.config.layout().canvas())
    }

    /// Compute the positions of every node of `diagram`.
    pub fn layout(&self, diagram: &Diagram) -> PositionMap {
        self.layout_engine()
            .calculate(diagram.nodes(), diagram.kind())
    }

    /// Create an interactive view of `diagram` using the configured geometry.
    ///
    /// # Errors
    ///
    /// Returns [`NotegraphError::Config`] for an invalid layout configuration.
    pub fn view(
        &self,
        diagram: impl Into<std::rc::Rc<Diagram>>,
    ) -> Result<DiagramView, NotegraphError> {
        let layout = self.config.layout();
        layout.validate().map_err(NotegraphError::Config)?;

        Ok(DiagramView::with_settings(
            diagram,
            self.layout_engine(),
            layout.edge_geometry(),
            layout.drag_bounds(),
        ))
    }

    /// Render `diagram` at its computed layout to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns [`NotegraphError::Config`] for an invalid layout configuration
    /// and [`NotegraphError::Export`] when the style cannot be resolved.
    pub fn render_svg(&self, diagram: &Diagram) -> Result<String, NotegraphError> {
        info!(title = diagram.title(), kind:% = diagram.kind(); "Rendering diagram");
        self.config
            .layout()
            .validate()
            .map_err(NotegraphError::Config)?;

        let positions = self.layout(diagram);
        let routes = edge::route_edges(diagram, &positions, &self.config.layout().edge_geometry());
        let renderer = SvgRenderer::new(&self.config)?;

        let svg = renderer.render(diagram, &positions, &routes).to_string();
        info!("SVG rendered successfully");
        Ok(svg)
    }

    /// Render the live positions of `view`, including drag edits.
    ///
    /// # Errors
    ///
    /// Returns [`NotegraphError::Config`] for an invalid layout configuration
    /// and [`NotegraphError::Export`] when the style cannot be resolved.
    pub fn render_view_svg(&self, view: &DiagramView) -> Result<String, NotegraphError> {
        debug!(title = view.diagram().title(), dragging = view.is_dragging(); "Rendering view");
        self.config
            .layout()
            .validate()
            .map_err(NotegraphError::Config)?;

        let renderer = SvgRenderer::new(&self.config)?;
        let svg = renderer
            .render(view.diagram(), view.positions(), &view.edge_routes())
            .to_string();
        Ok(svg)
    }
}
