//! SVG rendering of a positioned diagram.
//!
//! The document always uses the logical canvas as its `viewBox`, so a view
//! transform fitted to the same canvas maps pointer input onto it exactly.
//! Edges are drawn first and nodes on top of them.

use std::{borrow::Cow, path::Path};

use log::{debug, info};
use svg::{Document, node::element as svg_element};

use notegraph_core::{color::Color, geometry::Size, semantic::Diagram};

use super::Error;
use crate::{config::AppConfig, edge::EdgeRoute, layout::PositionMap};

const ARROWHEAD_ID: &str = "arrowhead";
const FONT_FAMILY: &str = "sans-serif";
const NODE_FONT_SIZE: f32 = 12.0;
const EDGE_FONT_SIZE: f32 = 11.0;
const EDGE_STROKE_WIDTH: f32 = 2.0;

/// Shorten `label` to `max_chars` characters followed by `…`.
///
/// Labels that already fit are returned unchanged.
///
/// # Examples
///
/// ```
/// use notegraph::export::svg::truncate_label;
///
/// assert_eq!(truncate_label("Binary", 6), "Binary");
/// assert_eq!(truncate_label("Binary tree", 6), "Binary…");
/// ```
pub fn truncate_label(label: &str, max_chars: usize) -> Cow<'_, str> {
    match label.char_indices().nth(max_chars) {
        Some((cut, _)) => Cow::Owned(format!("{}…", &label[..cut])),
        None => Cow::Borrowed(label),
    }
}

#[derive(Debug, Clone)]
struct Palette {
    background: Option<Color>,
    node_fill: Color,
    node_text: Color,
    edge_stroke: Color,
    edge_label: Color,
}

/// Renders diagrams to SVG documents using the configured style.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    palette: Palette,
    canvas: Size,
    node_radius: f32,
    label_max_chars: usize,
}

impl SvgRenderer {
    /// Create a renderer, resolving every configured color.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if a color string in the style configuration
    /// cannot be parsed.
    pub fn new(config: &AppConfig) -> Result<Self, Error> {
        let style = config.style();
        let palette = Palette {
            background: style.background_color().map_err(Error::Render)?,
            node_fill: style.node_fill().map_err(Error::Render)?,
            node_text: style.node_text().map_err(Error::Render)?,
            edge_stroke: style.edge_stroke().map_err(Error::Render)?,
            edge_label: style.edge_label().map_err(Error::Render)?,
        };

        Ok(Self {
            palette,
            canvas: config.layout().canvas_size(),
            node_radius: config.layout().node_radius(),
            label_max_chars: style.label_max_chars(),
        })
    }

    /// Build the SVG document for `diagram` at the given positions.
    ///
    /// Nodes without a position are not drawn. `routes` are drawn as given.
    pub fn render(
        &self,
        diagram: &Diagram,
        positions: &PositionMap,
        routes: &[EdgeRoute],
    ) -> Document {
        debug!(
            title = diagram.title(),
            nodes_count = positions.len(),
            edges_count = routes.len();
            "Rendering SVG"
        );

        let width = self.canvas.width();
        let height = self.canvas.height();
        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = &self.palette.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        doc = doc.add(svg_element::Definitions::new().add(self.arrowhead_marker()));

        let mut edges = svg_element::Group::new().set("class", "edges");
        for route in routes {
            edges = edges.add(self.render_edge(route));
        }

        let mut nodes = svg_element::Group::new().set("class", "nodes");
        for node in diagram.nodes() {
            let Some(position) = positions.get(node.id()) else {
                continue;
            };

            let circle = svg_element::Circle::new()
                .set("cx", position.x())
                .set("cy", position.y())
                .set("r", self.node_radius)
                .set("fill", &self.palette.node_fill)
                .set("fill-opacity", self.palette.node_fill.alpha());

            let text = svg_element::Text::new(truncate_label(node.label(), self.label_max_chars))
                .set("x", position.x())
                .set("y", position.y())
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-family", FONT_FAMILY)
                .set("font-size", NODE_FONT_SIZE)
                .set("font-weight", 500)
                .set("fill", &self.palette.node_text);

            nodes = nodes.add(
                svg_element::Group::new()
                    .set("data-node", node.id().to_string())
                    .add(circle)
                    .add(text),
            );
        }

        doc.add(edges).add(nodes)
    }

    /// Render and write the document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be written.
    pub fn write(
        &self,
        path: impl AsRef<Path>,
        diagram: &Diagram,
        positions: &PositionMap,
        routes: &[EdgeRoute],
    ) -> Result<(), Error> {
        let doc = self.render(diagram, positions, routes);
        svg::save(path.as_ref(), &doc)?;
        info!(path:? = path.as_ref(); "SVG written");
        Ok(())
    }

    fn render_edge(&self, route: &EdgeRoute) -> svg_element::Group {
        let segment = route.segment();
        let mut line = svg_element::Line::new()
            .set("x1", segment.start().x())
            .set("y1", segment.start().y())
            .set("x2", segment.end().x())
            .set("y2", segment.end().y())
            .set("stroke", &self.palette.edge_stroke)
            .set("stroke-opacity", self.palette.edge_stroke.alpha())
            .set("stroke-width", EDGE_STROKE_WIDTH);
        if route.is_directional() {
            line = line.set("marker-end", format!("url(#{ARROWHEAD_ID})"));
        }

        let mut group = svg_element::Group::new().add(line);
        if let Some(label) = route.label() {
            let anchor = route.label_anchor();
            group = group.add(
                svg_element::Text::new(label)
                    .set("x", anchor.x())
                    .set("y", anchor.y())
                    .set("text-anchor", "middle")
                    .set("font-family", FONT_FAMILY)
                    .set("font-size", EDGE_FONT_SIZE)
                    .set("fill", &self.palette.edge_label),
            );
        }
        group
    }

    fn arrowhead_marker(&self) -> svg_element::Marker {
        svg_element::Marker::new()
            .set("id", ARROWHEAD_ID)
            .set("markerWidth", 10)
            .set("markerHeight", 7)
            .set("refX", 9)
            .set("refY", 3.5)
            .set("orient", "auto")
            .add(
                svg_element::Polygon::new()
                    .set("points", "0 0, 10 3.5, 0 7")
                    .set("fill", &self.palette.edge_stroke)
                    .set("fill-opacity", self.palette.edge_stroke.alpha()),
            )
    }
}
