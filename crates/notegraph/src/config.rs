//! Configuration types for notegraph rendering.
//!
//! This module provides configuration structures that control how diagrams
//! are laid out, dragged and styled. All types implement
//! [`serde::Deserialize`] and fill missing fields with defaults, so a partial
//! configuration file only needs to name what it changes.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Canvas geometry, node radius and drag margin.
//! - [`StyleConfig`] - Colors and label truncation used by the SVG exporter.
//!
//! # Example
//!
//! ```
//! # use notegraph::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().node_radius(), 25.0);
//! assert!(config.style().node_fill().is_ok());
//! ```

use serde::Deserialize;

use notegraph_core::{color::Color, geometry::Size};

use crate::{edge::EdgeGeometry, interaction::DragBounds, layout::Canvas};

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }
}

/// Geometry of the logical canvas and of the nodes drawn on it.
///
/// The defaults describe a 600×400 canvas with 60 units of padding, nodes of
/// radius 25 and a drag margin of 5.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    canvas_width: f32,
    canvas_height: f32,
    padding: f32,
    /// Downward nudge applied to every tree row.
    row_offset: f32,
    /// Distance between the padding and the radial ring.
    ring_inset: f32,
    node_radius: f32,
    /// Extra trim at the destination of directional edges.
    arrow_gap: f32,
    /// Space kept between a dragged node and the canvas border.
    drag_margin: f32,
}

impl LayoutConfig {
    pub fn canvas_size(&self) -> Size {
        Size::new(self.canvas_width, self.canvas_height)
    }

    pub fn node_radius(&self) -> f32 {
        self.node_radius
    }

    pub fn arrow_gap(&self) -> f32 {
        self.arrow_gap
    }

    pub fn drag_margin(&self) -> f32 {
        self.drag_margin
    }

    /// Set the node radius (builder style).
    pub fn with_node_radius(mut self, node_radius: f32) -> Self {
        self.node_radius = node_radius;
        self
    }

    /// Set the canvas size (builder style).
    pub fn with_canvas_size(mut self, size: Size) -> Self {
        self.canvas_width = size.width();
        self.canvas_height = size.height();
        self
    }

    /// The [`Canvas`] layout math runs on.
    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.canvas_size())
            .with_padding(self.padding)
            .with_row_offset(self.row_offset)
            .with_ring_inset(self.ring_inset)
    }

    /// Edge trimming parameters for this node radius.
    pub fn edge_geometry(&self) -> EdgeGeometry {
        EdgeGeometry::new(self.node_radius, self.arrow_gap)
    }

    /// Where dragged nodes may be placed on [`Self::canvas`].
    pub fn drag_bounds(&self) -> DragBounds {
        DragBounds::for_canvas(&self.canvas(), self.node_radius, self.drag_margin)
    }

    /// Checks that every dimension is finite and the canvas is not empty.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending field.
    pub fn validate(&self) -> Result<(), String> {
        let fields = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("padding", self.padding),
            ("row_offset", self.row_offset),
            ("ring_inset", self.ring_inset),
            ("node_radius", self.node_radius),
            ("arrow_gap", self.arrow_gap),
            ("drag_margin", self.drag_margin),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, value)| !value.is_finite()) {
            return Err(format!("Invalid layout config: `{name}` must be a finite number"));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err("Invalid layout config: canvas size must be positive".to_string());
        }
        if self.node_radius < 0.0 {
            return Err("Invalid layout config: `node_radius` must not be negative".to_string());
        }
        Ok(())
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        let geometry = EdgeGeometry::default();
        Self {
            canvas_width: canvas.size().width(),
            canvas_height: canvas.size().height(),
            padding: canvas.padding(),
            row_offset: canvas.row_offset(),
            ring_inset: canvas.ring_inset(),
            node_radius: geometry.node_radius(),
            arrow_gap: geometry.arrow_gap(),
            drag_margin: 5.0,
        }
    }
}

/// Visual styling configuration for exported diagrams.
///
/// Colors are CSS color strings and are only parsed when used, so an invalid
/// color surfaces as an error at render time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background fill behind the canvas; transparent when unset.
    background_color: Option<String>,
    node_fill: String,
    node_text: String,
    edge_stroke: String,
    edge_label: String,
    /// Node labels longer than this many characters are shortened with `…`.
    label_max_chars: usize,
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| parse_color("background_color", color))
            .transpose()
    }

    pub fn node_fill(&self) -> Result<Color, String> {
        parse_color("node_fill", &self.node_fill)
    }

    pub fn node_text(&self) -> Result<Color, String> {
        parse_color("node_text", &self.node_text)
    }

    pub fn edge_stroke(&self) -> Result<Color, String> {
        parse_color("edge_stroke", &self.edge_stroke)
    }

    pub fn edge_label(&self) -> Result<Color, String> {
        parse_color("edge_label", &self.edge_label)
    }

    pub fn label_max_chars(&self) -> usize {
        self.label_max_chars
    }

    /// Set the background color string (builder style).
    pub fn with_background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            node_fill: "#6366f1".to_string(),
            node_text: "#ffffff".to_string(),
            edge_stroke: "#6366f1".to_string(),
            edge_label: "#64748b".to_string(),
            label_max_chars: 6,
        }
    }
}

fn parse_color(field: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {field} in config: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_canvas() {
        let layout = LayoutConfig::default();
        assert_eq!(layout.canvas(), Canvas::default());
        assert_eq!(layout.edge_geometry(), EdgeGeometry::default());
        assert_eq!(layout.drag_bounds(), DragBounds::default());
        assert!(layout.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AppConfig = serde_json::from_str(
            r##"{"layout": {"node_radius": 30}, "style": {"background_color": "#fafafa"}}"##,
        )
        .expect("valid config");

        assert_eq!(config.layout().node_radius(), 30.0);
        assert_eq!(config.layout().arrow_gap(), 8.0);
        assert_eq!(config.layout().canvas_size(), Size::new(600.0, 400.0));
        assert!(config.style().background_color().unwrap().is_some());
        assert_eq!(config.style().label_max_chars(), 6);
    }

    #[test]
    fn test_drag_bounds_follow_radius() {
        let bounds = LayoutConfig::default()
            .with_node_radius(45.0)
            .drag_bounds()
            .bounds();
        assert_eq!(bounds.min_x(), 50.0);
        assert_eq!(bounds.max_y(), 350.0);
    }

    #[test]
    fn test_invalid_color_is_reported() {
        let style = StyleConfig::default().with_background_color("not-a-color");
        let err = style.background_color().unwrap_err();
        assert!(err.contains("background_color"), "{err}");
    }

    #[test]
    fn test_validate_rejects_empty_canvas() {
        let layout = LayoutConfig::default().with_canvas_size(Size::new(0.0, 400.0));
        assert!(layout.validate().is_err());

        let nan = LayoutConfig::default().with_node_radius(f32::NAN);
        let err = nan.validate().unwrap_err();
        assert!(err.contains("node_radius"), "{err}");
    }
}
