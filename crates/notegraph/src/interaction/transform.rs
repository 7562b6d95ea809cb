//! Mapping between screen pixels and the logical canvas.

use log::warn;

use notegraph_core::geometry::{Bounds, Point, Size};

/// Converts a pointer position from screen space into logical canvas space.
pub trait CoordinateMapper {
    fn to_logical(&self, screen: Point) -> Point;
}

impl<F> CoordinateMapper for F
where
    F: Fn(Point) -> Point,
{
    fn to_logical(&self, screen: Point) -> Point {
        self(screen)
    }
}

/// Axis-aligned affine transform from logical canvas space to screen space.
///
/// `screen = logical * scale + translation`, per axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    scale_x: f32,
    scale_y: f32,
    translation: Point,
}

impl ViewTransform {
    pub fn new(scale_x: f32, scale_y: f32, translation: Point) -> Self {
        Self {
            scale_x,
            scale_y,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::new(1.0, 1.0, Point::default())
    }

    /// The transform a browser applies to an SVG with `viewBox` sized to
    /// `canvas` and the default `xMidYMid meet` aspect handling, drawn into
    /// `viewport` (the element's client rectangle).
    ///
    /// The canvas is scaled uniformly to fit and centered on the free axis.
    /// An empty canvas maps with unit scale onto the viewport origin.
    pub fn fit(canvas: Size, viewport: Bounds) -> Self {
        if canvas.is_zero() || canvas.width() <= 0.0 || canvas.height() <= 0.0 {
            return Self::new(1.0, 1.0, viewport.min_point());
        }

        let scale = (viewport.width() / canvas.width()).min(viewport.height() / canvas.height());
        let free = Point::new(
            viewport.width() - canvas.width() * scale,
            viewport.height() - canvas.height() * scale,
        );

        Self::new(scale, scale, viewport.min_point().add_point(free.scale(0.5)))
    }

    pub fn scale_x(&self) -> f32 {
        self.scale_x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale_y
    }

    pub fn translation(&self) -> Point {
        self.translation
    }

    pub fn is_invertible(&self) -> bool {
        self.scale_x != 0.0 && self.scale_y != 0.0
    }

    /// The screen to logical transform, or `None` when an axis has zero scale.
    pub fn inverse(&self) -> Option<Self> {
        if !self.is_invertible() {
            return None;
        }

        let scale_x = 1.0 / self.scale_x;
        let scale_y = 1.0 / self.scale_y;
        Some(Self::new(
            scale_x,
            scale_y,
            Point::new(
                -self.translation.x() * scale_x,
                -self.translation.y() * scale_y,
            ),
        ))
    }

    pub fn to_screen(&self, logical: Point) -> Point {
        Point::new(
            logical.x() * self.scale_x + self.translation.x(),
            logical.y() * self.scale_y + self.translation.y(),
        )
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl CoordinateMapper for ViewTransform {
    /// Applies the inverse transform. A collapsed transform cannot be
    /// inverted; the point is then passed through unchanged.
    fn to_logical(&self, screen: Point) -> Point {
        match self.inverse() {
            Some(inverse) => inverse.to_screen(screen),
            None => {
                warn!(transform:? = self; "Collapsed view transform, using screen coordinates");
                screen
            }
        }
    }
}
