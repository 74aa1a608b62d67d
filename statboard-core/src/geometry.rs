//! Canvas geometry: points, sizes, rectangles and bounds clamping.

use serde::{Deserialize, Serialize};

/// Logical canvas width.
pub const CANVAS_WIDTH: f32 = 750.0;

/// Logical canvas height.
pub const CANVAS_HEIGHT: f32 = 850.0;

/// A point in canvas coordinates (top-left origin).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X position (units from left).
    pub x: f32,
    /// Y position (units from top).
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width in canvas units.
    pub width: f32,
    /// Height in canvas units.
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A square of the given extent.
    #[must_use]
    pub const fn square(extent: f32) -> Self {
        Self::new(extent, extent)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner.
    pub origin: Point,
    /// Extent.
    pub size: Size,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.origin.x + self.size.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.size.height
    }

    /// Check if a point lies within this rectangle (edges inclusive).
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= self.origin.x
            && point.x <= self.right()
            && point.y >= self.origin.y
            && point.y <= self.bottom()
    }

    /// Check if `other` lies entirely within this rectangle.
    #[must_use]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.origin.x >= self.origin.x
            && other.origin.y >= self.origin.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }
}

/// The fixed drawing surface every node lives on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Canvas {
    /// Width in logical units.
    pub width: f32,
    /// Height in logical units.
    pub height: f32,
}

impl Canvas {
    /// The standard 750×850 infographic canvas.
    pub const STANDARD: Self = Self {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    };

    /// The canvas rectangle anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::new(Point::default(), Size::new(self.width, self.height))
    }

    /// Clamp a top-left position so a box of `footprint` stays on the canvas.
    ///
    /// Clamping is idempotent: feeding the result back in returns it unchanged.
    #[must_use]
    pub fn clamp_position(&self, position: Point, footprint: Size) -> Point {
        let max_x = (self.width - footprint.width).max(0.0);
        let max_y = (self.height - footprint.height).max(0.0);
        Point::new(
            clamp_axis(position.x, 0.0, max_x),
            clamp_axis(position.y, 0.0, max_y),
        )
    }

    /// Clamp a requested size between `min` and the canvas extent.
    #[must_use]
    pub fn clamp_size(&self, size: Size, min: Size) -> Size {
        Size::new(
            clamp_axis(size.width, min.width, self.width.max(min.width)),
            clamp_axis(size.height, min.height, self.height.max(min.height)),
        )
    }

    /// Check whether a rectangle lies entirely on the canvas.
    #[must_use]
    pub fn contains(&self, rect: &Rect) -> bool {
        self.bounds().contains_rect(rect)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Clamp one axis; non-finite input collapses to the lower bound.
fn clamp_axis(value: f32, min: f32, max: f32) -> f32 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        min
    }
}
