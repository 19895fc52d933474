/// Viewport geometry
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Point or offset in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f32,
    /// Vertical coordinate
    pub y: f32,
}

impl Point {
    /// Create a point
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean length when used as an offset
    pub fn length(self) -> f32 {
        self.x.hypot(self.y)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// Extent in viewport pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Create a size
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Clamp a widget origin so the widget stays inside the viewport
///
/// Each axis is clamped to `[0, viewport - widget]`. When the widget is
/// larger than the viewport the upper bound collapses to 0. Non-finite
/// coordinates clamp to 0.
pub fn clamp_to_viewport(raw: Point, viewport: Size, widget: Size) -> Point {
    Point::new(
        clamp_axis(raw.x, viewport.width - widget.width),
        clamp_axis(raw.y, viewport.height - widget.height),
    )
}

fn clamp_axis(value: f32, max: f32) -> f32 {
    let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
    if value.is_finite() {
        value.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Whether `point` lies inside the rectangle at `origin` with `size`
pub fn contains(origin: Point, size: Size, point: Point) -> bool {
    point.x >= origin.x
        && point.y >= origin.y
        && point.x <= origin.x + size.width
        && point.y <= origin.y + size.height
}
