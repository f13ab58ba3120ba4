//! Planar coordinate types.
//!
//! Everything lives in viewport units (the renderer's pixel space), with the
//! origin at the top-left corner.  Coordinates are `f64` so distances compare
//! against the delivery threshold without single-precision surprises.

/// A point in viewport space.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation: `self` at `t = 0`, `other` at `t = 1`.
    #[inline]
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

/// Size of the drawing surface the network is laid out on.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[inline]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// `true` if `p` lies inside the rectangle inset by `padding` on every side.
    pub fn contains_inset(self, p: Point, padding: f64) -> bool {
        p.x >= padding
            && p.x <= (self.width - padding).max(padding)
            && p.y >= padding
            && p.y <= (self.height - padding).max(padding)
    }
}

impl Default for Viewport {
    /// The size the playground assumes before the host reports a real one.
    fn default() -> Self {
        Self { width: 800.0, height: 500.0 }
    }
}

impl std::fmt::Display for Viewport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}
