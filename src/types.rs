use serde::{Deserialize, Serialize};

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Dimensions of the photograph a pose was detected in, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Convert a point from normalized [0,1] coordinates to pixel coordinates.
    pub fn to_pixels(&self, p: Point) -> Point {
        Point::new(p.x * self.width as f64, p.y * self.height as f64)
    }

    /// Euclidean distance in pixels between two normalized points.
    pub fn pixel_distance(&self, a: Point, b: Point) -> f64 {
        self.to_pixels(a).distance(&self.to_pixels(b))
    }

    /// Vertical extent in pixels between two normalized points.
    pub fn pixel_height(&self, a: Point, b: Point) -> f64 {
        (a.y - b.y).abs() * self.height as f64
    }
}
