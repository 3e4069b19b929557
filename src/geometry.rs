//! Bounding-box primitives shared by the classification rules.
//!
//! Boxes live in the coordinate space of the source figure, as written by
//! the figure-extraction pipeline: `(x0, y0)` is the top-left corner and
//! `(x1, y1)` the bottom-right corner, with y growing downward.

use serde::Deserialize;

/// An axis-aligned bounding box `(x0, y0, x1, y1)`.
///
/// Well-formedness (`x1 >= x0`, `y1 >= y0`) is not validated; a degenerate
/// box yields a negative area that propagates into sums and comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(from = "[f64; 4]")]
pub struct BBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl From<[f64; 4]> for BBox {
    fn from([x0, y0, x1, y1]: [f64; 4]) -> Self {
        Self { x0, y0, x1, y1 }
    }
}

impl BBox {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// True iff `self` lies strictly inside `other` on all four edges.
    ///
    /// A box touching or exactly aligned with an edge of `other` is not
    /// inside it. Callers that want edge-touching boxes to count shrink
    /// the outer box instead of loosening the comparison.
    pub fn is_inside(&self, other: &BBox) -> bool {
        self.x0 > other.x0 && self.x1 < other.x1 && self.y0 > other.y0 && self.y1 < other.y1
    }

    pub fn area(&self) -> f64 {
        (self.x1 - self.x0) * (self.y1 - self.y0)
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strictly_inside() {
        let outer = BBox::new(0.0, 0.0, 100.0, 100.0);
        let inner = BBox::new(10.0, 10.0, 90.0, 90.0);
        assert!(inner.is_inside(&outer));
        assert!(!outer.is_inside(&inner));
    }

    #[test]
    fn test_edge_touching_is_not_inside() {
        let outer = BBox::new(0.0, 0.0, 100.0, 100.0);
        // Shares the left edge with the outer box
        let touching = BBox::new(0.0, 10.0, 50.0, 50.0);
        assert!(!touching.is_inside(&outer));
        // Exactly aligned on every edge
        assert!(!outer.is_inside(&outer));
    }

    #[test]
    fn test_area() {
        let b = BBox::new(2.0, 3.0, 12.0, 8.0);
        assert!((b.area() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_negative_area_propagates() {
        // Inverted on the x axis; not rejected, the sign carries through
        let b = BBox::new(10.0, 0.0, 0.0, 10.0);
        assert!(b.area() < 0.0);
    }

    #[test]
    fn test_height() {
        let b = BBox::new(0.0, 5.0, 10.0, 25.0);
        assert!((b.height() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_from_array() {
        let b = BBox::from([1.0, 2.0, 3.0, 4.0]);
        assert_eq!(b, BBox::new(1.0, 2.0, 3.0, 4.0));
    }
}
