//! Shared geometry and identifier types

use serde::{Deserialize, Serialize};

/// Identifier of a layer (the word after `;Layer` in the source)
pub type LayerId = String;

/// Identifier of a path (the number after `; Path` in the source)
pub type PathId = String;

/// Name of a color profile (e.g. "Color 1", "Washing")
pub type ColorName = String;

/// Layer id that receives drawn length before any layer marker is seen
pub const DEFAULT_LAYER_ID: &str = "default";

/// Path id that receives drawn length before any path marker is seen
pub const NO_PATH_ID: &str = "None";

/// A position in the XY plane, in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    /// X-axis position
    pub x: f64,
    /// Y-axis position
    pub y: f64,
}

impl Point2D {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Straight-line distance to another point
    pub fn distance_to(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl std::fmt::Display for Point2D {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance() {
        let a = Point2D::new(0.0, 0.0);
        let b = Point2D::new(3.0, 4.0);
        assert_eq!(a.distance_to(&b), 5.0);
        assert_eq!(b.distance_to(&a), 5.0);
        assert_eq!(a.distance_to(&a), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Point2D::new(1.5, -2.0).to_string(), "(1.500, -2.000)");
    }
}
