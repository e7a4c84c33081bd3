//! Point object - a named joint in 3D space

use nalgebra::Point3;
use serde::{Deserialize, Serialize};

/// A named joint in the global Cartesian frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Unique name within the model
    pub name: String,
    /// X coordinate
    pub x: f64,
    /// Y coordinate
    pub y: f64,
    /// Z coordinate (elevation)
    pub z: f64,
}

impl Point {
    /// Create a new point at the given coordinates
    pub fn new(name: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            name: name.to_string(),
            x,
            y,
            z,
        }
    }

    /// Get the coordinates as an array
    pub fn coords(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Get the coordinates as an algebraic point
    pub fn position(&self) -> Point3<f64> {
        Point3::new(self.x, self.y, self.z)
    }

    /// Calculate distance to another point
    pub fn distance_to(&self, other: &Point) -> f64 {
        nalgebra::distance(&self.position(), &other.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_creation() {
        let point = Point::new("joint_0", 1.0, 2.0, 3.0);
        assert_eq!(point.name, "joint_0");
        assert_eq!(point.coords(), [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new("a", 0.0, 0.0, 0.0);
        let p2 = Point::new("b", 3.0, 0.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-10);
    }
}
