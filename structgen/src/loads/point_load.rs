//! Point loads - forces and moments applied directly to points

use serde::{Deserialize, Serialize};

/// A force/moment vector applied to a point under one load pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoad {
    /// Load pattern
    pub pattern: String,
    /// [F1, F2, F3, M1, M2, M3]
    pub values: [f64; 6],
    /// Coordinate system name
    pub csys: String,
    /// Replace earlier loads of the same pattern instead of adding to them
    pub replace: bool,
}

impl PointLoad {
    /// Create a new point load with all components
    pub fn new(pattern: &str, values: [f64; 6]) -> Self {
        Self {
            pattern: pattern.to_string(),
            values,
            csys: "Global".to_string(),
            replace: true,
        }
    }

    /// Create a force-only point load
    pub fn force(pattern: &str, f1: f64, f2: f64, f3: f64) -> Self {
        Self::new(pattern, [f1, f2, f3, 0.0, 0.0, 0.0])
    }

    /// Add to existing loads of the same pattern instead of replacing them
    pub fn additive(mut self) -> Self {
        self.replace = false;
        self
    }

    /// Scale the load by a factor
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            values: self.values.map(|v| v * factor),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_force_only() {
        let load = PointLoad::force("SDL", 0.0, 0.0, -100.0);
        assert_eq!(load.values, [0.0, 0.0, -100.0, 0.0, 0.0, 0.0]);
        assert!(load.replace);
    }

    #[test]
    fn test_scaled() {
        let load = PointLoad::force("LL", 0.0, 0.0, -50.0).scaled(1.5);
        assert_eq!(load.values[2], -75.0);
        assert_eq!(load.pattern, "LL");
    }
}
