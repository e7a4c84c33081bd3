//! Distributed loads on frames

use serde::{Deserialize, Serialize};

/// Direction of a frame load, carrying the host's numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadDirection {
    /// Frame local axis 1 (axial)
    Local1,
    /// Frame local axis 2
    Local2,
    /// Frame local axis 3
    Local3,
    /// Global X
    GlobalX,
    /// Global Y
    GlobalY,
    /// Global Z
    GlobalZ,
    /// Negative global Z, magnitude taken positive downwards
    Gravity,
}

impl LoadDirection {
    /// Host code for this direction
    pub fn code(self) -> i32 {
        match self {
            LoadDirection::Local1 => 1,
            LoadDirection::Local2 => 2,
            LoadDirection::Local3 => 3,
            LoadDirection::GlobalX => 4,
            LoadDirection::GlobalY => 5,
            LoadDirection::GlobalZ => 6,
            LoadDirection::Gravity => 10,
        }
    }

    /// Check if this is a local coordinate direction
    pub fn is_local(self) -> bool {
        matches!(
            self,
            LoadDirection::Local1 | LoadDirection::Local2 | LoadDirection::Local3
        )
    }
}

/// Whether a distributed load is a force or a moment per unit length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DistributedLoadKind {
    #[default]
    Force,
    Moment,
}

impl DistributedLoadKind {
    /// Host code for this load kind
    pub fn code(self) -> i32 {
        match self {
            DistributedLoadKind::Force => 1,
            DistributedLoadKind::Moment => 2,
        }
    }
}

/// A distributed (line) load on a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedLoad {
    /// Load pattern
    pub pattern: String,
    /// Force or moment per length
    pub kind: DistributedLoadKind,
    /// Load direction
    pub direction: LoadDirection,
    /// Start position (from i-end)
    pub dist1: f64,
    /// End position (from i-end)
    pub dist2: f64,
    /// Start magnitude
    pub val1: f64,
    /// End magnitude
    pub val2: f64,
    /// Coordinate system name
    pub csys: String,
    /// Positions are relative (0..1) rather than absolute lengths
    pub relative: bool,
    /// Replace earlier loads of the same pattern instead of adding to them
    pub replace: bool,
}

impl DistributedLoad {
    /// Create a new distributed force in global coordinates with replace semantics
    pub fn new(
        pattern: &str,
        direction: LoadDirection,
        dist1: f64,
        dist2: f64,
        val1: f64,
        val2: f64,
    ) -> Self {
        Self {
            pattern: pattern.to_string(),
            kind: DistributedLoadKind::Force,
            direction,
            dist1,
            dist2,
            val1,
            val2,
            csys: "Global".to_string(),
            relative: true,
            replace: true,
        }
    }

    /// Create a uniform load over the full relative length of a frame
    pub fn uniform(pattern: &str, direction: LoadDirection, value: f64) -> Self {
        Self::new(pattern, direction, 0.0, 1.0, value, value)
    }

    /// Add to existing loads of the same pattern instead of replacing them
    pub fn additive(mut self) -> Self {
        self.replace = false;
        self
    }

    /// Use positions measured in absolute length units
    pub fn absolute(mut self) -> Self {
        self.relative = false;
        self
    }

    /// Check if the load is uniform (constant magnitude)
    pub fn is_uniform(&self) -> bool {
        (self.val1 - self.val2).abs() < 1e-10
    }

    /// Check that positions are ordered and, when relative, within 0..1
    pub fn has_valid_positions(&self) -> bool {
        let ordered = self.dist1 <= self.dist2 && self.dist1 >= 0.0;
        if self.relative {
            ordered && self.dist2 <= 1.0
        } else {
            ordered
        }
    }

    /// Total force from this load over a frame of the given length
    pub fn total_force(&self, frame_length: f64) -> f64 {
        let covered = if self.relative {
            (self.dist2 - self.dist1) * frame_length
        } else {
            self.dist2 - self.dist1
        };
        (self.val1 + self.val2) / 2.0 * covered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_load_spans_full_length() {
        let load = DistributedLoad::uniform("SDL", LoadDirection::GlobalZ, -10.0);
        assert_eq!((load.dist1, load.dist2), (0.0, 1.0));
        assert!(load.is_uniform());
        assert!(load.relative && load.replace);
        assert_eq!(load.csys, "Global");
        assert_eq!(load.direction.code(), 6);
        assert_eq!(load.kind.code(), 1);
    }

    #[test]
    fn test_total_force() {
        let load = DistributedLoad::uniform("LL", LoadDirection::GlobalZ, -5.0);
        assert!((load.total_force(4.0) + 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_position_checks() {
        let bad = DistributedLoad::new("LL", LoadDirection::GlobalZ, 0.5, 1.5, 1.0, 1.0);
        assert!(!bad.has_valid_positions());
        assert!(bad.clone().absolute().has_valid_positions());
        assert!(LoadDirection::Local2.is_local());
    }
}
