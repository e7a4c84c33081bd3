//! Frame object - a line element between two points

use serde::{Deserialize, Serialize};

use super::restraint::Dof;

/// End releases for a frame (allowing specific DOFs to transfer no force)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FrameReleases {
    /// i-end releases [U1, U2, U3, R1, R2, R3]
    pub i_end: [bool; 6],
    /// j-end releases [U1, U2, U3, R1, R2, R3]
    pub j_end: [bool; 6],
    /// i-end partial fixity springs (0 = fully released)
    pub i_springs: [f64; 6],
    /// j-end partial fixity springs
    pub j_springs: [f64; 6],
}

impl FrameReleases {
    /// Create releases with no end releases
    pub fn none() -> Self {
        Self::default()
    }

    /// Releases for a pin-jointed truss bar.
    ///
    /// The i-end releases all three rotations; the j-end keeps torsion (R1)
    /// so the bar is not free to spin about its own axis.
    pub fn truss_pin() -> Self {
        Self {
            i_end: [false, false, false, true, true, true],
            j_end: [false, false, false, false, true, true],
            ..Self::default()
        }
    }

    /// Check whether any DOF is released at either end
    pub fn any(&self) -> bool {
        self.i_end.iter().chain(self.j_end.iter()).any(|r| *r)
    }

    /// Check whether a DOF is released at both ends
    pub fn released_at_both_ends(&self, dof: Dof) -> bool {
        self.i_end[dof.index()] && self.j_end[dof.index()]
    }

    /// A frame may not release axial force or torsion at both ends
    pub fn is_stable(&self) -> bool {
        !self.released_at_both_ends(Dof::U1) && !self.released_at_both_ends(Dof::R1)
    }

    /// Get combined releases as 12-element array
    pub fn as_array(&self) -> [bool; 12] {
        let mut arr = [false; 12];
        arr[0..6].copy_from_slice(&self.i_end);
        arr[6..12].copy_from_slice(&self.j_end);
        arr
    }
}

/// A frame object connecting two points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Unique name within the model
    pub name: String,
    /// Name of the i-end point
    pub i_point: String,
    /// Name of the j-end point
    pub j_point: String,
    /// Name of the frame section
    pub section: String,
    /// End releases
    pub releases: FrameReleases,
}

impl Frame {
    /// Create a new frame without releases
    pub fn new(name: &str, i_point: &str, j_point: &str, section: &str) -> Self {
        Self {
            name: name.to_string(),
            i_point: i_point.to_string(),
            j_point: j_point.to_string(),
            section: section.to_string(),
            releases: FrameReleases::none(),
        }
    }

    /// Set frame end releases
    pub fn with_releases(mut self, releases: FrameReleases) -> Self {
        self.releases = releases;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let frame = Frame::new("frame_0", "joint_0", "joint_1", "SHHF100X100X5");
        assert_eq!(frame.i_point, "joint_0");
        assert_eq!(frame.j_point, "joint_1");
        assert!(!frame.releases.any());
    }

    #[test]
    fn test_truss_pin_releases() {
        let releases = FrameReleases::truss_pin();
        let arr = releases.as_array();
        assert!(!arr[0]); // U1 held
        assert!(arr[3] && arr[4] && arr[5]); // i-end rotations released
        assert!(!arr[9]); // j-end torsion held
        assert!(arr[10] && arr[11]);
        assert_eq!(releases.i_springs, [0.0; 6]);
        assert!(releases.is_stable());
    }

    #[test]
    fn test_torsion_released_at_both_ends_is_unstable() {
        let mut releases = FrameReleases::truss_pin();
        releases.j_end[Dof::R1.index()] = true;
        assert!(!releases.is_stable());
    }
}
