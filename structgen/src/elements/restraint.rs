//! Restraints and degrees of freedom

use serde::{Deserialize, Serialize};

/// One of the six degrees of freedom at a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dof {
    /// Translation along 1 (global X)
    U1,
    /// Translation along 2 (global Y)
    U2,
    /// Translation along 3 (global Z)
    U3,
    /// Rotation about 1
    R1,
    /// Rotation about 2
    R2,
    /// Rotation about 3
    R3,
}

impl Dof {
    /// All six DOFs in host order [U1, U2, U3, R1, R2, R3]
    pub const ALL: [Dof; 6] = [Dof::U1, Dof::U2, Dof::U3, Dof::R1, Dof::R2, Dof::R3];

    /// Position of this DOF in a 6-component vector
    pub fn index(self) -> usize {
        match self {
            Dof::U1 => 0,
            Dof::U2 => 1,
            Dof::U3 => 2,
            Dof::R1 => 3,
            Dof::R2 => 4,
            Dof::R3 => 5,
        }
    }
}

/// Restraint condition at a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Restraint {
    /// Restrained DOFs [U1, U2, U3, R1, R2, R3]
    pub dofs: [bool; 6],
}

impl Restraint {
    /// Create a restraint with nothing fixed
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a restraint from a host-ordered boolean vector
    pub fn from_array(dofs: [bool; 6]) -> Self {
        Self { dofs }
    }

    /// Create a fully fixed restraint (all DOFs restrained)
    pub fn fixed() -> Self {
        Self { dofs: [true; 6] }
    }

    /// Create a pinned restraint (translations restrained, rotations free)
    pub fn pinned() -> Self {
        Self {
            dofs: [true, true, true, false, false, false],
        }
    }

    /// Copy of this restraint with one DOF set free.
    ///
    /// A roller is the fixed vector of the same structure with the
    /// along-span translation released.
    pub fn releasing(mut self, dof: Dof) -> Self {
        self.dofs[dof.index()] = false;
        self
    }

    /// Check whether a DOF is restrained
    pub fn is_restrained(&self, dof: Dof) -> bool {
        self.dofs[dof.index()]
    }

    /// Get the host-ordered boolean vector
    pub fn as_array(&self) -> [bool; 6] {
        self.dofs
    }

    /// DOFs on which `self` and `other` differ
    pub fn differing_dofs(&self, other: &Restraint) -> Vec<Dof> {
        Dof::ALL
            .into_iter()
            .filter(|dof| self.is_restrained(*dof) != other.is_restrained(*dof))
            .collect()
    }

    /// Count number of restrained DOFs
    pub fn num_restrained(&self) -> usize {
        self.dofs.iter().filter(|fixed| **fixed).count()
    }
}

/// Active degrees of freedom for the whole analysis model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveDof {
    /// Active DOFs [UX, UY, UZ, RX, RY, RZ]
    pub dofs: [bool; 6],
}

impl ActiveDof {
    /// Planar frame in the X-Z plane
    pub fn plane_xz() -> Self {
        Self {
            dofs: [true, false, true, false, true, false],
        }
    }
}

impl Default for ActiveDof {
    fn default() -> Self {
        Self::plane_xz()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_restraint() {
        let restraint = Restraint::fixed();
        assert_eq!(restraint.num_restrained(), 6);
        assert!(restraint.is_restrained(Dof::R3));
    }

    #[test]
    fn test_roller_differs_only_along_span() {
        let fixed = Restraint::pinned();
        let roller = fixed.releasing(Dof::U1);
        assert_eq!(roller.as_array(), [false, true, true, false, false, false]);
        assert_eq!(fixed.differing_dofs(&roller), vec![Dof::U1]);
    }

    #[test]
    fn test_plane_xz_dofs() {
        assert_eq!(
            ActiveDof::default().dofs,
            [true, false, true, false, true, false]
        );
    }
}
