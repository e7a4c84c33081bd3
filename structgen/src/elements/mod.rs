//! Structural objects module

mod frame;
mod material;
mod point;
mod restraint;
mod section;

pub use frame::{Frame, FrameReleases};
pub use material::SteelMaterial;
pub use point::Point;
pub use restraint::{ActiveDof, Dof, Restraint};
pub use section::FrameSection;
