//! Pratt-style planar truss with pinned members

use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_positive, Generated};
use crate::elements::{
    ActiveDof, Dof, Frame, FrameReleases, FrameSection, Point, Restraint, SteelMaterial,
};
use crate::error::{ModelError, ModelResult};
use crate::loads::{LoadCombination, LoadPattern, PointLoad};
use crate::model::StructuralModel;
use crate::units::Units;

/// Parameters of a parallel-chord truss
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrattTruss {
    /// Overall length
    pub length: f64,
    /// Distance between the chords
    pub depth: f64,
    /// Number of bays
    pub bays: usize,
    /// Elevation of the upper chord
    pub elevation: f64,
    pub units: Units,
    pub material: SteelMaterial,
    pub section: FrameSection,
    /// Superimposed dead load on every upper-chord joint
    pub sdl: [f64; 6],
    /// Live load on every upper-chord joint
    pub ll: [f64; 6],
    /// Restraint at the left lower-chord joint; the right one gets it with U1 released
    pub fixed_support: Restraint,
    pub active_dof: ActiveDof,
}

impl Default for PrattTruss {
    fn default() -> Self {
        Self {
            length: 30.0,
            depth: 2.0,
            bays: 10,
            elevation: 12.0,
            units: Units::KnMC,
            material: SteelMaterial::s355(),
            section: FrameSection::shhf_100x100x5(),
            sdl: [0.0, 0.0, -100.0, 0.0, 0.0, 0.0],
            ll: [0.0, 0.0, -50.0, 0.0, 0.0, 0.0],
            fixed_support: Restraint::pinned(),
            active_dof: ActiveDof::plane_xz(),
        }
    }
}

/// Names created for a truss, grouped by member role
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrussLayout {
    pub upper_joints: Vec<String>,
    pub lower_joints: Vec<String>,
    pub upper_chords: Vec<String>,
    pub lower_chords: Vec<String>,
    pub diagonals: Vec<String>,
    pub posts: Vec<String>,
}

impl TrussLayout {
    /// Every frame in creation order
    pub fn frames(&self) -> Vec<String> {
        let bays = self.upper_chords.len();
        let mut frames = Vec::with_capacity(3 * bays + self.posts.len());
        for i in 0..bays {
            frames.push(self.upper_chords[i].clone());
            frames.push(self.lower_chords[i].clone());
            frames.push(self.diagonals[i].clone());
        }
        frames.extend(self.posts.iter().cloned());
        frames
    }
}

impl PrattTruss {
    pub const SDL: &'static str = "SDL";
    pub const LL: &'static str = "LL";
    pub const ULS: &'static str = "COMB1-ULS";
    pub const SLS: &'static str = "COMB2-SLS";

    /// Truss with the given overall dimensions and default everything else
    pub fn new(length: f64, depth: f64, bays: usize) -> Self {
        Self {
            length,
            depth,
            bays,
            ..Self::default()
        }
    }

    /// Panel width
    pub fn bay_width(&self) -> f64 {
        self.length / self.bays as f64
    }

    /// Build the truss model
    pub fn generate(&self) -> ModelResult<Generated<TrussLayout>> {
        check_positive("truss length", self.length)?;
        check_positive("truss depth", self.depth)?;
        if self.bays == 0 {
            return Err(ModelError::InvalidGeometry(
                "truss needs at least one bay".to_string(),
            ));
        }
        if !self.elevation.is_finite() {
            return Err(ModelError::InvalidGeometry(format!(
                "elevation must be finite, got {}",
                self.elevation
            )));
        }

        let n = self.bays;
        let mut model = StructuralModel::new();
        model.set_units(self.units);
        model.add_material(self.material.clone())?;
        model.add_section(self.section.clone())?;

        let mut layout = TrussLayout::default();
        for i in 0..=n {
            let x = i as f64 * self.length / n as f64;
            let upper = format!("upper_chord_{i}");
            let lower = format!("lower_chord_{i}");
            model.add_point(Point::new(&upper, x, 0.0, self.elevation))?;
            model.add_point(Point::new(&lower, x, 0.0, self.elevation - self.depth))?;
            layout.upper_joints.push(upper);
            layout.lower_joints.push(lower);
        }

        let section = self.section.name.as_str();
        let bar = |name: &str, i: &str, j: &str| {
            Frame::new(name, i, j, section).with_releases(FrameReleases::truss_pin())
        };

        for i in 0..n {
            let (upper_i, upper_j) = (
                layout.upper_joints[i].as_str(),
                layout.upper_joints[i + 1].as_str(),
            );
            let (lower_i, lower_j) = (
                layout.lower_joints[i].as_str(),
                layout.lower_joints[i + 1].as_str(),
            );

            let upper_chord = format!("upper_chord_f_{i}");
            let lower_chord = format!("lower_chord_f_{i}");
            let diagonal = format!("diagonals_f_{i}");
            model.add_frame(bar(upper_chord.as_str(), upper_i, upper_j))?;
            model.add_frame(bar(lower_chord.as_str(), lower_i, lower_j))?;
            model.add_frame(bar(diagonal.as_str(), upper_i, lower_j))?;
            layout.upper_chords.push(upper_chord);
            layout.lower_chords.push(lower_chord);
            layout.diagonals.push(diagonal);
        }
        for i in 0..=n {
            let post = format!("post_f_{i}");
            model.add_frame(bar(
                post.as_str(),
                layout.upper_joints[i].as_str(),
                layout.lower_joints[i].as_str(),
            ))?;
            layout.posts.push(post);
        }

        model.add_load_pattern(LoadPattern::super_dead(Self::SDL))?;
        model.add_load_pattern(LoadPattern::live(Self::LL))?;

        model.add_load_combo(
            LoadCombination::new(Self::ULS)
                .with_case(Self::SDL, 1.35)
                .with_case(Self::LL, 1.5),
        )?;
        model.add_load_combo(
            LoadCombination::new(Self::SLS)
                .with_case(Self::SDL, 1.0)
                .with_case(Self::LL, 1.0),
        )?;

        model.add_joint_loads(&layout.upper_joints, &PointLoad::new(Self::SDL, self.sdl))?;
        model.add_joint_loads(&layout.upper_joints, &PointLoad::new(Self::LL, self.ll))?;

        model.assign_supports(
            &layout.lower_joints[0],
            &layout.lower_joints[n..],
            self.fixed_support,
            Dof::U1,
        )?;
        model.set_active_dof(self.active_dof);

        debug!(
            "Generated truss: {} bays of {:.3}, {} points, {} frames",
            n,
            self.bay_width(),
            model.points().len(),
            model.frames().len()
        );

        Ok(Generated { model, layout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_truss_counts() {
        let generated = PrattTruss::default().generate().unwrap();
        let summary = generated.model.summary();
        assert_eq!(summary.num_points, 22);
        assert_eq!(summary.num_frames, 41);
        assert_eq!(summary.num_released_frames, 41);
        assert_eq!(summary.num_point_loads, 22);
    }

    #[test]
    fn test_chords_share_stations() {
        let truss = PrattTruss::new(12.0, 1.5, 4);
        let generated = truss.generate().unwrap();
        let model = &generated.model;
        for (i, (upper, lower)) in generated
            .layout
            .upper_joints
            .iter()
            .zip(&generated.layout.lower_joints)
            .enumerate()
        {
            let upper = model.point(upper).unwrap();
            let lower = model.point(lower).unwrap();
            assert_relative_eq!(upper.x, i as f64 * 3.0, epsilon = 1e-12);
            assert_relative_eq!(upper.x, lower.x);
            assert_relative_eq!(upper.z - lower.z, 1.5, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_frame_creation_order() {
        let generated = PrattTruss::new(6.0, 1.0, 2).generate().unwrap();
        let names: Vec<&str> = generated
            .model
            .frames()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(
            names,
            [
                "upper_chord_f_0",
                "lower_chord_f_0",
                "diagonals_f_0",
                "upper_chord_f_1",
                "lower_chord_f_1",
                "diagonals_f_1",
                "post_f_0",
                "post_f_1",
                "post_f_2",
            ]
        );
        assert_eq!(generated.layout.frames(), names);
    }

    #[test]
    fn test_diagonal_runs_down_to_next_bay() {
        let generated = PrattTruss::default().generate().unwrap();
        let diagonal = generated.model.frame("diagonals_f_3").unwrap();
        assert_eq!(diagonal.i_point, "upper_chord_3");
        assert_eq!(diagonal.j_point, "lower_chord_4");
        let length = generated.model.frame_length("diagonals_f_3").unwrap();
        assert_relative_eq!(length, (3.0f64.powi(2) + 2.0f64.powi(2)).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn test_supports_on_lower_chord_ends() {
        let generated = PrattTruss::default().generate().unwrap();
        let model = &generated.model;
        assert_eq!(model.restraints().len(), 2);
        assert_eq!(model.restraint("lower_chord_0"), Some(Restraint::pinned()));
        assert_eq!(
            model.restraint("lower_chord_10").unwrap().as_array(),
            [false, true, true, false, false, false]
        );
        assert!(model.restraint("upper_chord_0").is_none());
    }

    #[test]
    fn test_single_bay_truss() {
        let generated = PrattTruss::new(5.0, 1.0, 1).generate().unwrap();
        assert_eq!(generated.model.points().len(), 4);
        assert_eq!(generated.model.frames().len(), 5);
    }

    #[test]
    fn test_degenerate_truss_rejected() {
        for truss in [
            PrattTruss::new(30.0, 2.0, 0),
            PrattTruss::new(0.0, 2.0, 10),
            PrattTruss::new(30.0, -2.0, 10),
            PrattTruss::new(f64::INFINITY, 2.0, 10),
        ] {
            assert!(matches!(truss.generate(), Err(ModelError::InvalidGeometry(_))));
        }
    }
}
