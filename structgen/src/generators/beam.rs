//! Continuous beam on one fixed support and rollers

use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_positive, Generated};
use crate::elements::{ActiveDof, Dof, Frame, FrameSection, Point, Restraint, SteelMaterial};
use crate::error::{ModelError, ModelResult};
use crate::loads::{LoadCombination, LoadDirection, LoadPattern};
use crate::model::StructuralModel;
use crate::units::Units;

/// Parameters of a multi-span continuous beam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContinuousBeam {
    /// Span lengths, left to right
    pub spans: Vec<f64>,
    /// Elevation of the beam axis
    pub elevation: f64,
    pub units: Units,
    pub material: SteelMaterial,
    pub section: FrameSection,
    /// Superimposed dead load per length (negative is downward)
    pub sdl: f64,
    /// Live load per length
    pub ll: f64,
    /// Load direction for both patterns
    pub direction: LoadDirection,
    /// Restraint at the first joint; the other joints get it with U1 released
    pub fixed_support: Restraint,
    pub active_dof: ActiveDof,
}

impl Default for ContinuousBeam {
    fn default() -> Self {
        Self {
            spans: vec![2.5, 4.0, 4.0, 4.0, 2.5],
            elevation: 4.0,
            units: Units::KnMC,
            material: SteelMaterial::s355(),
            section: FrameSection::shhf_100x100x5(),
            sdl: -10.0,
            ll: -5.0,
            direction: LoadDirection::GlobalZ,
            fixed_support: Restraint::from_array([true, true, true, true, false, true]),
            active_dof: ActiveDof::plane_xz(),
        }
    }
}

/// Names created for a continuous beam
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BeamLayout {
    /// `joint_<i>`, left to right
    pub joints: Vec<String>,
    /// `frame_<i>`, one per span
    pub frames: Vec<String>,
    /// x coordinate of each joint
    pub stations: Vec<f64>,
}

impl BeamLayout {
    /// Span lengths recovered from the joint stations
    pub fn spans(&self) -> Vec<f64> {
        self.stations.windows(2).map(|w| w[1] - w[0]).collect()
    }
}

impl ContinuousBeam {
    pub const SDL: &'static str = "SDL";
    pub const LL: &'static str = "LL";
    pub const ULS: &'static str = "COMB1-ULS";
    pub const SLS: &'static str = "COMB2-SLS";

    /// Beam with the given spans and default everything else
    pub fn with_spans(spans: Vec<f64>) -> Self {
        Self {
            spans,
            ..Self::default()
        }
    }

    /// Joint x coordinates as the running sum of the spans
    pub fn stations(&self) -> Vec<f64> {
        let mut x = 0.0;
        let mut stations = Vec::with_capacity(self.spans.len() + 1);
        stations.push(x);
        for span in &self.spans {
            x += span;
            stations.push(x);
        }
        stations
    }

    /// Build the beam model
    pub fn generate(&self) -> ModelResult<Generated<BeamLayout>> {
        if self.spans.is_empty() {
            return Err(ModelError::InvalidGeometry(
                "continuous beam needs at least one span".to_string(),
            ));
        }
        for (i, span) in self.spans.iter().enumerate() {
            check_positive(&format!("span {i}"), *span)?;
        }
        if !self.elevation.is_finite() {
            return Err(ModelError::InvalidGeometry(format!(
                "elevation must be finite, got {}",
                self.elevation
            )));
        }

        let mut model = StructuralModel::new();
        model.set_units(self.units);
        model.add_material(self.material.clone())?;
        model.add_section(self.section.clone())?;

        let stations = self.stations();
        let mut layout = BeamLayout {
            stations: stations.clone(),
            ..BeamLayout::default()
        };

        for (i, x) in stations.iter().enumerate() {
            let name = format!("joint_{i}");
            model.add_point(Point::new(&name, *x, 0.0, self.elevation))?;
            layout.joints.push(name);
        }
        for (i, pair) in layout.joints.windows(2).enumerate() {
            let name = format!("frame_{i}");
            model.add_frame(Frame::new(&name, &pair[0], &pair[1], &self.section.name))?;
            layout.frames.push(name);
        }

        model.add_load_pattern(LoadPattern::super_dead(Self::SDL))?;
        model.add_load_pattern(LoadPattern::live(Self::LL))?;

        model.add_load_combo(
            LoadCombination::new(Self::ULS)
                .with_case("Dead", 1.35)
                .with_case(Self::SDL, 1.35)
                .with_case(Self::LL, 1.5),
        )?;
        model.add_load_combo(
            LoadCombination::new(Self::SLS)
                .with_case("Dead", 1.0)
                .with_case(Self::SDL, 1.0)
                .with_case(Self::LL, 1.0),
        )?;

        model.add_uniform_load(&layout.frames, Self::SDL, self.direction, self.sdl)?;
        model.add_uniform_load(&layout.frames, Self::LL, self.direction, self.ll)?;

        model.assign_supports(
            &layout.joints[0],
            &layout.joints[1..],
            self.fixed_support,
            Dof::U1,
        )?;
        model.set_active_dof(self.active_dof);

        debug!(
            "Generated continuous beam: {} joints, {} frames, length {}",
            layout.joints.len(),
            layout.frames.len(),
            stations.last().copied().unwrap_or_default()
        );

        Ok(Generated { model, layout })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_beam_stations() {
        let generated = ContinuousBeam::default().generate().unwrap();
        let expected = [0.0, 2.5, 6.5, 10.5, 14.5, 17.0];
        assert_eq!(generated.layout.joints.len(), 6);
        assert_eq!(generated.layout.frames.len(), 5);
        for (name, x) in generated.layout.joints.iter().zip(expected) {
            let point = generated.model.point(name).unwrap();
            assert_relative_eq!(point.x, x, epsilon = 1e-12);
            assert_relative_eq!(point.z, 4.0);
        }
    }

    #[test]
    fn test_spans_recovered_from_layout() {
        let beam = ContinuousBeam::with_spans(vec![3.0, 5.5]);
        let generated = beam.generate().unwrap();
        let spans = generated.layout.spans();
        assert_relative_eq!(spans[0], 3.0);
        assert_relative_eq!(spans[1], 5.5);
        assert_relative_eq!(generated.model.frame_length("frame_1").unwrap(), 5.5);
    }

    #[test]
    fn test_frames_connect_consecutive_joints() {
        let generated = ContinuousBeam::default().generate().unwrap();
        for (i, name) in generated.layout.frames.iter().enumerate() {
            let frame = generated.model.frame(name).unwrap();
            assert_eq!(frame.i_point, format!("joint_{i}"));
            assert_eq!(frame.j_point, format!("joint_{}", i + 1));
            assert_eq!(frame.section, "SHHF100X100X5");
        }
    }

    #[test]
    fn test_single_span_beam() {
        let generated = ContinuousBeam::with_spans(vec![6.0]).generate().unwrap();
        assert_eq!(generated.model.points().len(), 2);
        assert_eq!(generated.model.restraints().len(), 2);
    }

    #[test]
    fn test_degenerate_spans_rejected() {
        for spans in [vec![], vec![4.0, 0.0], vec![-1.0], vec![f64::NAN]] {
            let err = ContinuousBeam::with_spans(spans).generate().unwrap_err();
            assert!(matches!(err, ModelError::InvalidGeometry(_)));
        }
    }

    #[test]
    fn test_roller_supports() {
        let generated = ContinuousBeam::default().generate().unwrap();
        let model = &generated.model;
        let fixed = model.restraint("joint_0").unwrap();
        assert_eq!(fixed.as_array(), [true, true, true, true, false, true]);
        for joint in &generated.layout.joints[1..] {
            let roller = model.restraint(joint).unwrap();
            assert_eq!(fixed.differing_dofs(&roller), vec![Dof::U1]);
        }
    }
}
