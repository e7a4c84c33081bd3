//! Transmit a model through an automation interface

use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::api::AutomationApi;
use crate::error::{ApiResult, ApplyError, ApplyResult};
use crate::model::StructuralModel;
use crate::results::FrameForces;

/// What the host made of a transmitted model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppliedModel {
    /// Model point name -> host point name
    pub point_names: HashMap<String, String>,
    /// Model frame name -> host frame name
    pub frame_names: HashMap<String, String>,
    /// Number of calls issued
    pub calls: usize,
}

impl AppliedModel {
    pub fn host_point(&self, name: &str) -> ApplyResult<&str> {
        self.point_names
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ApplyError::UnknownName(name.to_string()))
    }

    pub fn host_frame(&self, name: &str) -> ApplyResult<&str> {
        self.frame_names
            .get(name)
            .map(String::as_str)
            .ok_or_else(|| ApplyError::UnknownName(name.to_string()))
    }
}

/// Frames and combination to read back after analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultRequest {
    /// Model frame names
    pub frames: Vec<String>,
    /// Load case or combination name
    pub combo: String,
}

/// Forces read back for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameResult {
    pub frame: String,
    pub combo: String,
    pub forces: FrameForces,
}

/// Numbers calls and turns host failures into [`ApplyError::Host`]
struct Sequence<'a, A: AutomationApi + ?Sized> {
    api: &'a mut A,
    issued: usize,
}

impl<'a, A: AutomationApi + ?Sized> Sequence<'a, A> {
    fn new(api: &'a mut A) -> Self {
        Self { api, issued: 0 }
    }

    fn issue<T>(&mut self, call: &'static str, f: impl FnOnce(&mut A) -> ApiResult<T>) -> ApplyResult<T> {
        let index = self.issued;
        self.issued += 1;
        f(&mut *self.api).map_err(|source| ApplyError::Host { index, call, source })
    }
}

/// Send every entity of `model` to the host in dependency order.
///
/// The model is validated first; nothing is sent if that fails. The first
/// failing call aborts the sequence and whatever the host already holds is
/// left in place.
pub fn apply_model<A: AutomationApi + ?Sized>(model: &StructuralModel, api: &mut A) -> ApplyResult<AppliedModel> {
    model.validate()?;

    let mut seq = Sequence::new(api);
    let mut applied = AppliedModel::default();

    info!("Applying model: {:?}", model.summary());

    seq.issue("set_present_units", |api| api.set_present_units(model.units()))?;
    for material in model.materials() {
        debug!("Defining material {}", material.name);
        seq.issue("define_material", |api| api.define_material(material))?;
    }
    for section in model.sections() {
        debug!("Importing section {} from {}", section.name, section.library_file);
        seq.issue("import_section", |api| api.import_section(section))?;
    }

    info!("Creating {} points", model.points().len());
    for point in model.points() {
        let host_name = seq.issue("add_point", |api| api.add_point(&point.name, point.coords()))?;
        debug!("Point {} -> {}", point.name, host_name);
        applied.point_names.insert(point.name.clone(), host_name);
    }

    info!("Creating {} frames", model.frames().len());
    for frame in model.frames() {
        let i_point = applied.host_point(&frame.i_point)?;
        let j_point = applied.host_point(&frame.j_point)?;
        let host_name = seq.issue("add_frame", |api| {
            api.add_frame(&frame.name, i_point, j_point, &frame.section)
        })?;
        debug!("Frame {} ({} -> {}) -> {}", frame.name, i_point, j_point, host_name);
        applied.frame_names.insert(frame.name.clone(), host_name);
    }
    for frame in model.frames().iter().filter(|f| f.releases.any()) {
        let host_name = applied.host_frame(&frame.name)?;
        seq.issue("set_frame_releases", |api| {
            api.set_frame_releases(host_name, &frame.releases)
        })?;
    }

    info!("Defining load patterns and combinations");
    for pattern in model.load_patterns().iter().filter(|p| !p.builtin) {
        debug!("Load pattern {} ({:?})", pattern.name, pattern.pattern_type);
        seq.issue("add_load_pattern", |api| api.add_load_pattern(pattern))?;
    }
    for combo in model.load_combos() {
        seq.issue("add_combination", |api| api.add_combination(&combo.name, combo.combo_type))?;
    }
    for combo in model.load_combos() {
        debug!("Combination {} = {}", combo.name, combo.equation());
        for entry in &combo.entries {
            seq.issue("set_combination_entry", |api| {
                api.set_combination_entry(&combo.name, entry)
            })?;
        }
    }

    info!("Assigning loads and restraints");
    for assignment in model.distributed_loads() {
        let frame = applied.host_frame(&assignment.frame)?;
        seq.issue("set_distributed_load", |api| {
            api.set_distributed_load(frame, &assignment.load)
        })?;
    }
    for assignment in model.point_loads() {
        let point = applied.host_point(&assignment.point)?;
        seq.issue("set_point_load", |api| api.set_point_load(point, &assignment.load))?;
    }
    for assignment in model.restraints() {
        let point = applied.host_point(&assignment.point)?;
        debug!("Restraint {} {:?}", point, assignment.restraint.as_array());
        seq.issue("set_restraint", |api| api.set_restraint(point, &assignment.restraint))?;
    }
    seq.issue("set_active_dof", |api| api.set_active_dof(&model.active_dof()))?;

    applied.calls = seq.issued;
    info!("Model applied in {} calls", applied.calls);
    Ok(applied)
}

/// Run the host analysis
pub fn run_analysis<A: AutomationApi + ?Sized>(api: &mut A) -> ApplyResult<()> {
    info!("Running analysis");
    Sequence::new(api).issue("run_analysis", |api| api.run_analysis())
}

/// Read back frame forces for every requested frame
pub fn fetch_frame_forces<A: AutomationApi + ?Sized>(
    api: &mut A,
    applied: &AppliedModel,
    request: &ResultRequest,
) -> ApplyResult<Vec<FrameResult>> {
    let mut seq = Sequence::new(api);
    let mut results = Vec::with_capacity(request.frames.len());
    for frame in &request.frames {
        let host_name = applied.host_frame(frame)?;
        let forces = seq.issue("frame_forces", |api| api.frame_forces(host_name, &request.combo))?;
        debug!("Fetched {} stations for {} under {}", forces.len(), frame, request.combo);
        results.push(FrameResult {
            frame: frame.clone(),
            combo: request.combo.clone(),
            forces,
        });
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiCall, RecordingApi};
    use crate::elements::{Frame, FrameSection, Point, SteelMaterial};
    use crate::error::{ApiError, ModelError};
    use crate::generators::ContinuousBeam;
    use crate::results::StationForces;

    #[test]
    fn test_call_order_for_beam() {
        let generated = ContinuousBeam::with_spans(vec![4.0]).generate().unwrap();
        let mut api = RecordingApi::new();
        let applied = apply_model(&generated.model, &mut api).unwrap();

        assert_eq!(
            api.call_names(),
            [
                "set_present_units",
                "define_material",
                "import_section",
                "add_point",
                "add_point",
                "add_frame",
                "add_load_pattern",
                "add_load_pattern",
                "add_combination",
                "add_combination",
                "set_combination_entry",
                "set_combination_entry",
                "set_combination_entry",
                "set_combination_entry",
                "set_combination_entry",
                "set_combination_entry",
                "set_distributed_load",
                "set_distributed_load",
                "set_restraint",
                "set_restraint",
                "set_active_dof",
            ]
        );
        assert_eq!(applied.calls, api.calls().len());
        assert_eq!(applied.host_frame("frame_0").unwrap(), "frame_0");
    }

    #[test]
    fn test_invalid_model_sends_nothing() {
        let mut model = StructuralModel::new();
        model.add_material(SteelMaterial::s355()).unwrap();
        model.add_section(FrameSection::shhf_100x100x5()).unwrap();
        model.add_point(Point::new("a", 1.0, 0.0, 0.0)).unwrap();
        model.add_point(Point::new("b", 1.0, 0.0, 0.0)).unwrap();
        model
            .add_frame(Frame::new("ab", "a", "b", "SHHF100X100X5"))
            .unwrap();

        let mut api = RecordingApi::new();
        let err = apply_model(&model, &mut api).unwrap_err();
        assert!(matches!(err, ApplyError::Model(ModelError::InvalidGeometry(_))));
        assert_eq!(api.issued(), 0);
    }

    #[test]
    fn test_host_rejection_aborts() {
        let generated = ContinuousBeam::default().generate().unwrap();
        let mut api = RecordingApi::new();
        // the host already holds a point of the same name
        api.add_point("joint_3", [0.0; 3]).unwrap();

        let err = apply_model(&generated.model, &mut api).unwrap_err();
        match err {
            ApplyError::Host { index, call, source } => {
                assert_eq!(index, 6);
                assert_eq!(call, "add_point");
                assert!(matches!(source, ApiError::Status { status: 1, .. }));
            }
            other => panic!("unexpected error {other}"),
        }
        assert_eq!(api.count("add_frame"), 0);
    }

    #[test]
    fn test_results_after_analysis() {
        let generated = ContinuousBeam::default().generate().unwrap();
        let mut api = RecordingApi::new();
        let applied = apply_model(&generated.model, &mut api).unwrap();
        let request = ResultRequest {
            frames: vec!["frame_2".to_string()],
            combo: ContinuousBeam::ULS.to_string(),
        };

        assert!(fetch_frame_forces(&mut api, &applied, &request).is_err());
        run_analysis(&mut api).unwrap();
        let results = fetch_frame_forces(&mut api, &applied, &request).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].forces.len(), 3);
        assert_eq!(
            api.calls().last(),
            Some(&ApiCall::FrameForces {
                frame: "frame_2".to_string(),
                combo: "COMB1-ULS".to_string(),
            })
        );

        let unknown = ResultRequest {
            frames: vec!["frame_9".to_string()],
            combo: "COMB1-ULS".to_string(),
        };
        assert!(matches!(
            fetch_frame_forces(&mut api, &applied, &unknown),
            Err(ApplyError::UnknownName(_))
        ));
    }

    #[test]
    fn test_preset_forces_are_returned() {
        let generated = ContinuousBeam::default().generate().unwrap();
        let mut preset = FrameForces::default();
        preset.push("frame_2", "COMB1-ULS", StationForces::from_array(0.0, [0.0, 31.5, 0.0, 0.0, 0.0, -24.2]));
        preset.push("frame_2", "COMB1-ULS", StationForces::from_array(2.0, [0.0, 0.1, 0.0, 0.0, 0.0, 7.4]));
        preset.push("frame_2", "COMB1-ULS", StationForces::from_array(4.0, [0.0, -31.3, 0.0, 0.0, 0.0, -23.8]));

        let mut api = RecordingApi::new().with_frame_forces("frame_2", "COMB1-ULS", preset.clone());
        let applied = apply_model(&generated.model, &mut api).unwrap();
        run_analysis(&mut api).unwrap();

        let request = ResultRequest {
            frames: vec!["frame_2".to_string(), "frame_3".to_string()],
            combo: "COMB1-ULS".to_string(),
        };
        let results = fetch_frame_forces(&mut api, &applied, &request).unwrap();
        assert_eq!(results[0].forces, preset);
        assert_eq!(results[0].forces.max_abs_m3(), 24.2);
        // frames without a preset fall back to zero forces
        assert_eq!(results[1].forces.max_abs_m3(), 0.0);
        assert_eq!(results[1].forces.len(), 3);
    }
}
