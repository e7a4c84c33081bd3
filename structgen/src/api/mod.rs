//! Automation interface of the host analysis application
//!
//! [`AutomationApi`] lists the host capabilities the apply step needs. Every
//! method mirrors one host call and returns the host's verdict unchanged.
//! [`ApiCall`] is the owned record of one such call, shared by the
//! [`RecordingApi`] host double and the [`ScriptWriter`] bridge.

mod recording;
mod script;

pub use recording::RecordingApi;
pub use script::ScriptWriter;

use serde::{Deserialize, Serialize};

use crate::elements::{ActiveDof, FrameReleases, FrameSection, Restraint, SteelMaterial};
use crate::error::ApiResult;
use crate::loads::{ComboEntry, ComboType, DistributedLoad, LoadPattern, PointLoad};
use crate::results::FrameForces;
use crate::units::Units;

/// Capabilities of the host application
pub trait AutomationApi {
    fn set_present_units(&mut self, units: Units) -> ApiResult<()>;

    fn define_material(&mut self, material: &SteelMaterial) -> ApiResult<()>;

    fn import_section(&mut self, section: &FrameSection) -> ApiResult<()>;

    /// Create a point; the host may rename it and returns the name it used
    fn add_point(&mut self, name: &str, coords: [f64; 3]) -> ApiResult<String>;

    /// Create a frame between two host points; returns the host name
    fn add_frame(&mut self, name: &str, i_point: &str, j_point: &str, section: &str) -> ApiResult<String>;

    fn set_frame_releases(&mut self, frame: &str, releases: &FrameReleases) -> ApiResult<()>;

    fn add_load_pattern(&mut self, pattern: &LoadPattern) -> ApiResult<()>;

    fn add_combination(&mut self, name: &str, combo_type: ComboType) -> ApiResult<()>;

    fn set_combination_entry(&mut self, combo: &str, entry: &ComboEntry) -> ApiResult<()>;

    fn set_distributed_load(&mut self, frame: &str, load: &DistributedLoad) -> ApiResult<()>;

    fn set_point_load(&mut self, point: &str, load: &PointLoad) -> ApiResult<()>;

    fn set_restraint(&mut self, point: &str, restraint: &Restraint) -> ApiResult<()>;

    fn set_active_dof(&mut self, dof: &ActiveDof) -> ApiResult<()>;

    fn run_analysis(&mut self) -> ApiResult<()>;

    /// Frame forces of one frame under one case or combination
    fn frame_forces(&mut self, frame: &str, combo: &str) -> ApiResult<FrameForces>;
}

/// One host call with its arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum ApiCall {
    SetPresentUnits { units: i32 },
    DefineMaterial { material: SteelMaterial },
    ImportSection { section: FrameSection },
    AddPoint { name: String, coords: [f64; 3] },
    AddFrame {
        name: String,
        i_point: String,
        j_point: String,
        section: String,
    },
    SetFrameReleases { frame: String, releases: FrameReleases },
    AddLoadPattern {
        name: String,
        pattern_type: i32,
        self_weight_multiplier: f64,
        add_analysis_case: bool,
    },
    AddCombination { name: String, combo_type: i32 },
    SetCombinationEntry {
        combo: String,
        kind: i32,
        name: String,
        factor: f64,
    },
    SetDistributedLoad {
        frame: String,
        pattern: String,
        kind: i32,
        direction: i32,
        dist1: f64,
        dist2: f64,
        val1: f64,
        val2: f64,
        csys: String,
        relative: bool,
        replace: bool,
    },
    SetPointLoad {
        point: String,
        pattern: String,
        values: [f64; 6],
        csys: String,
        replace: bool,
    },
    SetRestraint { point: String, dofs: [bool; 6] },
    SetActiveDof { dofs: [bool; 6] },
    RunAnalysis,
    FrameForces { frame: String, combo: String },
}

impl ApiCall {
    /// Host call name, as used in error reports and scripts
    pub fn name(&self) -> &'static str {
        match self {
            Self::SetPresentUnits { .. } => "set_present_units",
            Self::DefineMaterial { .. } => "define_material",
            Self::ImportSection { .. } => "import_section",
            Self::AddPoint { .. } => "add_point",
            Self::AddFrame { .. } => "add_frame",
            Self::SetFrameReleases { .. } => "set_frame_releases",
            Self::AddLoadPattern { .. } => "add_load_pattern",
            Self::AddCombination { .. } => "add_combination",
            Self::SetCombinationEntry { .. } => "set_combination_entry",
            Self::SetDistributedLoad { .. } => "set_distributed_load",
            Self::SetPointLoad { .. } => "set_point_load",
            Self::SetRestraint { .. } => "set_restraint",
            Self::SetActiveDof { .. } => "set_active_dof",
            Self::RunAnalysis => "run_analysis",
            Self::FrameForces { .. } => "frame_forces",
        }
    }

    pub fn units(units: Units) -> Self {
        Self::SetPresentUnits { units: units.code() }
    }

    pub fn load_pattern(pattern: &LoadPattern) -> Self {
        Self::AddLoadPattern {
            name: pattern.name.clone(),
            pattern_type: pattern.pattern_type.code(),
            self_weight_multiplier: pattern.self_weight_multiplier,
            add_analysis_case: pattern.add_analysis_case,
        }
    }

    pub fn combination_entry(combo: &str, entry: &ComboEntry) -> Self {
        Self::SetCombinationEntry {
            combo: combo.to_string(),
            kind: entry.kind.code(),
            name: entry.name.clone(),
            factor: entry.factor,
        }
    }

    pub fn distributed_load(frame: &str, load: &DistributedLoad) -> Self {
        Self::SetDistributedLoad {
            frame: frame.to_string(),
            pattern: load.pattern.clone(),
            kind: load.kind.code(),
            direction: load.direction.code(),
            dist1: load.dist1,
            dist2: load.dist2,
            val1: load.val1,
            val2: load.val2,
            csys: load.csys.clone(),
            relative: load.relative,
            replace: load.replace,
        }
    }

    pub fn point_load(point: &str, load: &PointLoad) -> Self {
        Self::SetPointLoad {
            point: point.to_string(),
            pattern: load.pattern.clone(),
            values: load.values,
            csys: load.csys.clone(),
            replace: load.replace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loads::{EntryKind, LoadDirection};

    #[test]
    fn test_call_serializes_with_tag() {
        let call = ApiCall::AddPoint {
            name: "joint_0".to_string(),
            coords: [0.0, 0.0, 4.0],
        };
        let json = serde_json::to_value(&call).unwrap();
        assert_eq!(json["call"], "add_point");
        assert_eq!(json["name"], "joint_0");
        assert_eq!(call.name(), "add_point");

        let back: ApiCall = serde_json::from_value(json).unwrap();
        assert_eq!(back, call);
    }

    #[test]
    fn test_records_carry_host_codes() {
        let load = DistributedLoad::uniform("SDL", LoadDirection::GlobalZ, -10.0);
        match ApiCall::distributed_load("frame_0", &load) {
            ApiCall::SetDistributedLoad { kind, direction, dist2, .. } => {
                assert_eq!(kind, 1);
                assert_eq!(direction, 6);
                assert_eq!(dist2, 1.0);
            }
            other => panic!("unexpected call {other:?}"),
        }

        let entry = ComboEntry {
            kind: EntryKind::Case,
            name: "LL".to_string(),
            factor: 1.5,
        };
        let json = serde_json::to_value(ApiCall::combination_entry("COMB1-ULS", &entry)).unwrap();
        assert_eq!(json["kind"], 0);
        assert_eq!(json["factor"], 1.5);
    }
}
