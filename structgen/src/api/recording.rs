//! In-memory host double

use std::collections::{HashMap, HashSet};

use log::{debug, warn};

use super::{ApiCall, AutomationApi};
use crate::elements::{ActiveDof, FrameReleases, FrameSection, Restraint, SteelMaterial};
use crate::error::{ApiError, ApiResult};
use crate::loads::{ComboEntry, ComboType, DistributedLoad, EntryKind, LoadPattern, PointLoad};
use crate::results::{FrameForces, StationForces};
use crate::units::Units;

/// Status code the host returns for a rejected call
const HOST_REJECTED: i32 = 1;

/// Host double that keeps every accepted call in order.
///
/// It checks names the way the host does: duplicates and dangling references
/// come back as a non-zero status. The host's built-in `Dead` pattern exists
/// from the start. Frame forces are only available after [`run_analysis`].
///
/// [`run_analysis`]: AutomationApi::run_analysis
#[derive(Debug, Default)]
pub struct RecordingApi {
    calls: Vec<ApiCall>,
    issued: usize,
    fail_at: Option<usize>,
    materials: HashSet<String>,
    sections: HashSet<String>,
    points: HashMap<String, [f64; 3]>,
    frames: HashMap<String, (String, String)>,
    patterns: HashSet<String>,
    combos: HashSet<String>,
    results: HashMap<(String, String), FrameForces>,
    analyzed: bool,
}

impl RecordingApi {
    pub fn new() -> Self {
        let mut api = Self::default();
        api.patterns.insert("Dead".to_string());
        api
    }

    /// Make the call with zero-based index `index` raise a fault
    pub fn fail_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Preset the forces returned for a frame and combination after analysis
    pub fn with_frame_forces(mut self, frame: &str, combo: &str, forces: FrameForces) -> Self {
        self.results
            .insert((frame.to_string(), combo.to_string()), forces);
        self
    }

    /// Accepted calls in order
    pub fn calls(&self) -> &[ApiCall] {
        &self.calls
    }

    /// Number of calls issued, accepted or not
    pub fn issued(&self) -> usize {
        self.issued
    }

    /// Names of the accepted calls in order
    pub fn call_names(&self) -> Vec<&'static str> {
        self.calls.iter().map(ApiCall::name).collect()
    }

    /// Count accepted calls with the given name
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.name() == call).count()
    }

    /// Serialize the accepted calls as JSON lines
    pub fn to_json_lines(&self) -> serde_json::Result<String> {
        let mut out = String::new();
        for call in &self.calls {
            out.push_str(&serde_json::to_string(call)?);
            out.push('\n');
        }
        Ok(out)
    }

    fn begin(&mut self, call: &'static str) -> ApiResult<()> {
        let index = self.issued;
        self.issued += 1;
        if self.fail_at == Some(index) {
            warn!("Injected fault on call #{index} ({call})");
            return Err(ApiError::Fault {
                call,
                message: format!("injected fault at call #{index}"),
            });
        }
        Ok(())
    }

    fn reject(call: &'static str, reason: String) -> ApiError {
        debug!("Host rejected {call}: {reason}");
        ApiError::Status {
            call,
            status: HOST_REJECTED,
        }
    }

    fn require(call: &'static str, known: bool, what: &str, name: &str) -> ApiResult<()> {
        if known {
            Ok(())
        } else {
            Err(Self::reject(call, format!("unknown {what} '{name}'")))
        }
    }

    fn accept(&mut self, call: ApiCall) {
        self.calls.push(call);
    }
}

impl AutomationApi for RecordingApi {
    fn set_present_units(&mut self, units: Units) -> ApiResult<()> {
        self.begin("set_present_units")?;
        self.accept(ApiCall::units(units));
        Ok(())
    }

    fn define_material(&mut self, material: &SteelMaterial) -> ApiResult<()> {
        self.begin("define_material")?;
        // redefining a material overwrites it on the host
        self.materials.insert(material.name.clone());
        self.accept(ApiCall::DefineMaterial {
            material: material.clone(),
        });
        Ok(())
    }

    fn import_section(&mut self, section: &FrameSection) -> ApiResult<()> {
        const CALL: &str = "import_section";
        self.begin(CALL)?;
        Self::require(CALL, self.materials.contains(&section.material), "material", &section.material)?;
        self.sections.insert(section.name.clone());
        self.accept(ApiCall::ImportSection {
            section: section.clone(),
        });
        Ok(())
    }

    fn add_point(&mut self, name: &str, coords: [f64; 3]) -> ApiResult<String> {
        const CALL: &str = "add_point";
        self.begin(CALL)?;
        // the host picks a name when none is given
        let host_name = if name.is_empty() {
            (self.points.len() + 1).to_string()
        } else {
            name.to_string()
        };
        if self.points.contains_key(&host_name) {
            return Err(Self::reject(CALL, format!("duplicate point '{host_name}'")));
        }
        self.points.insert(host_name.clone(), coords);
        self.accept(ApiCall::AddPoint {
            name: host_name.clone(),
            coords,
        });
        Ok(host_name)
    }

    fn add_frame(&mut self, name: &str, i_point: &str, j_point: &str, section: &str) -> ApiResult<String> {
        const CALL: &str = "add_frame";
        self.begin(CALL)?;
        Self::require(CALL, self.points.contains_key(i_point), "point", i_point)?;
        Self::require(CALL, self.points.contains_key(j_point), "point", j_point)?;
        Self::require(CALL, self.sections.contains(section), "section", section)?;
        let host_name = if name.is_empty() {
            (self.frames.len() + 1).to_string()
        } else {
            name.to_string()
        };
        if self.frames.contains_key(&host_name) {
            return Err(Self::reject(CALL, format!("duplicate frame '{host_name}'")));
        }
        self.frames
            .insert(host_name.clone(), (i_point.to_string(), j_point.to_string()));
        self.accept(ApiCall::AddFrame {
            name: host_name.clone(),
            i_point: i_point.to_string(),
            j_point: j_point.to_string(),
            section: section.to_string(),
        });
        Ok(host_name)
    }

    fn set_frame_releases(&mut self, frame: &str, releases: &FrameReleases) -> ApiResult<()> {
        const CALL: &str = "set_frame_releases";
        self.begin(CALL)?;
        Self::require(CALL, self.frames.contains_key(frame), "frame", frame)?;
        if !releases.is_stable() {
            return Err(Self::reject(CALL, format!("unstable releases on '{frame}'")));
        }
        self.accept(ApiCall::SetFrameReleases {
            frame: frame.to_string(),
            releases: *releases,
        });
        Ok(())
    }

    fn add_load_pattern(&mut self, pattern: &LoadPattern) -> ApiResult<()> {
        const CALL: &str = "add_load_pattern";
        self.begin(CALL)?;
        if !self.patterns.insert(pattern.name.clone()) {
            return Err(Self::reject(CALL, format!("duplicate pattern '{}'", pattern.name)));
        }
        self.accept(ApiCall::load_pattern(pattern));
        Ok(())
    }

    fn add_combination(&mut self, name: &str, combo_type: ComboType) -> ApiResult<()> {
        const CALL: &str = "add_combination";
        self.begin(CALL)?;
        if self.patterns.contains(name) || !self.combos.insert(name.to_string()) {
            return Err(Self::reject(CALL, format!("duplicate combination '{name}'")));
        }
        self.accept(ApiCall::AddCombination {
            name: name.to_string(),
            combo_type: combo_type.code(),
        });
        Ok(())
    }

    fn set_combination_entry(&mut self, combo: &str, entry: &ComboEntry) -> ApiResult<()> {
        const CALL: &str = "set_combination_entry";
        self.begin(CALL)?;
        Self::require(CALL, self.combos.contains(combo), "combination", combo)?;
        let known = match entry.kind {
            EntryKind::Case => self.patterns.contains(&entry.name),
            EntryKind::Combo => entry.name != combo && self.combos.contains(&entry.name),
        };
        Self::require(CALL, known, "combination entry", &entry.name)?;
        self.accept(ApiCall::combination_entry(combo, entry));
        Ok(())
    }

    fn set_distributed_load(&mut self, frame: &str, load: &DistributedLoad) -> ApiResult<()> {
        const CALL: &str = "set_distributed_load";
        self.begin(CALL)?;
        Self::require(CALL, self.frames.contains_key(frame), "frame", frame)?;
        Self::require(CALL, self.patterns.contains(&load.pattern), "pattern", &load.pattern)?;
        self.accept(ApiCall::distributed_load(frame, load));
        Ok(())
    }

    fn set_point_load(&mut self, point: &str, load: &PointLoad) -> ApiResult<()> {
        const CALL: &str = "set_point_load";
        self.begin(CALL)?;
        Self::require(CALL, self.points.contains_key(point), "point", point)?;
        Self::require(CALL, self.patterns.contains(&load.pattern), "pattern", &load.pattern)?;
        self.accept(ApiCall::point_load(point, load));
        Ok(())
    }

    fn set_restraint(&mut self, point: &str, restraint: &Restraint) -> ApiResult<()> {
        const CALL: &str = "set_restraint";
        self.begin(CALL)?;
        Self::require(CALL, self.points.contains_key(point), "point", point)?;
        self.accept(ApiCall::SetRestraint {
            point: point.to_string(),
            dofs: restraint.as_array(),
        });
        Ok(())
    }

    fn set_active_dof(&mut self, dof: &ActiveDof) -> ApiResult<()> {
        self.begin("set_active_dof")?;
        self.accept(ApiCall::SetActiveDof { dofs: dof.dofs });
        Ok(())
    }

    fn run_analysis(&mut self) -> ApiResult<()> {
        const CALL: &str = "run_analysis";
        self.begin(CALL)?;
        if self.frames.is_empty() {
            return Err(Self::reject(CALL, "model has no frames".to_string()));
        }
        self.analyzed = true;
        self.accept(ApiCall::RunAnalysis);
        Ok(())
    }

    fn frame_forces(&mut self, frame: &str, combo: &str) -> ApiResult<FrameForces> {
        const CALL: &str = "frame_forces";
        self.begin(CALL)?;
        if !self.analyzed {
            return Err(Self::reject(CALL, "model is not analyzed".to_string()));
        }
        let (i_point, j_point) = self
            .frames
            .get(frame)
            .ok_or_else(|| Self::reject(CALL, format!("unknown frame '{frame}'")))?;
        let known_case = self.combos.contains(combo) || self.patterns.contains(combo);
        Self::require(CALL, known_case, "case or combination", combo)?;

        let forces = match self.results.get(&(frame.to_string(), combo.to_string())) {
            Some(forces) => forces.clone(),
            None => {
                // no preset: report zero forces at both ends and midspan
                let (i, j) = (self.points[i_point], self.points[j_point]);
                let length = i
                    .iter()
                    .zip(j.iter())
                    .map(|(a, b)| (b - a).powi(2))
                    .sum::<f64>()
                    .sqrt();
                let mut forces = FrameForces::default();
                for station in [0.0, 0.5 * length, length] {
                    forces.push(frame, combo, StationForces::from_array(station, [0.0; 6]));
                }
                forces
            }
        };
        self.accept(ApiCall::FrameForces {
            frame: frame.to_string(),
            combo: combo.to_string(),
        });
        Ok(forces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_section() -> RecordingApi {
        let mut api = RecordingApi::new();
        api.define_material(&SteelMaterial::s355()).unwrap();
        api.import_section(&FrameSection::shhf_100x100x5()).unwrap();
        api
    }

    #[test]
    fn test_duplicate_point_returns_status() {
        let mut api = with_section();
        api.add_point("a", [0.0; 3]).unwrap();
        let err = api.add_point("a", [1.0, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, ApiError::Status { call: "add_point", status: 1 }));
        assert_eq!(api.count("add_point"), 1);
        assert_eq!(api.issued(), 4);
    }

    #[test]
    fn test_host_names_unnamed_points() {
        let mut api = with_section();
        assert_eq!(api.add_point("", [0.0; 3]).unwrap(), "1");
        assert_eq!(api.add_point("", [1.0, 0.0, 0.0]).unwrap(), "2");
        assert_eq!(api.add_frame("", "1", "2", "SHHF100X100X5").unwrap(), "1");
    }

    #[test]
    fn test_frame_needs_known_points() {
        let mut api = with_section();
        api.add_point("a", [0.0; 3]).unwrap();
        assert!(api.add_frame("f", "a", "b", "SHHF100X100X5").is_err());
    }

    #[test]
    fn test_dead_pattern_is_builtin() {
        let mut api = RecordingApi::new();
        let err = api.add_load_pattern(&LoadPattern::dead()).unwrap_err();
        assert_eq!(err.call(), "add_load_pattern");
        api.add_combination("C", ComboType::LinearAdditive).unwrap();
        let entry = ComboEntry {
            kind: EntryKind::Case,
            name: "Dead".to_string(),
            factor: 1.35,
        };
        api.set_combination_entry("C", &entry).unwrap();
    }

    #[test]
    fn test_fault_injection() {
        let mut api = RecordingApi::new().fail_at(1);
        api.set_present_units(Units::KnMC).unwrap();
        let err = api.define_material(&SteelMaterial::s355()).unwrap_err();
        assert!(matches!(err, ApiError::Fault { call: "define_material", .. }));
        assert_eq!(api.calls().len(), 1);
    }

    #[test]
    fn test_results_require_analysis() {
        let mut api = with_section();
        api.add_point("a", [0.0; 3]).unwrap();
        api.add_point("b", [4.0, 0.0, 0.0]).unwrap();
        api.add_frame("f", "a", "b", "SHHF100X100X5").unwrap();
        assert!(api.frame_forces("f", "Dead").is_err());

        api.run_analysis().unwrap();
        let forces = api.frame_forces("f", "Dead").unwrap();
        assert_eq!(forces.len(), 3);
        assert_eq!(forces.object_station[2], 4.0);
        assert!(api.frame_forces("f", "COMB9").is_err());
    }
}
