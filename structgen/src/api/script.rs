//! Call script for an out-of-process host bridge

use std::io::Write;

use super::{ApiCall, AutomationApi};
use crate::elements::{ActiveDof, FrameReleases, FrameSection, Restraint, SteelMaterial};
use crate::error::{ApiError, ApiResult};
use crate::loads::{ComboEntry, ComboType, DistributedLoad, LoadPattern, PointLoad};
use crate::results::FrameForces;
use crate::units::Units;

/// Writes every call as one JSON object per line.
///
/// Names are passed through as given. The writer cannot answer queries, so
/// [`AutomationApi::frame_forces`] always fails.
pub struct ScriptWriter<W: Write> {
    out: W,
    written: usize,
}

impl<W: Write> ScriptWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out, written: 0 }
    }

    /// Number of lines written so far
    pub fn written(&self) -> usize {
        self.written
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> ApiResult<W> {
        self.out.flush().map_err(|source| ApiError::Io {
            call: "flush",
            source,
        })?;
        Ok(self.out)
    }

    fn emit(&mut self, call: ApiCall) -> ApiResult<()> {
        let name = call.name();
        let line = serde_json::to_string(&call).map_err(|e| ApiError::Fault {
            call: name,
            message: e.to_string(),
        })?;
        writeln!(self.out, "{line}").map_err(|source| ApiError::Io { call: name, source })?;
        self.written += 1;
        Ok(())
    }
}

impl<W: Write> AutomationApi for ScriptWriter<W> {
    fn set_present_units(&mut self, units: Units) -> ApiResult<()> {
        self.emit(ApiCall::units(units))
    }

    fn define_material(&mut self, material: &SteelMaterial) -> ApiResult<()> {
        self.emit(ApiCall::DefineMaterial {
            material: material.clone(),
        })
    }

    fn import_section(&mut self, section: &FrameSection) -> ApiResult<()> {
        self.emit(ApiCall::ImportSection {
            section: section.clone(),
        })
    }

    fn add_point(&mut self, name: &str, coords: [f64; 3]) -> ApiResult<String> {
        self.emit(ApiCall::AddPoint {
            name: name.to_string(),
            coords,
        })?;
        Ok(name.to_string())
    }

    fn add_frame(&mut self, name: &str, i_point: &str, j_point: &str, section: &str) -> ApiResult<String> {
        self.emit(ApiCall::AddFrame {
            name: name.to_string(),
            i_point: i_point.to_string(),
            j_point: j_point.to_string(),
            section: section.to_string(),
        })?;
        Ok(name.to_string())
    }

    fn set_frame_releases(&mut self, frame: &str, releases: &FrameReleases) -> ApiResult<()> {
        self.emit(ApiCall::SetFrameReleases {
            frame: frame.to_string(),
            releases: *releases,
        })
    }

    fn add_load_pattern(&mut self, pattern: &LoadPattern) -> ApiResult<()> {
        self.emit(ApiCall::load_pattern(pattern))
    }

    fn add_combination(&mut self, name: &str, combo_type: ComboType) -> ApiResult<()> {
        self.emit(ApiCall::AddCombination {
            name: name.to_string(),
            combo_type: combo_type.code(),
        })
    }

    fn set_combination_entry(&mut self, combo: &str, entry: &ComboEntry) -> ApiResult<()> {
        self.emit(ApiCall::combination_entry(combo, entry))
    }

    fn set_distributed_load(&mut self, frame: &str, load: &DistributedLoad) -> ApiResult<()> {
        self.emit(ApiCall::distributed_load(frame, load))
    }

    fn set_point_load(&mut self, point: &str, load: &PointLoad) -> ApiResult<()> {
        self.emit(ApiCall::point_load(point, load))
    }

    fn set_restraint(&mut self, point: &str, restraint: &Restraint) -> ApiResult<()> {
        self.emit(ApiCall::SetRestraint {
            point: point.to_string(),
            dofs: restraint.as_array(),
        })
    }

    fn set_active_dof(&mut self, dof: &ActiveDof) -> ApiResult<()> {
        self.emit(ApiCall::SetActiveDof { dofs: dof.dofs })
    }

    fn run_analysis(&mut self) -> ApiResult<()> {
        self.emit(ApiCall::RunAnalysis)
    }

    fn frame_forces(&mut self, _frame: &str, _combo: &str) -> ApiResult<FrameForces> {
        Err(ApiError::Fault {
            call: "frame_forces",
            message: "a call script cannot return results".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_json_object_per_line() {
        let mut writer = ScriptWriter::new(Vec::new());
        writer.set_present_units(Units::KnMC).unwrap();
        writer.add_point("joint_0", [0.0, 0.0, 4.0]).unwrap();
        writer.run_analysis().unwrap();
        assert_eq!(writer.written(), 3);

        let bytes = writer.into_inner().unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["call"], "set_present_units");
        assert_eq!(first["units"], 6);
        let last: ApiCall = serde_json::from_str(lines[2]).unwrap();
        assert_eq!(last, ApiCall::RunAnalysis);
    }

    #[test]
    fn test_results_unavailable() {
        let mut writer = ScriptWriter::new(Vec::new());
        let err = writer.frame_forces("frame_2", "COMB1-ULS").unwrap_err();
        assert_eq!(err.call(), "frame_forces");
    }
}
