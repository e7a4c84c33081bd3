//! Structural model - ordered, name-keyed container for everything a
//! generator produces and the apply step transmits

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::elements::{ActiveDof, Dof, Frame, FrameReleases, FrameSection, Point, Restraint, SteelMaterial};
use crate::error::{ModelError, ModelResult};
use crate::loads::{
    DistributedLoad, EntryKind, LoadCombination, LoadDirection, LoadPattern, PointLoad,
};
use crate::units::Units;

/// Frames shorter than this are treated as coincident endpoints
const MIN_FRAME_LENGTH: f64 = 1e-10;

/// A distributed load assigned to a frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLoadAssignment {
    /// Target frame
    pub frame: String,
    /// The load record
    pub load: DistributedLoad,
}

/// A point load assigned to a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLoadAssignment {
    /// Target point
    pub point: String,
    /// The load record
    pub load: PointLoad,
}

/// A restraint assigned to a point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestraintAssignment {
    /// Restrained point
    pub point: String,
    /// Restrained DOFs
    pub restraint: Restraint,
}

/// Plain serialized form of a [`StructuralModel`].
///
/// Deserializing goes through the model's own insert methods so every
/// invariant is re-checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRecord {
    #[serde(default)]
    pub units: Units,
    #[serde(default)]
    pub active_dof: ActiveDof,
    #[serde(default)]
    pub materials: Vec<SteelMaterial>,
    #[serde(default)]
    pub sections: Vec<FrameSection>,
    #[serde(default)]
    pub points: Vec<Point>,
    #[serde(default)]
    pub frames: Vec<Frame>,
    #[serde(default)]
    pub load_patterns: Vec<LoadPattern>,
    #[serde(default)]
    pub load_combos: Vec<LoadCombination>,
    #[serde(default)]
    pub distributed_loads: Vec<FrameLoadAssignment>,
    #[serde(default)]
    pub point_loads: Vec<PointLoadAssignment>,
    #[serde(default)]
    pub restraints: Vec<RestraintAssignment>,
}

/// Counts of everything in a model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub num_points: usize,
    pub num_frames: usize,
    pub num_released_frames: usize,
    pub num_load_patterns: usize,
    pub num_load_combos: usize,
    pub num_distributed_loads: usize,
    pub num_point_loads: usize,
    pub num_restraints: usize,
}

/// The in-memory structural model
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "ModelRecord", try_from = "ModelRecord")]
pub struct StructuralModel {
    units: Units,
    active_dof: ActiveDof,
    materials: Vec<SteelMaterial>,
    sections: Vec<FrameSection>,
    points: Vec<Point>,
    frames: Vec<Frame>,
    load_patterns: Vec<LoadPattern>,
    load_combos: Vec<LoadCombination>,
    distributed_loads: Vec<FrameLoadAssignment>,
    point_loads: Vec<PointLoadAssignment>,
    restraints: Vec<RestraintAssignment>,

    point_index: HashMap<String, usize>,
    frame_index: HashMap<String, usize>,
}

impl Default for StructuralModel {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralModel {
    /// Create a new blank model holding only the built-in `Dead` pattern
    pub fn new() -> Self {
        Self {
            units: Units::default(),
            active_dof: ActiveDof::default(),
            materials: Vec::new(),
            sections: Vec::new(),
            points: Vec::new(),
            frames: Vec::new(),
            load_patterns: vec![LoadPattern::dead()],
            load_combos: Vec::new(),
            distributed_loads: Vec::new(),
            point_loads: Vec::new(),
            restraints: Vec::new(),
            point_index: HashMap::new(),
            frame_index: HashMap::new(),
        }
    }

    // ========================
    // Model Building Methods
    // ========================

    /// Set the present units
    pub fn set_units(&mut self, units: Units) {
        self.units = units;
    }

    /// Set the active degrees of freedom
    pub fn set_active_dof(&mut self, active_dof: ActiveDof) {
        self.active_dof = active_dof;
    }

    /// Add a material to the model
    pub fn add_material(&mut self, material: SteelMaterial) -> ModelResult<()> {
        if self.material(&material.name).is_some() {
            return Err(ModelError::DuplicateName(material.name));
        }
        self.materials.push(material);
        Ok(())
    }

    /// Add a section to the model
    pub fn add_section(&mut self, section: FrameSection) -> ModelResult<()> {
        if self.material(&section.material).is_none() {
            return Err(ModelError::MaterialNotFound(section.material));
        }
        if self.section(&section.name).is_some() {
            return Err(ModelError::DuplicateName(section.name));
        }
        self.sections.push(section);
        Ok(())
    }

    /// Add a point to the model
    pub fn add_point(&mut self, point: Point) -> ModelResult<()> {
        if self.point_index.contains_key(&point.name) {
            return Err(ModelError::DuplicateName(point.name));
        }
        if point.coords().iter().any(|c| !c.is_finite()) {
            return Err(ModelError::InvalidGeometry(format!(
                "Point '{}' has non-finite coordinates {:?}",
                point.name,
                point.coords()
            )));
        }
        self.point_index.insert(point.name.clone(), self.points.len());
        self.points.push(point);
        Ok(())
    }

    /// Add a frame to the model
    pub fn add_frame(&mut self, frame: Frame) -> ModelResult<()> {
        // Validate endpoints exist
        for end in [&frame.i_point, &frame.j_point] {
            if !self.point_index.contains_key(end) {
                return Err(ModelError::PointNotFound(end.clone()));
            }
        }
        if frame.i_point == frame.j_point {
            return Err(ModelError::InvalidGeometry(format!(
                "Frame '{}' connects point '{}' to itself",
                frame.name, frame.i_point
            )));
        }
        if self.section(&frame.section).is_none() {
            return Err(ModelError::SectionNotFound(frame.section.clone()));
        }
        Self::check_releases(&frame.name, &frame.releases)?;
        if self.frame_index.contains_key(&frame.name) {
            return Err(ModelError::DuplicateName(frame.name));
        }

        self.frame_index.insert(frame.name.clone(), self.frames.len());
        self.frames.push(frame);
        Ok(())
    }

    /// Replace the end releases of a frame
    pub fn set_frame_releases(&mut self, frame_name: &str, releases: FrameReleases) -> ModelResult<()> {
        Self::check_releases(frame_name, &releases)?;
        let idx = *self
            .frame_index
            .get(frame_name)
            .ok_or_else(|| ModelError::FrameNotFound(frame_name.to_string()))?;
        self.frames[idx].releases = releases;
        Ok(())
    }

    fn check_releases(frame_name: &str, releases: &FrameReleases) -> ModelResult<()> {
        if !releases.is_stable() {
            return Err(ModelError::InvalidInput(format!(
                "Frame '{frame_name}' releases axial force or torsion at both ends"
            )));
        }
        let springs = releases.i_springs.iter().chain(releases.j_springs.iter());
        if springs.into_iter().any(|k| !k.is_finite() || *k < 0.0) {
            return Err(ModelError::InvalidInput(format!(
                "Frame '{frame_name}' has a negative or non-finite release spring"
            )));
        }
        Ok(())
    }

    /// Add a load pattern
    pub fn add_load_pattern(&mut self, pattern: LoadPattern) -> ModelResult<()> {
        if self.load_pattern(&pattern.name).is_some() {
            return Err(ModelError::DuplicateName(pattern.name));
        }
        self.load_patterns.push(pattern);
        Ok(())
    }

    /// Add a load combination together with all of its entries
    pub fn add_load_combo(&mut self, combo: LoadCombination) -> ModelResult<()> {
        if self.load_combo(&combo.name).is_some() {
            return Err(ModelError::DuplicateName(combo.name));
        }
        for entry in &combo.entries {
            self.check_combo_reference(&combo.name, entry.kind, &entry.name)?;
        }
        self.load_combos.push(combo);
        Ok(())
    }

    /// Set the factor of one entry of an existing combination
    pub fn set_combo_entry(
        &mut self,
        combo_name: &str,
        kind: EntryKind,
        name: &str,
        factor: f64,
    ) -> ModelResult<()> {
        self.check_combo_reference(combo_name, kind, name)?;
        let combo = self
            .load_combos
            .iter_mut()
            .find(|c| c.name == combo_name)
            .ok_or_else(|| ModelError::LoadCombinationNotFound(combo_name.to_string()))?;
        combo.set_entry(kind, name, factor);
        Ok(())
    }

    fn check_combo_reference(&self, combo_name: &str, kind: EntryKind, name: &str) -> ModelResult<()> {
        match kind {
            EntryKind::Case if self.load_pattern(name).is_none() => {
                Err(ModelError::LoadPatternNotFound(name.to_string()))
            }
            EntryKind::Case => Ok(()),
            EntryKind::Combo if name == combo_name => Err(ModelError::InvalidInput(format!(
                "Combination '{combo_name}' cannot reference itself"
            ))),
            EntryKind::Combo => {
                let referenced = self
                    .combo_position(name)
                    .ok_or_else(|| ModelError::LoadCombinationNotFound(name.to_string()))?;
                // a combination not yet stored is about to be appended, so it follows everything
                match self.combo_position(combo_name) {
                    Some(owner) if referenced > owner => Err(ModelError::InvalidInput(format!(
                        "Combination '{combo_name}' can only reference combinations defined before it, not '{name}'"
                    ))),
                    _ => Ok(()),
                }
            }
        }
    }

    fn combo_position(&self, name: &str) -> Option<usize> {
        self.load_combos.iter().position(|c| c.name == name)
    }

    /// Assign a distributed load to a frame.
    ///
    /// With `replace` set, earlier loads of the same pattern on the frame are
    /// discarded first; otherwise the load is added to them.
    pub fn add_distributed_load(&mut self, frame_name: &str, load: DistributedLoad) -> ModelResult<()> {
        if !self.frame_index.contains_key(frame_name) {
            return Err(ModelError::FrameNotFound(frame_name.to_string()));
        }
        if self.load_pattern(&load.pattern).is_none() {
            return Err(ModelError::LoadPatternNotFound(load.pattern.clone()));
        }
        if !(load.val1.is_finite() && load.val2.is_finite()) {
            return Err(ModelError::InvalidInput(format!(
                "Distributed load on '{}' has non-finite magnitude {}..{}",
                frame_name, load.val1, load.val2
            )));
        }
        if !load.has_valid_positions() {
            return Err(ModelError::InvalidInput(format!(
                "Distributed load on '{}' spans {}..{}",
                frame_name, load.dist1, load.dist2
            )));
        }
        if load.replace {
            self.distributed_loads
                .retain(|a| !(a.frame == frame_name && a.load.pattern == load.pattern));
        }
        self.distributed_loads.push(FrameLoadAssignment {
            frame: frame_name.to_string(),
            load,
        });
        Ok(())
    }

    /// Assign a point load.
    ///
    /// With `replace` set, earlier loads of the same pattern on the point are
    /// discarded first; otherwise the load is added to them.
    pub fn add_point_load(&mut self, point_name: &str, load: PointLoad) -> ModelResult<()> {
        if !self.point_index.contains_key(point_name) {
            return Err(ModelError::PointNotFound(point_name.to_string()));
        }
        if self.load_pattern(&load.pattern).is_none() {
            return Err(ModelError::LoadPatternNotFound(load.pattern.clone()));
        }
        if load.values.iter().any(|v| !v.is_finite()) {
            return Err(ModelError::InvalidInput(format!(
                "Point load on '{}' has non-finite components {:?}",
                point_name, load.values
            )));
        }
        if load.replace {
            self.point_loads
                .retain(|a| !(a.point == point_name && a.load.pattern == load.pattern));
        }
        self.point_loads.push(PointLoadAssignment {
            point: point_name.to_string(),
            load,
        });
        Ok(())
    }

    /// Set the restraint of a point, overwriting any earlier one
    pub fn set_restraint(&mut self, point_name: &str, restraint: Restraint) -> ModelResult<()> {
        if !self.point_index.contains_key(point_name) {
            return Err(ModelError::PointNotFound(point_name.to_string()));
        }
        match self.restraints.iter_mut().find(|r| r.point == point_name) {
            Some(existing) => existing.restraint = restraint,
            None => self.restraints.push(RestraintAssignment {
                point: point_name.to_string(),
                restraint,
            }),
        }
        Ok(())
    }

    // ========================
    // Group Assignment Helpers
    // ========================

    /// Apply the same uniform full-length load to every frame in `frames`
    pub fn add_uniform_load<S: AsRef<str>>(
        &mut self,
        frames: &[S],
        pattern: &str,
        direction: LoadDirection,
        value: f64,
    ) -> ModelResult<()> {
        for frame in frames {
            self.add_distributed_load(
                frame.as_ref(),
                DistributedLoad::uniform(pattern, direction, value),
            )?;
        }
        Ok(())
    }

    /// Apply the same point load to every point in `points`
    pub fn add_joint_loads<S: AsRef<str>>(&mut self, points: &[S], load: &PointLoad) -> ModelResult<()> {
        for point in points {
            self.add_point_load(point.as_ref(), load.clone())?;
        }
        Ok(())
    }

    /// Fix one boundary point and put every other one on rollers.
    ///
    /// The roller vector is `fixed` with `along_span` released.
    pub fn assign_supports<S: AsRef<str>>(
        &mut self,
        fixed_point: &str,
        roller_points: &[S],
        fixed: Restraint,
        along_span: Dof,
    ) -> ModelResult<()> {
        if !fixed.is_restrained(along_span) {
            return Err(ModelError::InvalidInput(format!(
                "Fixed support at '{fixed_point}' must restrain {along_span:?}"
            )));
        }
        for point in std::iter::once(fixed_point).chain(roller_points.iter().map(|p| p.as_ref())) {
            if !self.point_index.contains_key(point) {
                return Err(ModelError::PointNotFound(point.to_string()));
            }
        }
        if roller_points.iter().any(|p| p.as_ref() == fixed_point) {
            return Err(ModelError::InvalidInput(format!(
                "Point '{fixed_point}' cannot be both fixed and a roller"
            )));
        }

        let roller = fixed.releasing(along_span);
        self.set_restraint(fixed_point, fixed)?;
        for point in roller_points {
            self.set_restraint(point.as_ref(), roller)?;
        }
        Ok(())
    }

    // ========================
    // Validation
    // ========================

    /// Check whole-model conditions that cannot be checked on insertion
    pub fn validate(&self) -> ModelResult<()> {
        for frame in &self.frames {
            let length = self.frame_length(&frame.name)?;
            if length < MIN_FRAME_LENGTH {
                return Err(ModelError::InvalidGeometry(format!(
                    "Frame '{}' has zero length: i={}, j={}",
                    frame.name, frame.i_point, frame.j_point
                )));
            }
        }
        for combo in &self.load_combos {
            if combo.entries.is_empty() {
                return Err(ModelError::InvalidInput(format!(
                    "Combination '{}' has no entries",
                    combo.name
                )));
            }
        }
        Ok(())
    }

    // ========================
    // Queries
    // ========================

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn active_dof(&self) -> ActiveDof {
        self.active_dof
    }

    pub fn materials(&self) -> &[SteelMaterial] {
        &self.materials
    }

    pub fn sections(&self) -> &[FrameSection] {
        &self.sections
    }

    /// Points in creation order
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Frames in creation order
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn load_patterns(&self) -> &[LoadPattern] {
        &self.load_patterns
    }

    pub fn load_combos(&self) -> &[LoadCombination] {
        &self.load_combos
    }

    pub fn distributed_loads(&self) -> &[FrameLoadAssignment] {
        &self.distributed_loads
    }

    pub fn point_loads(&self) -> &[PointLoadAssignment] {
        &self.point_loads
    }

    pub fn restraints(&self) -> &[RestraintAssignment] {
        &self.restraints
    }

    pub fn material(&self, name: &str) -> Option<&SteelMaterial> {
        self.materials.iter().find(|m| m.name == name)
    }

    pub fn section(&self, name: &str) -> Option<&FrameSection> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn point(&self, name: &str) -> Option<&Point> {
        self.point_index.get(name).map(|&i| &self.points[i])
    }

    pub fn frame(&self, name: &str) -> Option<&Frame> {
        self.frame_index.get(name).map(|&i| &self.frames[i])
    }

    pub fn load_pattern(&self, name: &str) -> Option<&LoadPattern> {
        self.load_patterns.iter().find(|p| p.name == name)
    }

    pub fn load_combo(&self, name: &str) -> Option<&LoadCombination> {
        self.load_combos.iter().find(|c| c.name == name)
    }

    /// Restraint assigned to a point, if any
    pub fn restraint(&self, point_name: &str) -> Option<Restraint> {
        self.restraints
            .iter()
            .find(|r| r.point == point_name)
            .map(|r| r.restraint)
    }

    /// Distributed loads on a frame under a pattern
    pub fn frame_loads<'a>(
        &'a self,
        frame_name: &'a str,
        pattern: &'a str,
    ) -> impl Iterator<Item = &'a DistributedLoad> + 'a {
        self.distributed_loads
            .iter()
            .filter(move |a| a.frame == frame_name && a.load.pattern == pattern)
            .map(|a| &a.load)
    }

    /// Sum of all point loads on a point under a pattern
    pub fn total_point_load(&self, point_name: &str, pattern: &str) -> [f64; 6] {
        self.point_loads
            .iter()
            .filter(|a| a.point == point_name && a.load.pattern == pattern)
            .fold([0.0; 6], |mut acc, a| {
                for (total, v) in acc.iter_mut().zip(a.load.values) {
                    *total += v;
                }
                acc
            })
    }

    /// Distance between the two endpoints of a frame
    pub fn frame_length(&self, frame_name: &str) -> ModelResult<f64> {
        let frame = self
            .frame(frame_name)
            .ok_or_else(|| ModelError::FrameNotFound(frame_name.to_string()))?;
        let i_point = self
            .point(&frame.i_point)
            .ok_or_else(|| ModelError::PointNotFound(frame.i_point.clone()))?;
        let j_point = self
            .point(&frame.j_point)
            .ok_or_else(|| ModelError::PointNotFound(frame.j_point.clone()))?;
        Ok(i_point.distance_to(j_point))
    }

    /// Count everything in the model
    pub fn summary(&self) -> ModelSummary {
        ModelSummary {
            num_points: self.points.len(),
            num_frames: self.frames.len(),
            num_released_frames: self.frames.iter().filter(|f| f.releases.any()).count(),
            num_load_patterns: self.load_patterns.len(),
            num_load_combos: self.load_combos.len(),
            num_distributed_loads: self.distributed_loads.len(),
            num_point_loads: self.point_loads.len(),
            num_restraints: self.restraints.len(),
        }
    }

    // ========================
    // Serialization
    // ========================

    /// Serialize the model to pretty JSON
    pub fn to_json(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize a model from JSON, re-checking every invariant
    pub fn from_json(json: &str) -> ModelResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl From<StructuralModel> for ModelRecord {
    fn from(model: StructuralModel) -> Self {
        Self {
            units: model.units,
            active_dof: model.active_dof,
            materials: model.materials,
            sections: model.sections,
            points: model.points,
            frames: model.frames,
            load_patterns: model.load_patterns,
            load_combos: model.load_combos,
            distributed_loads: model.distributed_loads,
            point_loads: model.point_loads,
            restraints: model.restraints,
        }
    }
}

impl TryFrom<ModelRecord> for StructuralModel {
    type Error = ModelError;

    fn try_from(record: ModelRecord) -> ModelResult<Self> {
        let mut model = StructuralModel::new();
        model.set_units(record.units);
        model.set_active_dof(record.active_dof);
        for material in record.materials {
            model.add_material(material)?;
        }
        for section in record.sections {
            model.add_section(section)?;
        }
        for point in record.points {
            model.add_point(point)?;
        }
        for frame in record.frames {
            model.add_frame(frame)?;
        }
        for pattern in record.load_patterns {
            // the built-in pattern is already present in a new model
            if pattern.builtin && model.load_pattern(&pattern.name).is_some() {
                continue;
            }
            model.add_load_pattern(pattern)?;
        }
        for combo in record.load_combos {
            model.add_load_combo(combo)?;
        }
        for assignment in record.distributed_loads {
            model.add_distributed_load(&assignment.frame, assignment.load)?;
        }
        for assignment in record.point_loads {
            model.add_point_load(&assignment.point, assignment.load)?;
        }
        for assignment in record.restraints {
            model.set_restraint(&assignment.point, assignment.restraint)?;
        }
        Ok(model)
    }
}
