//! Job files: which structure to generate and what to do with it

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::apply::ResultRequest;
use crate::error::{ModelError, ModelResult};
use crate::generators::{BeamLayout, ContinuousBeam, Generated, PrattTruss, TrussLayout};
use crate::model::StructuralModel;

/// Job file read when no path is given
pub const DEFAULT_JOB_PATH: &str = "job.json";

/// Environment variable overriding [`DEFAULT_JOB_PATH`]
pub const JOB_PATH_ENV: &str = "STRUCTGEN_JOB";

/// Structure to generate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StructureConfig {
    Beam(ContinuousBeam),
    Truss(PrattTruss),
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self::Beam(ContinuousBeam::default())
    }
}

/// Layout of whichever structure was generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Layout {
    Beam(BeamLayout),
    Truss(TrussLayout),
}

impl StructureConfig {
    /// Run the matching generator
    pub fn generate(&self) -> ModelResult<(StructuralModel, Layout)> {
        match self {
            Self::Beam(beam) => {
                let Generated { model, layout } = beam.generate()?;
                Ok((model, Layout::Beam(layout)))
            }
            Self::Truss(truss) => {
                let Generated { model, layout } = truss.generate()?;
                Ok((model, Layout::Truss(layout)))
            }
        }
    }

    /// Combination results are read for when the job names none
    pub fn default_combo(&self) -> &'static str {
        match self {
            Self::Beam(_) => ContinuousBeam::ULS,
            Self::Truss(_) => PrattTruss::ULS,
        }
    }
}

/// A generation job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobConfig {
    pub structure: StructureConfig,
    /// Where to write the model JSON; stdout when absent
    pub model_output: Option<PathBuf>,
    /// Where to write the call script, if anywhere
    pub script_output: Option<PathBuf>,
    /// Replay the model on the in-memory host and run the analysis
    pub analyze: bool,
    /// Frame forces to read back after analysis
    pub results: Option<ResultRequest>,
}

impl JobConfig {
    /// Load a job from a JSON file
    pub fn load(path: &Path) -> ModelResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> ModelResult<Self> {
        let job: Self = serde_json::from_str(json)?;
        job.check()?;
        Ok(job)
    }

    fn check(&self) -> ModelResult<()> {
        if self.results.is_some() && !self.analyze {
            return Err(ModelError::InvalidInput(
                "results requested without analyze".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the job file: explicit argument, then `STRUCTGEN_JOB`, then `job.json`
    pub fn resolve_path(arg: Option<&str>) -> PathBuf {
        match arg {
            Some(path) => PathBuf::from(path),
            None => std::env::var(JOB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_JOB_PATH)),
        }
    }
}
