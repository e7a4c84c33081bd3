//! structgen - parametric structural model generation
//!
//! Builds continuous-beam and truss models as plain values and replays them
//! through the automation interface of a host analysis application:
//! - Named points and frames with end releases
//! - Load patterns, combinations, distributed and joint loads
//! - Fixed and roller supports
//! - Ordered transmission with host name mapping
//!
//! ## Example
//! ```rust
//! use structgen::prelude::*;
//!
//! let generated = ContinuousBeam::default().generate().unwrap();
//! assert_eq!(generated.layout.frames.len(), 5);
//!
//! let mut host = RecordingApi::new();
//! let applied = apply_model(&generated.model, &mut host).unwrap();
//! run_analysis(&mut host).unwrap();
//!
//! let request = ResultRequest {
//!     frames: vec!["frame_2".to_string()],
//!     combo: "COMB1-ULS".to_string(),
//! };
//! let results = fetch_frame_forces(&mut host, &applied, &request).unwrap();
//! assert_eq!(results.len(), 1);
//! ```

pub mod api;
pub mod apply;
pub mod config;
pub mod elements;
pub mod error;
pub mod generators;
pub mod loads;
pub mod model;
pub mod results;
pub mod units;

// Re-export common types
pub mod prelude {
    pub use crate::api::{ApiCall, AutomationApi, RecordingApi, ScriptWriter};
    pub use crate::apply::{apply_model, fetch_frame_forces, run_analysis, AppliedModel, ResultRequest};
    pub use crate::config::{JobConfig, StructureConfig};
    pub use crate::elements::{
        ActiveDof, Dof, Frame, FrameReleases, FrameSection, Point, Restraint, SteelMaterial,
    };
    pub use crate::error::{ApiError, ApplyError, ModelError, ModelResult};
    pub use crate::generators::{ContinuousBeam, Generated, PrattTruss};
    pub use crate::loads::{
        ComboType, DistributedLoad, EntryKind, LoadCombination, LoadDirection, LoadPattern,
        LoadPatternType, PointLoad,
    };
    pub use crate::model::StructuralModel;
    pub use crate::results::{FrameForces, StationForces};
    pub use crate::units::Units;
}
