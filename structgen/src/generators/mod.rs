//! Parametric generators
//!
//! Each generator is a pure function of its parameters: the same input always
//! yields the same names, coordinates and assignments, in the same order.

mod beam;
mod truss;

pub use beam::{BeamLayout, ContinuousBeam};
pub use truss::{PrattTruss, TrussLayout};

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};
use crate::model::StructuralModel;

/// A generated model together with the names it created, grouped by role
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Generated<L> {
    pub model: StructuralModel,
    pub layout: L,
}

/// Reject non-finite and non-positive dimensions
pub(crate) fn check_positive(what: &str, value: f64) -> ModelResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ModelError::InvalidGeometry(format!(
            "{what} must be positive and finite, got {value}"
        )));
    }
    Ok(())
}
