//! Load patterns

use serde::{Deserialize, Serialize};

/// Category of a load pattern, carrying the host's numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadPatternType {
    Dead,
    SuperDead,
    Live,
    ReducibleLive,
    Quake,
    Wind,
    Snow,
    Other,
}

impl LoadPatternType {
    /// Host code for this pattern type
    pub fn code(self) -> i32 {
        match self {
            LoadPatternType::Dead => 1,
            LoadPatternType::SuperDead => 2,
            LoadPatternType::Live => 3,
            LoadPatternType::ReducibleLive => 4,
            LoadPatternType::Quake => 5,
            LoadPatternType::Wind => 6,
            LoadPatternType::Snow => 7,
            LoadPatternType::Other => 8,
        }
    }
}

/// A named load pattern that loads are assigned under
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadPattern {
    /// Name of the load pattern
    pub name: String,
    /// Pattern category
    pub pattern_type: LoadPatternType,
    /// Self-weight multiplier
    pub self_weight_multiplier: f64,
    /// Also create a linear static load case of the same name
    pub add_analysis_case: bool,
    /// Pattern that exists in every new host model and is never re-defined
    #[serde(default)]
    pub builtin: bool,
}

impl LoadPattern {
    /// Create a new load pattern with its linear static case
    pub fn new(name: &str, pattern_type: LoadPatternType, self_weight_multiplier: f64) -> Self {
        Self {
            name: name.to_string(),
            pattern_type,
            self_weight_multiplier,
            add_analysis_case: true,
            builtin: false,
        }
    }

    /// The host's default self-weight pattern
    pub fn dead() -> Self {
        Self {
            builtin: true,
            ..Self::new("Dead", LoadPatternType::Dead, 1.0)
        }
    }

    /// Superimposed dead load without self weight
    pub fn super_dead(name: &str) -> Self {
        Self::new(name, LoadPatternType::SuperDead, 0.0)
    }

    /// Live load without self weight
    pub fn live(name: &str) -> Self {
        Self::new(name, LoadPatternType::Live, 0.0)
    }

    /// Do not create an analysis case with the pattern
    pub fn without_analysis_case(mut self) -> Self {
        self.add_analysis_case = false;
        self
    }
}
