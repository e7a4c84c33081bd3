//! Unit sets understood by the host application

use serde::{Deserialize, Serialize};

/// Force-length-temperature unit set, carrying the host's numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Units {
    LbInF,
    LbFtF,
    KipInF,
    KipFtF,
    KnMmC,
    #[default]
    KnMC,
    KgfMmC,
    KgfMC,
    NMmC,
    NMC,
}

impl Units {
    /// Host code for this unit set
    pub fn code(self) -> i32 {
        match self {
            Units::LbInF => 1,
            Units::LbFtF => 2,
            Units::KipInF => 3,
            Units::KipFtF => 4,
            Units::KnMmC => 5,
            Units::KnMC => 6,
            Units::KgfMmC => 7,
            Units::KgfMC => 8,
            Units::NMmC => 9,
            Units::NMC => 10,
        }
    }
}
