//! Load patterns, combinations and load assignments

mod distributed;
mod load_combo;
mod load_pattern;
mod point_load;

pub use distributed::{DistributedLoad, DistributedLoadKind, LoadDirection};
pub use load_combo::{ComboEntry, ComboType, EntryKind, LoadCombination};
pub use load_pattern::{LoadPattern, LoadPatternType};
pub use point_load::PointLoad;
