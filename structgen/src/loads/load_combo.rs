//! Load combinations

use serde::{Deserialize, Serialize};

/// How the entries of a combination are combined, carrying the host's numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComboType {
    #[default]
    LinearAdditive,
    Envelope,
    AbsoluteAdditive,
    Srss,
    RangeAdditive,
}

impl ComboType {
    /// Host code for this combination type
    pub fn code(self) -> i32 {
        match self {
            ComboType::LinearAdditive => 0,
            ComboType::Envelope => 1,
            ComboType::AbsoluteAdditive => 2,
            ComboType::Srss => 3,
            ComboType::RangeAdditive => 4,
        }
    }
}

/// Whether a combination entry refers to a load case or another combination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Case,
    Combo,
}

impl EntryKind {
    /// Host code for this entry kind
    pub fn code(self) -> i32 {
        match self {
            EntryKind::Case => 0,
            EntryKind::Combo => 1,
        }
    }
}

/// One scaled term of a load combination
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComboEntry {
    /// Kind of the referenced item
    pub kind: EntryKind,
    /// Name of the referenced load case or combination
    pub name: String,
    /// Scale factor
    pub factor: f64,
}

/// A load combination defines how load cases are combined for analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    /// Name of the load combination
    pub name: String,
    /// Combination type
    pub combo_type: ComboType,
    /// Ordered scaled entries
    pub entries: Vec<ComboEntry>,
}

impl LoadCombination {
    /// Create a new linear additive load combination
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            combo_type: ComboType::LinearAdditive,
            entries: Vec::new(),
        }
    }

    /// Set the combination type
    pub fn with_type(mut self, combo_type: ComboType) -> Self {
        self.combo_type = combo_type;
        self
    }

    /// Add a load case with a factor
    pub fn with_case(mut self, case: &str, factor: f64) -> Self {
        self.set_entry(EntryKind::Case, case, factor);
        self
    }

    /// Add a nested combination with a factor
    pub fn with_combo(mut self, combo: &str, factor: f64) -> Self {
        self.set_entry(EntryKind::Combo, combo, factor);
        self
    }

    /// Set the factor of an entry.
    ///
    /// An entry already present keeps its position and takes the new factor,
    /// so repeating the same call leaves the combination unchanged.
    pub fn set_entry(&mut self, kind: EntryKind, name: &str, factor: f64) {
        match self
            .entries
            .iter_mut()
            .find(|e| e.kind == kind && e.name == name)
        {
            Some(entry) => entry.factor = factor,
            None => self.entries.push(ComboEntry {
                kind,
                name: name.to_string(),
                factor,
            }),
        }
    }

    /// Get the factor for a load case (0 when absent)
    pub fn factor(&self, case: &str) -> f64 {
        self.entries
            .iter()
            .find(|e| e.kind == EntryKind::Case && e.name == case)
            .map_or(0.0, |e| e.factor)
    }

    /// Check if this combination includes a specific load case
    pub fn includes(&self, case: &str) -> bool {
        self.factor(case).abs() > 1e-10
    }

    /// Human-readable equation, e.g. "1.35 Dead + 1.5 LL"
    pub fn equation(&self) -> String {
        self.entries
            .iter()
            .map(|e| format!("{} {}", e.factor, e.name))
            .collect::<Vec<_>>()
            .join(" + ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_keep_insertion_order() {
        let combo = LoadCombination::new("COMB1-ULS")
            .with_case("Dead", 1.35)
            .with_case("SDL", 1.35)
            .with_case("LL", 1.5);
        let names: Vec<&str> = combo.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["Dead", "SDL", "LL"]);
        assert_eq!(combo.equation(), "1.35 Dead + 1.35 SDL + 1.5 LL");
    }

    #[test]
    fn test_set_entry_replaces_factor() {
        let mut combo = LoadCombination::new("C").with_case("LL", 1.5);
        combo.set_entry(EntryKind::Case, "LL", 1.5);
        assert_eq!(combo.entries.len(), 1);
        combo.set_entry(EntryKind::Case, "LL", 1.0);
        assert_eq!(combo.entries.len(), 1);
        assert_eq!(combo.factor("LL"), 1.0);
    }

    #[test]
    fn test_case_and_combo_entries_are_distinct() {
        let combo = LoadCombination::new("ENV")
            .with_type(ComboType::Envelope)
            .with_case("X", 1.0)
            .with_combo("X", 2.0);
        assert_eq!(combo.entries.len(), 2);
        assert_eq!(combo.factor("X"), 1.0);
        assert_eq!(combo.combo_type.code(), 1);
        assert!(!combo.includes("missing"));
    }
}
