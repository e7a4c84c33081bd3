//! Frame sections imported from a host section library

use serde::{Deserialize, Serialize};

/// A frame section imported from one of the host's section library files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSection {
    /// Name of the section in the model
    pub name: String,
    /// Name of the material assigned to the section
    pub material: String,
    /// Library file shipped with the host
    pub library_file: String,
    /// Name of the section inside the library file
    pub library_name: String,
}

impl FrameSection {
    /// Import a library section under its own name
    pub fn from_library(library_name: &str, material: &str, library_file: &str) -> Self {
        Self {
            name: library_name.to_string(),
            material: material.to_string(),
            library_file: library_file.to_string(),
            library_name: library_name.to_string(),
        }
    }

    /// Rename the section in the model
    pub fn named(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// 100x100x5 hot-finished square hollow section, BS 2006 library
    pub fn shhf_100x100x5() -> Self {
        Self::from_library("SHHF100X100X5", "STEEL355", "BSShapes2006.xml")
    }
}

impl Default for FrameSection {
    fn default() -> Self {
        Self::shhf_100x100x5()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_section() {
        let section = FrameSection::shhf_100x100x5();
        assert_eq!(section.name, section.library_name);
        assert_eq!(section.material, "STEEL355");
    }

    #[test]
    fn test_renamed_section_keeps_library_name() {
        let section = FrameSection::shhf_100x100x5().named("CHORD");
        assert_eq!(section.name, "CHORD");
        assert_eq!(section.library_name, "SHHF100X100X5");
    }
}
