//! Parsed resume structures

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Closed set of section keys. Declaration order is the header catalog's
/// priority order, which also makes `SectionMap` iterate in a stable,
/// meaningful order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    ContactInfo,
    Experience,
    Education,
    Skills,
    Projects,
    Certifications,
    Summary,
    Languages,
    Interests,
}

/// Section key to the block of text assigned to it, lines in input order.
pub type SectionMap = BTreeMap<Section, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactMetadata {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub linkedin: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    pub raw_text: String,
    pub metadata: ContactMetadata,
    pub sections: SectionMap,
    pub word_count: usize,
}

impl ParsedResume {
    pub fn section(&self, section: Section) -> Option<&str> {
        self.sections.get(&section).map(String::as_str)
    }

    pub fn has_section(&self, section: Section) -> bool {
        self.sections.contains_key(&section)
    }
}

impl std::fmt::Display for Section {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Section::ContactInfo => write!(f, "Contact Info"),
            Section::Experience => write!(f, "Experience"),
            Section::Education => write!(f, "Education"),
            Section::Skills => write!(f, "Skills"),
            Section::Projects => write!(f, "Projects"),
            Section::Certifications => write!(f, "Certifications"),
            Section::Summary => write!(f, "Summary"),
            Section::Languages => write!(f, "Languages"),
            Section::Interests => write!(f, "Interests"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_map_iterates_in_catalog_order() {
        let mut sections = SectionMap::new();
        sections.insert(Section::Interests, "chess".to_string());
        sections.insert(Section::Experience, "engineer".to_string());
        sections.insert(Section::ContactInfo, "Jane Doe".to_string());

        let keys: Vec<Section> = sections.keys().copied().collect();
        assert_eq!(
            keys,
            vec![Section::ContactInfo, Section::Experience, Section::Interests]
        );
    }

    #[test]
    fn test_section_serializes_as_snake_case() {
        let json = serde_json::to_string(&Section::ContactInfo).unwrap();
        assert_eq!(json, "\"contact_info\"");

        let json = serde_json::to_string(&Section::Certifications).unwrap();
        assert_eq!(json, "\"certifications\"");
    }

    #[test]
    fn test_parsed_resume_round_trip() {
        let mut sections = SectionMap::new();
        sections.insert(Section::Skills, "Rust, Python".to_string());

        let resume = ParsedResume {
            raw_text: "Jane Doe\nSKILLS\nRust, Python".to_string(),
            metadata: ContactMetadata {
                name: Some("Jane Doe".to_string()),
                ..ContactMetadata::default()
            },
            sections,
            word_count: 5,
        };

        let json = serde_json::to_string(&resume).unwrap();
        assert!(json.contains("\"skills\":\"Rust, Python\""));

        let restored: ParsedResume = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, resume);
        assert_eq!(restored.section(Section::Skills), Some("Rust, Python"));
        assert!(!restored.has_section(Section::Education));
    }
}
