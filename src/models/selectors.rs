// src/models/selectors.rs

//! CSS selectors, element ids and class markers for the catalog pages.

use serde::{Deserialize, Serialize};

/// Placeholder bodies the catalog shows for empty sections, in Swedish and English.
pub const NO_INFORMATION: [&str; 2] = ["Ingen information tillagd", "No information inserted"];

/// Whether a body text is one of the "no information" placeholders.
pub fn is_no_information(text: &str) -> bool {
    NO_INFORMATION.contains(&text)
}

/// Structural contract with the catalog's HTML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSelectors {
    /// Header row of the course search table
    #[serde(default = "defaults::listing_header")]
    pub listing_header: String,

    /// Body of the course search results table
    #[serde(default = "defaults::listing_table")]
    pub listing_table: String,

    /// Element id of the course content block
    #[serde(default = "defaults::content_block_id")]
    pub content_block_id: String,

    /// Element id of the course page heading
    #[serde(default = "defaults::heading_id")]
    pub heading_id: String,

    /// Introductory paragraph on the course page
    #[serde(default = "defaults::intro_paragraph")]
    pub intro_paragraph: String,

    /// Semester dropdown control
    #[serde(default = "defaults::semester_dropdown")]
    pub semester_dropdown: String,

    /// Container of the key-information groups
    #[serde(default = "defaults::key_information")]
    pub key_information: String,

    /// Container of the contact groups
    #[serde(default = "defaults::contacts")]
    pub contacts: String,

    /// Class that ends the whole key-information region
    #[serde(default = "defaults::region_end_class")]
    pub region_end_class: String,

    /// Class that ends the current header group
    #[serde(default = "defaults::group_end_class")]
    pub group_end_class: String,

    /// Class of a person entry within a contact group
    #[serde(default = "defaults::person_class")]
    pub person_class: String,
}

impl Default for CatalogSelectors {
    fn default() -> Self {
        Self {
            listing_header: defaults::listing_header(),
            listing_table: defaults::listing_table(),
            content_block_id: defaults::content_block_id(),
            heading_id: defaults::heading_id(),
            intro_paragraph: defaults::intro_paragraph(),
            semester_dropdown: defaults::semester_dropdown(),
            key_information: defaults::key_information(),
            contacts: defaults::contacts(),
            region_end_class: defaults::region_end_class(),
            group_end_class: defaults::group_end_class(),
            person_class: defaults::person_class(),
        }
    }
}

mod defaults {
    pub fn listing_header() -> String {
        ".table > thead:nth-child(1) > tr:nth-child(1)".into()
    }
    pub fn listing_table() -> String {
        ".table > tbody:nth-child(2)".into()
    }
    pub fn content_block_id() -> String {
        "courseContentBlock".into()
    }
    pub fn heading_id() -> String {
        "page-heading".into()
    }
    pub fn intro_paragraph() -> String {
        "#courseIntroText .paragraphs".into()
    }
    pub fn semester_dropdown() -> String {
        "#semesterDropdown".into()
    }
    pub fn key_information() -> String {
        "#roundKeyInformation > div:nth-child(1)".into()
    }
    pub fn contacts() -> String {
        "#roundContact".into()
    }
    pub fn region_end_class() -> String {
        "row".into()
    }
    pub fn group_end_class() -> String {
        "t4".into()
    }
    pub fn person_class() -> String {
        "person".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinels_match_exactly() {
        assert!(is_no_information("No information inserted"));
        assert!(is_no_information("Ingen information tillagd"));
        assert!(!is_no_information("No information inserted yet"));
        assert!(!is_no_information("no information inserted"));
    }
}
