// src/models/course.rs

//! Course record built from the listing and completed from the course page.

use crate::models::Record;

/// Column holding the course code in the Swedish listing.
pub const CODE_COLUMN: &str = "Kurskod";

/// Column holding the course page URL.
pub const URL_COLUMN: &str = "URL";

/// A course scraped from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseRecord {
    /// Course code (e.g. "SF1624"), unique per run
    pub code: String,

    /// English course page URL
    pub url: String,

    /// Listing columns followed by detail sections
    pub fields: Record,
}

impl CourseRecord {
    /// Build a course stub from a zipped listing row.
    ///
    /// Returns `None` when the row has no course code or URL.
    pub fn from_listing(fields: Record) -> Option<Self> {
        let code = fields.text(CODE_COLUMN)?.trim().to_string();
        let url = fields.text(URL_COLUMN)?.to_string();
        if code.is_empty() {
            return None;
        }
        Some(Self { code, url, fields })
    }

    /// Merge detail-page fields into the listing fields.
    pub fn merge(&mut self, details: Record) {
        self.fields.extend(details);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_row(code: &str) -> Record {
        let mut row = Record::new();
        row.insert(URL_COLUMN, "https://example.com/SF1624?l=en");
        row.insert(CODE_COLUMN, code);
        row.insert("Kursnamn", "Linjär algebra");
        row
    }

    #[test]
    fn from_listing_takes_code_and_url() {
        let course = CourseRecord::from_listing(listing_row("SF1624")).unwrap();
        assert_eq!(course.code, "SF1624");
        assert_eq!(course.url, "https://example.com/SF1624?l=en");
    }

    #[test]
    fn from_listing_rejects_blank_code() {
        assert!(CourseRecord::from_listing(listing_row("  ")).is_none());
    }

    #[test]
    fn merge_appends_detail_fields() {
        let mut course = CourseRecord::from_listing(listing_row("SF1624")).unwrap();
        let mut details = Record::new();
        details.insert("Course name (eng.)", "Linear Algebra");
        course.merge(details);

        assert_eq!(course.fields.text("Course name (eng.)"), Some("Linear Algebra"));
        assert_eq!(course.fields.len(), 4);
    }
}
