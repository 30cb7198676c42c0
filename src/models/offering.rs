// src/models/offering.rs

//! Per-semester course offering.

use crate::models::Record;

/// One course offering, identified by course code and semester label.
#[derive(Debug, Clone, PartialEq)]
pub struct OfferingRecord {
    pub course_code: String,
    pub semester: String,

    /// Key-information groups and contact roles
    pub fields: Record,
}

impl OfferingRecord {
    pub fn new(course_code: impl Into<String>, semester: impl Into<String>, fields: Record) -> Self {
        Self {
            course_code: course_code.into(),
            semester: semester.into(),
            fields,
        }
    }

    /// Fields as a table row, with the identifying columns appended.
    pub fn to_row(&self) -> Record {
        let mut row = self.fields.clone();
        row.insert("Course code", self.course_code.as_str());
        row.insert("Semester", self.semester.as_str());
        row
    }
}
