// src/normalize/courses.rs

//! Course table normalization.

use crate::error::Result;
use crate::models::{CODE_COLUMN, CatalogConfig, FieldValue, Record, URL_COLUMN};
use crate::normalize::Table;

pub const COURSES_TABLE: &str = "courses";

pub const COURSE_CODE: &str = "Course code";
pub const COURSE_NAME: &str = "Course name";
pub const CREDITS: &str = "hp";
pub const LEVEL: &str = "Level";
pub const SCHOOL: &str = "School";
pub const COURSE_WEB: &str = "Course web";

/// Listing columns and their output names.
const RENAMES: [(&str, &str); 4] = [
    (CODE_COLUMN, COURSE_CODE),
    ("Kursnamn", COURSE_NAME),
    ("Omfattning", CREDITS),
    ("Utbildningsnivå", LEVEL),
];

const DROPPED: &str = "Ethical approach";

/// Degree projects are not taught courses.
const EXCLUDED_NAME: &str = "examensarbete";

/// Normalize the raw course table.
///
/// Fails with `MissingColumn` on a table that lacks the listing code column,
/// which is what a second pass over normalized output looks like.
pub fn normalize_courses(mut table: Table, catalog: &CatalogConfig) -> Result<Table> {
    if table.columns().is_empty() {
        return Ok(empty_courses());
    }
    table.require(COURSES_TABLE, CODE_COLUMN)?;

    for (from, to) in RENAMES {
        table.rename(from, to);
    }
    table.drop_column(DROPPED);

    for row in table.rows_mut() {
        match row.text(CREDITS).and_then(parse_credits) {
            Some(hp) => row.insert(CREDITS, FieldValue::Number(hp)),
            None => {
                row.remove(CREDITS);
            }
        }
    }

    table.derive(SCHOOL, |row| course_code(row).map(|code| school_of(code).into()));
    table.derive(COURSE_WEB, |row| {
        course_code(row).map(|code| format!("{}{}", catalog.course_web_base, code).into())
    });

    let before = table.len();
    table.retain(|row| !is_degree_project(row));
    log::debug!("Dropped {} degree projects", before - table.len());

    Ok(table)
}

/// Column layout of a run that found no courses.
pub fn empty_courses() -> Table {
    Table::with_columns([
        URL_COLUMN,
        COURSE_CODE,
        COURSE_NAME,
        CREDITS,
        LEVEL,
        SCHOOL,
        COURSE_WEB,
    ])
}

/// Parse a credit cell such as `7,5 hp` or `6 fup`.
pub fn parse_credits(raw: &str) -> Option<f64> {
    raw.replace("fup", "")
        .replace("hp", "")
        .trim()
        .replace(',', ".")
        .parse()
        .ok()
}

/// Leading non-digit prefix of a course code.
pub fn school_of(code: &str) -> &str {
    let end = code.find(|c: char| c.is_numeric()).unwrap_or(code.len());
    &code[..end]
}

fn course_code(row: &Record) -> Option<&str> {
    row.text(COURSE_CODE)
}

fn is_degree_project(row: &Record) -> bool {
    row.text(COURSE_NAME)
        .is_some_and(|name| name.to_lowercase().contains(EXCLUDED_NAME))
}
