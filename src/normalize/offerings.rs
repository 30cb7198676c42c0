// src/normalize/offerings.rs

//! Offering table normalization.
//!
//! Turns the free-text offering label into an academic year range and splits
//! the period text into one credit column per study period.

use regex::Regex;

use crate::error::{AppError, Result};
use crate::models::FieldValue;
use crate::normalize::Table;
use crate::normalize::table::cell_text;

pub const OFFERINGS_TABLE: &str = "offerings";

pub const COURSE_CODE: &str = "Course code";
pub const SEMESTER: &str = "Semester";
pub const OFFERING_LABEL: &str = "For course offering";
pub const PERIODS: &str = "Periods";
pub const YEAR: &str = "Year";
pub const STARTING_TERM: &str = "Starting Term";

/// Study periods with their own credit column.
pub const PERIOD_LABELS: [&str; 4] = ["P1", "P2", "P3", "P4"];

const TERM_PATTERN: &str = r"(Autumn|Spring)\s(\d{4})\b";

/// Fragments removed from the period text before matching.
const PERIOD_NOISE: [&str; 6] = ["'", " hp", " fup", "Autumn", "Spring", ":"];

/// Normalize the raw offering table.
///
/// Offerings without a label or period text keep their rows with missing
/// year and credit cells. A table that already carries the output columns
/// but no offering label fails with `MissingColumn`.
pub fn normalize_offerings(mut table: Table) -> Result<Table> {
    if table.columns().is_empty() {
        return Ok(empty_offerings());
    }
    if is_normalized(&table) {
        return Err(AppError::missing_column(OFFERINGS_TABLE, OFFERING_LABEL));
    }

    let term = Regex::new(TERM_PATTERN)?;
    let periods: Vec<Regex> = PERIOD_LABELS
        .iter()
        .map(|label| Regex::new(&format!(r"{label}\s\((.+?)\)")))
        .collect::<std::result::Result<_, _>>()?;

    table.rename(OFFERING_LABEL, YEAR);
    table.derive(STARTING_TERM, |row| {
        let label = row.get(YEAR).and_then(|v| cell_text(v, " "))?;
        starting_term(&term, &label).map(|(season, _)| season.into())
    });
    table.derive(YEAR, |row| {
        let label = row.get(YEAR).and_then(|v| cell_text(v, " "))?;
        starting_term(&term, &label).map(|(_, year)| year.into())
    });

    for (label, pattern) in PERIOD_LABELS.iter().zip(&periods) {
        table.derive(label, |row| {
            let text = clean_periods(row.get(PERIODS)?)?;
            period_credits(pattern, &text).map(FieldValue::Number)
        });
    }
    table.drop_column(PERIODS);

    Ok(table)
}

fn is_normalized(table: &Table) -> bool {
    !table.has_column(OFFERING_LABEL)
        && (table.has_column(YEAR) || PERIOD_LABELS.iter().any(|p| table.has_column(p)))
}

/// Column layout of a run that found no offerings.
pub fn empty_offerings() -> Table {
    let mut columns = vec![COURSE_CODE, SEMESTER, YEAR, STARTING_TERM];
    columns.extend(PERIOD_LABELS);
    Table::with_columns(columns)
}

/// Starting term and academic year range of an offering label.
///
/// `Autumn 2023` starts 2023/2024, `Spring 2023` belongs to 2022/2023.
pub fn starting_term(pattern: &Regex, label: &str) -> Option<(String, String)> {
    let caps = pattern.captures(label)?;
    let term = caps.get(1)?.as_str();
    let mut year: i32 = caps.get(2)?.as_str().parse().ok()?;
    if term == "Spring" {
        year -= 1;
    }
    Some((term.to_string(), format!("{}/{}", year, year + 1)))
}

/// Period text with list items joined and noise removed.
fn clean_periods(value: &FieldValue) -> Option<String> {
    let mut text = cell_text(value, ", ")?;
    for noise in PERIOD_NOISE {
        text = text.replace(noise, "");
    }
    Some(text)
}

/// Credits in parentheses after a period label.
fn period_credits(pattern: &Regex, text: &str) -> Option<f64> {
    pattern.captures(text)?.get(1)?.as_str().trim().parse().ok()
}
