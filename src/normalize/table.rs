// src/normalize/table.rs

//! Column-ordered table of records.

use crate::error::{AppError, Result};
use crate::models::{FieldValue, Record};

/// Rows of records sharing one ordered column list.
///
/// A row without a value for a column holds a missing cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Record>,
}

impl Table {
    /// Empty table with the given columns.
    pub fn with_columns<I, S>(columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table whose columns are the union of all record keys in
    /// first-seen order.
    pub fn from_records<I: IntoIterator<Item = Record>>(records: I) -> Self {
        let mut table = Self::default();
        for record in records {
            table.push_row(record);
        }
        table
    }

    /// Append a row, adding any columns it introduces.
    pub fn push_row(&mut self, row: Record) {
        for (key, _) in row.iter() {
            if !self.has_column(key) {
                self.columns.push(key.to_string());
            }
        }
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [Record] {
        &mut self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|c| c == column)
    }

    /// Fail with `MissingColumn` unless the column exists.
    pub fn require(&self, table: &str, column: &str) -> Result<()> {
        if self.has_column(column) {
            Ok(())
        } else {
            Err(AppError::missing_column(table, column))
        }
    }

    /// Rename a column in place. Renaming an absent column does nothing.
    pub fn rename(&mut self, from: &str, to: &str) {
        if from == to || !self.has_column(from) {
            return;
        }
        self.drop_column(to);
        if let Some(column) = self.columns.iter_mut().find(|c| *c == from) {
            *column = to.to_string();
        }

        for row in &mut self.rows {
            if let Some(value) = row.remove(from) {
                row.insert(to, value);
            }
        }
    }

    /// Remove a column and its cells, if present.
    pub fn drop_column(&mut self, column: &str) {
        let before = self.columns.len();
        self.columns.retain(|c| c != column);
        if self.columns.len() != before {
            for row in &mut self.rows {
                row.remove(column);
            }
        }
    }

    /// Append a column computed per row; `None` leaves the cell missing.
    pub fn derive<F>(&mut self, column: &str, mut f: F)
    where
        F: FnMut(&Record) -> Option<FieldValue>,
    {
        if !self.has_column(column) {
            self.columns.push(column.to_string());
        }
        for row in &mut self.rows {
            match f(&*row) {
                Some(value) => row.insert(column, value),
                None => {
                    row.remove(column);
                }
            }
        }
    }

    /// Keep only the rows matching the predicate.
    pub fn retain<F: FnMut(&Record) -> bool>(&mut self, f: F) {
        self.rows.retain(f);
    }
}

/// Text of a cell, with multi-line values joined by `separator`.
pub fn cell_text(value: &FieldValue, separator: &str) -> Option<String> {
    match value {
        FieldValue::Text(s) => Some(s.clone()),
        FieldValue::Lines(lines) => Some(lines.join(separator)),
        FieldValue::Number(n) => Some(n.to_string()),
        FieldValue::Links(_) => None,
    }
}
