// src/storage/mod.rs

//! Storage abstractions for the output tables.
//!
//! ## Directory Structure
//!
//! ```text
//! {output}/
//! ├── kth_courses.csv      # One row per course
//! └── kth_offerings.csv    # One row per (course, semester)
//! ```
//!
//! Debug runs write `debug_kth_courses.csv` and `debug_kth_offerings.csv`.

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::normalize::Table;

// Re-export for convenience
pub use local::LocalStorage;

/// Metadata about a table write.
#[derive(Debug, Clone)]
pub struct WriteMetadata {
    /// Where the table landed
    pub path: PathBuf,
    /// Data rows written, excluding the header
    pub rows: usize,
    /// Timestamp of the write
    pub timestamp: DateTime<Utc>,
}

/// Trait for table storage backends.
#[async_trait]
pub trait TableStorage: Send + Sync {
    /// Write a table under `name`, replacing any previous file atomically.
    async fn write_table(&self, name: &str, table: &Table) -> Result<WriteMetadata>;

    /// Read a previously written table; every cell comes back as text.
    async fn read_table(&self, name: &str) -> Result<Option<Table>>;
}
