// src/storage/local.rs

//! Local filesystem storage for CSV tables.
//!
//! Cells are rendered with [`FieldValue::to_cell`]; missing cells are empty.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{FieldValue, Record};
use crate::normalize::Table;
use crate::storage::{TableStorage, WriteMetadata};

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    /// Get the full path for a file name.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root_dir.join(name)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(name);
        self.ensure_dir(&path).await?;

        let tmp = path.with_extension("csv.tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, name: &str) -> Result<Option<Vec<u8>>> {
        match tokio::fs::read(self.path(name)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

/// Render a table as CSV with a header row.
pub fn encode_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns())?;

    for row in table.rows() {
        writer.write_record(
            table
                .columns()
                .iter()
                .map(|column| row.get(column).map(FieldValue::to_cell).unwrap_or_default()),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Io(e.into_error()))
}

/// Parse CSV bytes into a table of text cells; empty cells are missing.
pub fn decode_csv(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(bytes);
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_owned).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = Record::new();
        for (i, header) in headers.iter().enumerate() {
            match record.get(i) {
                Some(cell) if !cell.is_empty() => row.insert(header.as_str(), cell),
                _ => {}
            }
        }
        rows.push(row);
    }

    let mut table = Table::with_columns(headers);
    for row in rows {
        table.push_row(row);
    }
    Ok(table)
}

#[async_trait]
impl TableStorage for LocalStorage {
    async fn write_table(&self, name: &str, table: &Table) -> Result<WriteMetadata> {
        let bytes = encode_csv(table)?;
        let path = self.write_bytes(name, &bytes).await?;
        log::info!("Wrote {} rows to {}", table.len(), path.display());

        Ok(WriteMetadata {
            path,
            rows: table.len(),
            timestamp: Utc::now(),
        })
    }

    async fn read_table(&self, name: &str) -> Result<Option<Table>> {
        match self.read_bytes(name).await? {
            Some(bytes) => Ok(Some(decode_csv(&bytes)?)),
            None => Ok(None),
        }
    }
}
