// src/models/mod.rs

//! Domain models for the catalog scraper.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod course;
mod offering;
mod record;
mod selectors;

// Re-export all public types
pub use config::{BrowserConfig, CatalogConfig, Config, OutputConfig};
pub use course::{CODE_COLUMN, CourseRecord, URL_COLUMN};
pub use offering::OfferingRecord;
pub use record::{FieldValue, Record};
pub use selectors::{CatalogSelectors, NO_INFORMATION, is_no_information};
