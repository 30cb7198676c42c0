// src/normalize/mod.rs

//! Reshaping of scraped records into the output tables.
//!
//! Both normalizers are pure functions over a [`Table`]: column renames,
//! numeric coercions and regex decomposition of composite text cells. A cell
//! that fails to parse becomes missing; rows are never dropped for it.

pub mod courses;
pub mod offerings;
pub mod table;

pub use courses::{empty_courses, normalize_courses};
pub use offerings::{empty_offerings, normalize_offerings};
pub use table::Table;
