//! Pipeline entry points.
//!
//! - `run_scrape`: Collect courses, details and offerings through one session
//! - `run_pipeline`: Scrape, normalize and write both tables

pub mod run;
pub mod scrape;

pub use run::{RunSummary, run_pipeline};
pub use scrape::{ScrapeOutcome, ScrapeStats, run_scrape};
