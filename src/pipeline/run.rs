// src/pipeline/run.rs

//! Full scrape, normalize and export run.

use crate::error::Result;
use crate::models::Config;
use crate::normalize::{normalize_courses, normalize_offerings};
use crate::pipeline::{ScrapeStats, run_scrape};
use crate::session::{Navigator, PageSource};
use crate::storage::{TableStorage, WriteMetadata};

/// Summary of a finished run.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: ScrapeStats,
    pub courses: WriteMetadata,
    pub offerings: WriteMetadata,
}

/// Scrape the catalog, normalize both tables and write them to storage.
///
/// The course table is written before the offerings are normalized.
pub async fn run_pipeline<S: PageSource>(
    config: &Config,
    storage: &dyn TableStorage,
    nav: &mut Navigator<S>,
    debug: bool,
) -> Result<RunSummary> {
    if debug {
        log::info!(
            "Debug mode: listing capped at {} courses",
            config.catalog.debug_record_limit
        );
    }

    let outcome = run_scrape(config, nav, debug).await?;

    let courses = normalize_courses(outcome.course_table(), &config.catalog)?;
    let courses = storage
        .write_table(&config.output.courses_name(debug), &courses)
        .await?;

    let offerings = normalize_offerings(outcome.offering_table())?;
    let offerings = storage
        .write_table(&config.output.offerings_name(debug), &offerings)
        .await?;

    let stats = outcome.stats;
    log::info!(
        "Scraped {} courses and {} offerings in {}s ({} courses without offerings)",
        stats.course_count,
        stats.offering_count,
        stats.duration_secs(),
        stats.courses_without_offerings
    );
    log::info!("  Courses: {} rows -> {}", courses.rows, courses.path.display());
    log::info!("  Offerings: {} rows -> {}", offerings.rows, offerings.path.display());

    Ok(RunSummary {
        stats,
        courses,
        offerings,
    })
}
