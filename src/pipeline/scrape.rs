// src/pipeline/scrape.rs

//! Catalog scraping pipeline.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::error::{AppError, Result};
use crate::models::{Config, CourseRecord, OfferingRecord, Record};
use crate::normalize::Table;
use crate::services::{CourseDetailExtractor, ListingExtractor, OfferingExtractor};
use crate::session::{Navigator, PageSource};

/// Statistics about a scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub course_count: usize,
    pub offering_count: usize,
    /// Courses whose page offered no semesters
    pub courses_without_offerings: usize,
}

impl ScrapeStats {
    pub fn duration_secs(&self) -> i64 {
        (self.end_time - self.start_time).num_seconds()
    }
}

/// Everything one scrape produced, before normalization.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// Listing stubs with their details merged in
    pub courses: Vec<CourseRecord>,
    pub offerings: Vec<OfferingRecord>,
    pub stats: ScrapeStats,
}

impl ScrapeOutcome {
    /// Raw course table, one row per course.
    pub fn course_table(&self) -> Table {
        Table::from_records(self.courses.iter().map(|c| c.fields.clone()))
    }

    /// Raw offering table, one row per (course, semester).
    pub fn offering_table(&self) -> Table {
        Table::from_records(self.offerings.iter().map(OfferingRecord::to_row))
    }
}

/// Scrape listings, course details and offerings through one session.
///
/// Every course in the listing gets its detail record merged before the
/// outcome is returned. A course page that still fails after all retries
/// fails the run. Any other detail error leaves the course with empty
/// details and no offerings.
pub async fn run_scrape<S: PageSource>(
    config: &Config,
    nav: &mut Navigator<S>,
    debug: bool,
) -> Result<ScrapeOutcome> {
    let start_time = Utc::now();

    let listed = ListingExtractor::new(config).extract(nav, debug).await?;
    let mut courses = dedup_by_code(listed);
    log::info!("Listed {} courses", courses.len());

    let detail_extractor = CourseDetailExtractor::new(config);
    let offering_extractor = OfferingExtractor::new(config);

    let mut details: HashMap<String, Record> = HashMap::with_capacity(courses.len());
    let mut offerings = Vec::new();
    let mut courses_without_offerings = 0;
    let total = courses.len();

    for (nth, course) in courses.iter().enumerate() {
        log::info!("Course {} ({} of {})", course.code, nth + 1, total);

        let record = match detail_extractor.extract(nav, course).await {
            Ok(record) => record,
            Err(e @ AppError::PageLoad { .. }) => return Err(e),
            Err(e) => {
                log::warn!("No details for {}: {}", course.code, e);
                details.insert(course.code.clone(), Record::new());
                courses_without_offerings += 1;
                continue;
            }
        };
        details.insert(course.code.clone(), record);

        let found = offering_extractor.extract(nav, &course.code).await?;
        log::debug!("  {} offerings", found.len());
        if found.is_empty() {
            courses_without_offerings += 1;
        }
        offerings.extend(found);
    }

    for course in &mut courses {
        if let Some(record) = details.remove(&course.code) {
            course.merge(record);
        }
    }

    let stats = ScrapeStats {
        start_time,
        end_time: Utc::now(),
        course_count: courses.len(),
        offering_count: offerings.len(),
        courses_without_offerings,
    };

    Ok(ScrapeOutcome {
        courses,
        offerings,
        stats,
    })
}

/// Keep the first listing of every course code.
fn dedup_by_code(courses: Vec<CourseRecord>) -> Vec<CourseRecord> {
    let mut seen = HashSet::new();
    courses
        .into_iter()
        .filter(|course| {
            let first = seen.insert(course.code.clone());
            if !first {
                log::debug!("Course {} listed twice, keeping the first", course.code);
            }
            first
        })
        .collect()
}


#[cfg(test)]
mod tests {
    use super::fixture::{config, navigator, source, source_without};
    use super::*;
    use crate::error::AppError;
    use crate::services::details::ENGLISH_NAME_COLUMN;

    #[tokio::test]
    async fn every_listed_course_gets_its_details() {
        let config = config();
        let mut nav = navigator(source());

        let outcome = run_scrape(&config, &mut nav, false).await.unwrap();

        let codes: Vec<_> = outcome.courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["SF1624", "EP1100"]);
        for course in &outcome.courses {
            assert!(course.fields.contains_key(ENGLISH_NAME_COLUMN), "{}", course.code);
            assert!(course.fields.contains_key("Course contents"), "{}", course.code);
        }
        assert_eq!(
            outcome.courses[1].fields.text(ENGLISH_NAME_COLUMN),
            Some("Electrical Engineering")
        );
    }

    #[tokio::test]
    async fn offerings_reference_scraped_courses() {
        let config = config();
        let mut nav = navigator(source());

        let outcome = run_scrape(&config, &mut nav, false).await.unwrap();

        assert_eq!(outcome.offerings.len(), 2);
        assert!(outcome.offerings.iter().all(|o| o.course_code == "SF1624"));
        assert_eq!(outcome.stats.course_count, 2);
        assert_eq!(outcome.stats.offering_count, 2);
        assert_eq!(outcome.stats.courses_without_offerings, 1);
        assert_eq!(nav.source().fetch_count("https://kth.test/kurs/SF1624?l=en"), 1);
    }

    #[tokio::test]
    async fn unreachable_course_page_fails_the_run() {
        let config = config();
        let source = source().with_timeouts("https://kth.test/kurs/EP1100?l=en", 5);
        let mut nav = navigator(source);

        let err = run_scrape(&config, &mut nav, false).await.unwrap_err();
        assert!(matches!(err, AppError::PageLoad { attempts: 2, .. }));
    }

    #[tokio::test]
    async fn missing_course_page_keeps_the_course_without_details() {
        let config = config();
        let mut nav = navigator(source_without("https://kth.test/kurs/SF1624?l=en"));

        let outcome = run_scrape(&config, &mut nav, false).await.unwrap();

        let codes: Vec<_> = outcome.courses.iter().map(|c| c.code.as_str()).collect();
        assert_eq!(codes, vec!["SF1624", "EP1100"]);
        assert!(!outcome.courses[0].fields.contains_key(ENGLISH_NAME_COLUMN));
        assert_eq!(outcome.courses[0].fields.text("Kursnamn"), Some("Linjär algebra"));
        assert!(outcome.courses[1].fields.contains_key(ENGLISH_NAME_COLUMN));
        assert!(outcome.offerings.is_empty());
        assert_eq!(outcome.stats.courses_without_offerings, 2);
        assert_eq!(nav.source().fetch_count("https://kth.test/kurs/SF1624?l=en"), 1);
    }

    #[tokio::test]
    async fn raw_tables_hold_one_row_per_record() {
        let config = config();
        let mut nav = navigator(source());
        let outcome = run_scrape(&config, &mut nav, false).await.unwrap();

        let courses = outcome.course_table();
        assert_eq!(courses.len(), 2);
        assert!(courses.has_column("Kurskod"));

        let offerings = outcome.offering_table();
        assert_eq!(offerings.len(), 2);
        assert!(offerings.has_column("Examiner"));
        assert!(offerings.has_column("Semester"));
    }
}
