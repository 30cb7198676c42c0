// src/services/listing.rs

//! Department listing extractor.
//!
//! Walks the course search page once per department and turns every result
//! row into a course stub.

use scraper::ElementRef;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CatalogConfig, Config, CourseRecord, FieldValue, Record, URL_COLUMN};
use crate::session::{Navigator, PageSource};
use crate::utils::html::{inner_text, link, select_all, select_first};
use crate::utils::with_query_param;

/// Service extracting course stubs from the department listings.
pub struct ListingExtractor<'a> {
    config: &'a Config,
}

impl<'a> ListingExtractor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Collect course stubs from every configured department, in order.
    ///
    /// In debug mode collection stops as soon as the record limit is reached.
    pub async fn extract<S: PageSource>(
        &self,
        nav: &mut Navigator<S>,
        debug: bool,
    ) -> Result<Vec<CourseRecord>> {
        let catalog = &self.config.catalog;
        let limit = debug.then_some(catalog.debug_record_limit);
        let headers = self.column_names(nav).await?;
        log::debug!("Listing columns: {:?}", headers);

        let mut courses = Vec::new();
        let total = catalog.departments.len();

        for (nth, department) in catalog.departments.iter().enumerate() {
            log::info!("Department {} ({} of {})", department, nth + 1, total);

            let url = with_query_param(&catalog.search_url, &catalog.department_param, department)?;
            match nav.load(&url).await {
                Ok(_) => {}
                Err(e @ AppError::PageLoad { .. }) => return Err(e),
                Err(e) => {
                    log::warn!("Skipping department {}: {}", department, e);
                    continue;
                }
            }
            nav.settle(self.config.browser.listing_delay()).await;

            let page = nav.page()?;
            let table = match page.find(&self.config.selectors.listing_table) {
                Ok(table) => table,
                Err(AppError::NotFound { .. }) => {
                    log::warn!("No results table for department {}", department);
                    continue;
                }
                Err(e) => return Err(e),
            };

            let before = courses.len();
            for row in select_all(table, "tr")? {
                match parse_listing_row(row, &headers, page.url(), catalog) {
                    Some(course) => courses.push(course),
                    None => log::debug!("Skipping listing row without course link"),
                }

                if limit.is_some_and(|n| courses.len() >= n) {
                    log::info!("Debug mode: stopping after {} courses", courses.len());
                    return Ok(courses);
                }
            }
            log::info!("  Found {} courses", courses.len() - before);
        }

        Ok(courses)
    }

    /// Read the listing column names from the search table header.
    async fn column_names<S: PageSource>(&self, nav: &mut Navigator<S>) -> Result<Vec<String>> {
        let page = nav.load(&self.config.catalog.header_url).await?;
        let header = page.find(&self.config.selectors.listing_header)?;

        let mut names = vec![URL_COLUMN.to_string()];
        names.extend(select_all(header, "th")?.into_iter().map(inner_text));
        Ok(names)
    }
}

/// Zip one results row against the column names.
///
/// The first cell contributes the course page URL (with the language
/// parameter) followed by its link text; other cells contribute their text.
pub fn parse_listing_row(
    row: ElementRef<'_>,
    headers: &[String],
    base: &Url,
    catalog: &CatalogConfig,
) -> Option<CourseRecord> {
    let cells = select_all(row, "td").ok()?;
    let mut values = Vec::with_capacity(cells.len() + 1);

    for (i, cell) in cells.into_iter().enumerate() {
        if i == 0 {
            let anchor = select_first(cell, "a").ok()?;
            let (text, href) = link(anchor, base)?;
            values.push(with_query_param(&href, &catalog.language_param, &catalog.language).ok()?);
            values.push(text);
        } else {
            values.push(inner_text(cell));
        }
    }

    let fields: Record = headers
        .iter()
        .cloned()
        .zip(values.into_iter().map(FieldValue::Text))
        .collect();
    CourseRecord::from_listing(fields)
}
