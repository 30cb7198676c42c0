// src/services/offerings.rs

//! Course offering extractor.
//!
//! Steps through the semester selector of a course page and reads the key
//! information and contacts of every offered semester.

use std::collections::BTreeMap;

use crate::error::{AppError, Result};
use crate::models::{CatalogSelectors, Config, FieldValue, OfferingRecord, Record, is_no_information};
use crate::session::{Navigator, Page, PageSource};
use crate::utils::html::{class_attr, following_siblings, inner_text, link, select_all, select_first};

/// Contact header that labels the region rather than a role.
pub const CONTACT_LABEL: &str = "Contact";

/// One entry of the semester selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SemesterOption {
    /// Displayed label, e.g. "Autumn 2023"
    pub label: String,
    /// Option value used to select the semester; the label when absent
    pub value: String,
}

/// Service extracting per-semester offerings for a course.
pub struct OfferingExtractor<'a> {
    config: &'a Config,
}

impl<'a> OfferingExtractor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Extract one offering per semester of the course page currently loaded.
    ///
    /// A semester that fails to parse is logged and skipped. Only a page that
    /// cannot be loaded at all aborts the course.
    pub async fn extract<S: PageSource>(
        &self,
        nav: &mut Navigator<S>,
        course_code: &str,
    ) -> Result<Vec<OfferingRecord>> {
        let semesters = semester_options(nav.page()?, &self.config.selectors)?;
        if semesters.is_empty() {
            log::debug!("No semesters offered for {}", course_code);
            return Ok(Vec::new());
        }

        let mut offerings = Vec::with_capacity(semesters.len());
        for semester in &semesters {
            match self.extract_semester(nav, course_code, semester).await {
                Ok(offering) => offerings.push(offering),
                Err(e @ AppError::PageLoad { .. }) => return Err(e),
                Err(e) => log::warn!(
                    "Skipping semester '{}' of {}: {}",
                    semester.label,
                    course_code,
                    e
                ),
            }
        }

        Ok(offerings)
    }

    async fn extract_semester<S: PageSource>(
        &self,
        nav: &mut Navigator<S>,
        course_code: &str,
        semester: &SemesterOption,
    ) -> Result<OfferingRecord> {
        nav.select_option(&self.config.catalog.semester_param, &semester.value)
            .await?;
        nav.settle(self.config.browser.page_delay()).await;

        let page = nav.page()?;
        let mut fields = parse_key_information(page, &self.config.selectors)?;
        fields.extend(parse_contacts(page, &self.config.selectors)?);

        Ok(OfferingRecord::new(course_code, semester.label.as_str(), fields))
    }
}

/// Semester options after the leading placeholder; empty without a selector.
pub fn semester_options(page: &Page, selectors: &CatalogSelectors) -> Result<Vec<SemesterOption>> {
    let options = page.find_all(&format!("{} option", selectors.semester_dropdown))?;
    Ok(options
        .into_iter()
        .skip(1)
        .map(|option| {
            let label = inner_text(option);
            let value = option
                .value()
                .attr("value")
                .map_or_else(|| label.clone(), str::to_string);
            SemesterOption { label, value }
        })
        .collect())
}

/// Parse the key-information groups.
///
/// Each header collects the text of its following siblings until a group-end
/// sibling. A region-end sibling stops parsing and returns the groups
/// completed so far.
pub fn parse_key_information(page: &Page, selectors: &CatalogSelectors) -> Result<Record> {
    let region = page.find(&selectors.key_information)?;
    let mut info = Record::new();

    for header in select_all(region, "h3")? {
        let title = inner_text(header);
        let mut bodies: Vec<String> = Vec::new();

        for sibling in following_siblings(header) {
            let class = class_attr(sibling);
            if class == selectors.region_end_class {
                return Ok(info);
            }
            if class == selectors.group_end_class {
                break;
            }

            let text = inner_text(sibling);
            if text.contains('\n') {
                bodies.extend(text.lines().map(str::to_string));
            } else if !text.is_empty() && !is_no_information(&text) {
                bodies.push(text);
            }
        }

        match bodies.len() {
            0 => {}
            1 => info.insert(title, bodies.remove(0)),
            _ => info.insert(title, FieldValue::Lines(bodies)),
        }
    }

    Ok(info)
}

/// Parse contact roles into person name to profile URL mappings.
///
/// A page without a contacts region has no contacts.
pub fn parse_contacts(page: &Page, selectors: &CatalogSelectors) -> Result<Record> {
    let mut contacts = Record::new();
    let region = match page.find(&selectors.contacts) {
        Ok(region) => region,
        Err(AppError::NotFound { .. }) => return Ok(contacts),
        Err(e) => return Err(e),
    };
    let person_selector = format!(".{}", selectors.person_class);

    for header in select_all(region, "h3")?.into_iter().skip(1) {
        let role = inner_text(header);
        if role == CONTACT_LABEL {
            continue;
        }

        let mut persons = BTreeMap::new();
        for sibling in following_siblings(header) {
            if class_attr(sibling) == selectors.group_end_class {
                break;
            }
            if is_no_information(&inner_text(sibling)) {
                continue;
            }
            for person in select_all(sibling, &person_selector)? {
                let anchor = select_first(person, "a")?;
                if let Some((name, href)) = link(anchor, page.url()) {
                    persons.insert(name, href);
                }
            }
        }

        if !persons.is_empty() {
            contacts.insert(role, FieldValue::Links(persons));
        }
    }

    Ok(contacts)
}
