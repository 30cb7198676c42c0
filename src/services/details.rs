// src/services/details.rs

//! Course detail extractor.
//!
//! Reads the content block, English name and introduction from a course page.

use std::collections::BTreeMap;

use scraper::ElementRef;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{CatalogSelectors, Config, CourseRecord, FieldValue, Record, is_no_information};
use crate::session::{Navigator, Page, PageSource};
use crate::utils::html::{inner_text, link, select_all, select_first};

/// Content section whose body lists examiners rather than free text.
pub const EXAMINER_HEADER: &str = "Examinator";

/// Column for the English course name taken from the page heading.
pub const ENGLISH_NAME_COLUMN: &str = "Course name (eng.)";

/// Column for the introductory paragraph.
pub const PARAGRAPH_COLUMN: &str = "paragraph";

/// Service extracting per-course details from course pages.
pub struct CourseDetailExtractor<'a> {
    config: &'a Config,
}

impl<'a> CourseDetailExtractor<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    /// Load the course page and parse its details.
    ///
    /// The course page stays loaded in the session afterwards.
    pub async fn extract<S: PageSource>(
        &self,
        nav: &mut Navigator<S>,
        course: &CourseRecord,
    ) -> Result<Record> {
        nav.load(&course.url).await?;
        nav.settle(self.config.browser.page_delay()).await;
        let page = nav.page()?;
        Ok(parse_course_page(page, &course.code, &self.config.selectors))
    }
}

/// Parse everything the detail extractor keeps from a course page.
pub fn parse_course_page(page: &Page, code: &str, selectors: &CatalogSelectors) -> Record {
    let mut details = parse_content_block(page, selectors);

    match page.find_id(&selectors.heading_id) {
        Ok(heading) => {
            details.insert(ENGLISH_NAME_COLUMN, english_course_name(&inner_text(heading), code));
        }
        Err(e) => log::debug!("No heading for {}: {}", code, e),
    }

    if let Ok(intro) = page.find(&selectors.intro_paragraph) {
        let paragraph = inner_text(intro);
        if !paragraph.is_empty() {
            details.insert(PARAGRAPH_COLUMN, paragraph);
        }
    }

    details
}

/// Parse the labeled sections of the content block.
///
/// A section that fails to parse is skipped on its own.
pub fn parse_content_block(page: &Page, selectors: &CatalogSelectors) -> Record {
    let mut content = Record::new();

    let block = match page.find_id(&selectors.content_block_id) {
        Ok(block) => block,
        Err(e) => {
            log::debug!("No content block on {}: {}", page.url(), e);
            return content;
        }
    };

    let Ok(sections) = select_all(block, "span") else {
        return content;
    };

    for section in sections {
        match parse_section(section, page.url()) {
            Ok(Some((header, value))) => content.insert(header, value),
            Ok(None) => {}
            Err(e) => log::debug!("Skipping content section: {}", e),
        }
    }

    content
}

fn parse_section(section: ElementRef<'_>, base: &Url) -> Result<Option<(String, FieldValue)>> {
    let header = inner_text(select_first(section, "h3")?);
    let body = inner_text(select_first(section, "div")?);

    if is_no_information(&body) {
        return Ok(None);
    }

    if header == EXAMINER_HEADER {
        let mut examiners = BTreeMap::new();
        for entry in select_all(section, "div")? {
            let anchor = select_first(entry, "a")?;
            let (name, href) =
                link(anchor, base).ok_or_else(|| AppError::extract(EXAMINER_HEADER, "link without href"))?;
            examiners.insert(name, href);
        }
        return Ok(Some((header, FieldValue::Links(examiners))));
    }

    Ok(Some((header, FieldValue::Text(body))))
}

/// English course name from the page heading.
///
/// Removes the course code and cuts at the first digit, which starts the
/// trailing credit information.
pub fn english_course_name(heading: &str, code: &str) -> String {
    let name = heading.replace(code, "");
    let name = name.trim();
    let end = name.find(char::is_numeric).unwrap_or(name.len());
    name[..end].trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const COURSE_PAGE: &str = r#"<html><body>
        <h1 id="page-heading">SF1624 Linear Algebra 7.5 credits</h1>
        <div id="courseIntroText"><div class="paragraphs"><p>Vectors and matrices.</p></div></div>
        <div id="courseContentBlock">
          <span><h3>Course contents</h3><div>Systems of linear equations.</div></span>
          <span><h3>Literature</h3><div>No information inserted</div></span>
          <span><h3>Kurslitteratur</h3><div>Ingen information tillagd</div></span>
          <span><h3>Examinator</h3>
            <div><a href="/profile/ada">Ada Lovelace</a></div>
            <div><a href="https://www.kth.se/profile/alan">Alan Turing</a></div>
          </span>
          <span><div>Section without a header</div></span>
          <span><h3>Ethical approach</h3><div>All members of a group are responsible.</div></span>
        </div>
    </body></html>"#;

    fn page() -> Page {
        Page::parse("https://www.kth.se/student/kurser/kurs/SF1624?l=en", COURSE_PAGE).unwrap()
    }

    #[test]
    fn english_name_strips_code_and_credits() {
        assert_eq!(
            english_course_name("SF1624 Linear Algebra 7.5 credits", "SF1624"),
            "Linear Algebra"
        );
        assert_eq!(english_course_name("DD1337 Programming", "DD1337"), "Programming");
        assert_eq!(english_course_name("SF1624", "SF1624"), "");
    }

    #[test]
    fn content_block_skips_sentinels_and_broken_sections() {
        let content = parse_content_block(&page(), &CatalogSelectors::default());

        assert_eq!(
            content.text("Course contents"),
            Some("Systems of linear equations.")
        );
        assert!(!content.contains_key("Literature"));
        assert!(!content.contains_key("Kurslitteratur"));
        assert!(content.contains_key("Ethical approach"));
        assert_eq!(content.len(), 3);
    }

    #[test]
    fn examiners_map_names_to_profiles() {
        let content = parse_content_block(&page(), &CatalogSelectors::default());

        let Some(FieldValue::Links(examiners)) = content.get(EXAMINER_HEADER) else {
            panic!("examiners missing");
        };
        assert_eq!(
            examiners.get("Ada Lovelace").map(String::as_str),
            Some("https://www.kth.se/profile/ada")
        );
        assert_eq!(examiners.len(), 2);
    }

    #[test]
    fn course_page_adds_name_and_paragraph() {
        let details = parse_course_page(&page(), "SF1624", &CatalogSelectors::default());

        assert_eq!(details.text(ENGLISH_NAME_COLUMN), Some("Linear Algebra"));
        assert_eq!(details.text(PARAGRAPH_COLUMN), Some("Vectors and matrices."));
    }

    #[test]
    fn empty_intro_is_absent() {
        let page = Page::parse(
            "https://www.kth.se/kurs/SF1624",
            r#"<h1 id="page-heading">SF1624 Linear Algebra</h1>
               <div id="courseIntroText"><div class="paragraphs"> </div></div>"#,
        )
        .unwrap();

        let details = parse_course_page(&page, "SF1624", &CatalogSelectors::default());
        assert!(!details.contains_key(PARAGRAPH_COLUMN));
        assert_eq!(details.text(ENGLISH_NAME_COLUMN), Some("Linear Algebra"));
    }
}
