//! Application configuration structures.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::CatalogSelectors;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP session and pacing settings
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Catalog URLs and department list
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Page structure the extractors rely on
    #[serde(default)]
    pub selectors: CatalogSelectors,

    /// Output file settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.browser.user_agent.trim().is_empty() {
            return Err(AppError::validation("browser.user_agent is empty"));
        }
        if self.browser.timeout_secs == 0 {
            return Err(AppError::validation("browser.timeout_secs must be > 0"));
        }
        if self.browser.max_attempts == 0 {
            return Err(AppError::validation("browser.max_attempts must be > 0"));
        }
        if self.catalog.departments.is_empty() {
            return Err(AppError::validation("No departments defined"));
        }
        if self.catalog.debug_record_limit == 0 {
            return Err(AppError::validation(
                "catalog.debug_record_limit must be > 0",
            ));
        }
        for endpoint in [&self.catalog.header_url, &self.catalog.search_url] {
            url::Url::parse(endpoint)?;
        }
        if self.output.courses_file == self.output.offerings_file {
            return Err(AppError::validation(
                "output.courses_file and output.offerings_file must differ",
            ));
        }
        Ok(())
    }
}

/// HTTP session and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause after loading a department listing
    #[serde(default = "defaults::listing_delay")]
    pub listing_delay_ms: u64,

    /// Pause after loading a course page or switching semester
    #[serde(default = "defaults::page_delay")]
    pub page_delay_ms: u64,

    /// Attempts per page before giving up
    #[serde(default = "defaults::max_attempts")]
    pub max_attempts: u32,

    /// Sleep between attempts in milliseconds
    #[serde(default = "defaults::retry_backoff")]
    pub retry_backoff_ms: u64,
}

impl BrowserConfig {
    pub fn listing_delay(&self) -> Duration {
        Duration::from_millis(self.listing_delay_ms)
    }

    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            listing_delay_ms: defaults::listing_delay(),
            page_delay_ms: defaults::page_delay(),
            max_attempts: defaults::max_attempts(),
            retry_backoff_ms: defaults::retry_backoff(),
        }
    }
}

/// Catalog endpoints and traversal settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Search page whose table header names the listing columns
    #[serde(default = "defaults::header_url")]
    pub header_url: String,

    /// Course search page, filtered per department
    #[serde(default = "defaults::search_url")]
    pub search_url: String,

    /// Query parameter selecting a department
    #[serde(default = "defaults::department_param")]
    pub department_param: String,

    /// Department codes, scraped in this order
    #[serde(default = "defaults::departments")]
    pub departments: Vec<String>,

    /// Query parameter selecting the page language
    #[serde(default = "defaults::language_param")]
    pub language_param: String,

    /// Language requested for course pages
    #[serde(default = "defaults::language")]
    pub language: String,

    /// Query parameter selecting a semester on a course page
    #[serde(default = "defaults::semester_param")]
    pub semester_param: String,

    /// Prefix for the synthesized course web URL
    #[serde(default = "defaults::course_web_base")]
    pub course_web_base: String,

    /// Listing size cap in debug mode
    #[serde(default = "defaults::debug_record_limit")]
    pub debug_record_limit: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            header_url: defaults::header_url(),
            search_url: defaults::search_url(),
            department_param: defaults::department_param(),
            departments: defaults::departments(),
            language_param: defaults::language_param(),
            language: defaults::language(),
            semester_param: defaults::semester_param(),
            course_web_base: defaults::course_web_base(),
            debug_record_limit: defaults::debug_record_limit(),
        }
    }
}

/// Output file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory the tables are written to
    #[serde(default = "defaults::output_dir")]
    pub dir: String,

    #[serde(default = "defaults::courses_file")]
    pub courses_file: String,

    #[serde(default = "defaults::offerings_file")]
    pub offerings_file: String,

    /// File name prefix used in debug mode
    #[serde(default = "defaults::debug_prefix")]
    pub debug_prefix: String,
}

impl OutputConfig {
    /// Courses file name, prefixed in debug mode.
    pub fn courses_name(&self, debug: bool) -> String {
        self.prefixed(&self.courses_file, debug)
    }

    /// Offerings file name, prefixed in debug mode.
    pub fn offerings_name(&self, debug: bool) -> String {
        self.prefixed(&self.offerings_file, debug)
    }

    fn prefixed(&self, name: &str, debug: bool) -> String {
        if debug {
            format!("{}{}", self.debug_prefix, name)
        } else {
            name.to_string()
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: defaults::output_dir(),
            courses_file: defaults::courses_file(),
            offerings_file: defaults::offerings_file(),
            debug_prefix: defaults::debug_prefix(),
        }
    }
}

mod defaults {
    // Browser defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; course-catalog/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn listing_delay() -> u64 {
        1000
    }
    pub fn page_delay() -> u64 {
        500
    }
    pub fn max_attempts() -> u32 {
        5
    }
    pub fn retry_backoff() -> u64 {
        5000
    }

    // Catalog defaults
    pub fn header_url() -> String {
        "https://www.kth.se/student/kurser/sokkurs?eduLevel=0".into()
    }
    pub fn search_url() -> String {
        "https://www.kth.se/student/kurser/sokkurs".into()
    }
    pub fn department_param() -> String {
        "department".into()
    }
    pub fn departments() -> Vec<String> {
        ["A", "C", "E", "H", "J", "K", "M", "S", "U"]
            .into_iter()
            .map(String::from)
            .collect()
    }
    pub fn language_param() -> String {
        "l".into()
    }
    pub fn language() -> String {
        "en".into()
    }
    pub fn semester_param() -> String {
        "startterm".into()
    }
    pub fn course_web_base() -> String {
        "https://www.kth.se/social/course/".into()
    }
    pub fn debug_record_limit() -> usize {
        5
    }

    // Output defaults
    pub fn output_dir() -> String {
        ".".into()
    }
    pub fn courses_file() -> String {
        "kth_courses.csv".into()
    }
    pub fn offerings_file() -> String {
        "kth_offerings.csv".into()
    }
    pub fn debug_prefix() -> String {
        "debug_".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.browser.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_attempts() {
        let mut config = Config::default();
        config.browser.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_departments() {
        let mut config = Config::default();
        config.catalog.departments.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [browser]
            max_attempts = 2

            [catalog]
            departments = ["S"]
            "#,
        )
        .unwrap();

        assert_eq!(config.browser.max_attempts, 2);
        assert_eq!(config.browser.page_delay_ms, 500);
        assert_eq!(config.catalog.departments, vec!["S".to_string()]);
        assert_eq!(config.selectors.group_end_class, "t4");
    }

    #[test]
    fn debug_prefix_applies_only_in_debug() {
        let output = OutputConfig::default();
        assert_eq!(output.courses_name(false), "kth_courses.csv");
        assert_eq!(output.offerings_name(true), "debug_kth_offerings.csv");
    }
}
