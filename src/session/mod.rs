//! Page navigation session.
//!
//! A [`Navigator`] is the single, explicit browsing session the extractors
//! share. It fetches pages through a [`PageSource`], keeps the current page,
//! and retries transient load failures a bounded number of times.

#[cfg(test)]
pub(crate) mod fixture;
mod http;
mod page;

use std::time::Duration;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::models::BrowserConfig;
use crate::utils::with_query_param;

pub use http::HttpSource;
pub use page::Page;

/// Something that can fetch the HTML body behind a URL.
#[async_trait]
pub trait PageSource: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// How often and how patiently a page load is retried.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Fixed sleep between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &BrowserConfig) -> Self {
        Self {
            max_attempts: config.max_attempts.max(1),
            backoff: config.retry_backoff(),
        }
    }
}

/// Sequential browsing session over a page source.
pub struct Navigator<S> {
    source: S,
    policy: RetryPolicy,
    current: Option<Page>,
}

impl<S: PageSource> Navigator<S> {
    pub fn new(source: S, policy: RetryPolicy) -> Self {
        Self {
            source,
            policy,
            current: None,
        }
    }

    /// Load `url` as the current page, retrying transient failures.
    pub async fn load(&mut self, url: &str) -> Result<&Page> {
        let mut attempt = 0;
        let body = loop {
            attempt += 1;
            match self.source.fetch(url).await {
                Ok(body) => break body,
                Err(e) if e.is_transient() && attempt < self.policy.max_attempts => {
                    log::warn!(
                        "Load of {} failed (attempt {}/{}): {}. Retrying in {:?}",
                        url,
                        attempt,
                        self.policy.max_attempts,
                        e,
                        self.policy.backoff
                    );
                    tokio::time::sleep(self.policy.backoff).await;
                }
                Err(e) if e.is_transient() => {
                    log::error!("Giving up on {} after {} attempts: {}", url, attempt, e);
                    return Err(AppError::PageLoad {
                        url: url.to_string(),
                        attempts: attempt,
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        };

        log::debug!("Loaded {}", url);
        let page = Page::parse(url, &body)?;
        Ok(&*self.current.insert(page))
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The page loaded last.
    pub fn page(&self) -> Result<&Page> {
        self.current.as_ref().ok_or(AppError::NoPage)
    }

    /// Reload the current page with `param=value` set, as picking a dropdown option would.
    pub async fn select_option(&mut self, param: &str, value: &str) -> Result<&Page> {
        let url = with_query_param(self.page()?.url().as_str(), param, value)?;
        self.load(&url).await
    }

    /// Pause between requests to pace the crawl.
    ///
    /// The page is fully parsed once `load` returns; this only spaces out
    /// requests to the catalog server.
    pub async fn settle(&self, delay: Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixture::StaticSource;
    use super::*;

    fn policy(max_attempts: u32) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            backoff: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn load_sets_current_page() {
        let source = StaticSource::new().with_page("https://kth.test/a", "<h1 id='x'>A</h1>");
        let mut nav = Navigator::new(source, policy(3));

        assert!(matches!(nav.page(), Err(AppError::NoPage)));
        nav.load("https://kth.test/a").await.unwrap();
        assert!(nav.page().unwrap().find_id("x").is_ok());
    }

    #[tokio::test]
    async fn load_retries_transient_failures() {
        let source = StaticSource::new()
            .with_page("https://kth.test/a", "<p>ok</p>")
            .with_timeouts("https://kth.test/a", 2);
        let mut nav = Navigator::new(source, policy(3));

        assert!(nav.load("https://kth.test/a").await.is_ok());
        assert_eq!(nav.source.fetch_count("https://kth.test/a"), 3);
    }

    #[tokio::test]
    async fn load_gives_up_after_max_attempts() {
        let source = StaticSource::new()
            .with_page("https://kth.test/a", "<p>ok</p>")
            .with_timeouts("https://kth.test/a", 10);
        let mut nav = Navigator::new(source, policy(3));

        let err = nav.load("https://kth.test/a").await.unwrap_err();
        assert!(matches!(err, AppError::PageLoad { attempts: 3, .. }));
        assert_eq!(nav.source.fetch_count("https://kth.test/a"), 3);
    }

    #[tokio::test]
    async fn load_does_not_retry_missing_pages() {
        let mut nav = Navigator::new(StaticSource::new(), policy(3));

        let err = nav.load("https://kth.test/missing").await.unwrap_err();
        assert!(matches!(err, AppError::Status { status: 404, .. }));
        assert_eq!(nav.source.fetch_count("https://kth.test/missing"), 1);
    }

    #[tokio::test]
    async fn select_option_reloads_with_query() {
        let source = StaticSource::new()
            .with_page("https://kth.test/kurs/SF1624?l=en", "<p>base</p>")
            .with_page("https://kth.test/kurs/SF1624?l=en&startterm=20232", "<p id='s'>HT23</p>");
        let mut nav = Navigator::new(source, policy(1));

        nav.load("https://kth.test/kurs/SF1624?l=en").await.unwrap();
        let page = nav.select_option("startterm", "20232").await.unwrap();
        assert!(page.find_id("s").is_ok());
    }
}
