//! In-memory page source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{AppError, Result};
use crate::session::PageSource;

/// Serves canned pages; unknown URLs answer 404.
#[derive(Default)]
pub struct StaticSource {
    pages: HashMap<String, String>,
    timeouts: Mutex<HashMap<String, u32>>,
    fetches: Mutex<HashMap<String, usize>>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Drop a canned page so that it answers 404.
    pub fn without_page(mut self, url: &str) -> Self {
        self.pages.remove(url);
        self
    }

    /// Time out the next `count` fetches of `url`.
    pub fn with_timeouts(self, url: &str, count: u32) -> Self {
        self.timeouts
            .lock()
            .unwrap()
            .insert(url.to_string(), count);
        self
    }

    pub fn fetch_count(&self, url: &str) -> usize {
        self.fetches.lock().unwrap().get(url).copied().unwrap_or(0)
    }

    /// Total number of fetches across all URLs.
    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().unwrap().values().sum()
    }
}

#[async_trait]
impl PageSource for StaticSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        *self
            .fetches
            .lock()
            .unwrap()
            .entry(url.to_string())
            .or_insert(0) += 1;

        if let Some(remaining) = self.timeouts.lock().unwrap().get_mut(url) {
            if *remaining > 0 {
                *remaining -= 1;
                return Err(AppError::Timeout {
                    url: url.to_string(),
                });
            }
        }

        self.pages.get(url).cloned().ok_or_else(|| AppError::Status {
            url: url.to_string(),
            status: 404,
        })
    }
}
