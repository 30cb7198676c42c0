// src/session/page.rs

//! A loaded page and its structural queries.

use scraper::{ElementRef, Html};
use url::Url;

use crate::error::{AppError, Result};
use crate::utils::html::parse_selector;

/// The document currently held by a session.
#[derive(Debug)]
pub struct Page {
    url: Url,
    document: Html,
}

impl Page {
    /// Parse a page body fetched from `url`.
    pub fn parse(url: &str, body: &str) -> Result<Self> {
        Ok(Self {
            url: Url::parse(url)?,
            document: Html::parse_document(body),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// First element matching `css`, or `NotFound`.
    pub fn find(&self, css: &str) -> Result<ElementRef<'_>> {
        let selector = parse_selector(css)?;
        self.document
            .select(&selector)
            .next()
            .ok_or_else(|| AppError::not_found(css))
    }

    /// Element with the given id, or `NotFound`.
    pub fn find_id(&self, id: &str) -> Result<ElementRef<'_>> {
        self.find(&format!("#{id}"))
    }

    /// Every element matching `css`; empty when nothing matches.
    pub fn find_all(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        let selector = parse_selector(css)?;
        Ok(self.document.select(&selector).collect())
    }
}
