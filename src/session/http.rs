// src/session/http.rs

//! Page source backed by a `reqwest` client.

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{AppError, Result};
use crate::models::BrowserConfig;
use crate::session::PageSource;
use crate::utils::http::create_client;

/// Fetches pages over HTTP.
pub struct HttpSource {
    client: Client,
}

impl HttpSource {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a source with a client configured from `config`.
    pub fn from_config(config: &BrowserConfig) -> Result<Self> {
        Ok(Self::new(create_client(config)?))
    }
}

#[async_trait]
impl PageSource for HttpSource {
    async fn fetch(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout {
                    url: url.to_string(),
                }
            } else {
                AppError::Http(e)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text().await?)
    }
}
