//! HTTP source backed by the Pixabay-compatible search API.
//!
//! One `search` call is one GET. The response body is decoded as
//! `{ total, totalHits, hits }`; a non-success status is reported as
//! `Error::Http` with the body text the API sent back. Errors never include
//! the request URL since it carries the API key.

use crate::{Error, ImageSource, PageResult, Result, SearchConfig, SearchRequest};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Search source that talks to the real endpoint.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    config: SearchConfig,
    endpoint: Url,
}

impl HttpSource {
    pub fn new(config: SearchConfig) -> Result<Self> {
        config.validate()?;

        let endpoint = Url::parse(&config.endpoint).map_err(|e| {
            Error::ConfigError(format!("Invalid endpoint {:?}: {}", config.endpoint, e))
        })?;

        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| Error::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            endpoint,
        })
    }

    /// The full request URL for one page, API key included.
    pub fn request_url(&self, request: &SearchRequest) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("key", &self.config.api_key)
            .append_pair("q", &request.query)
            .append_pair("image_type", &self.config.image_type)
            .append_pair("orientation", &self.config.orientation)
            .append_pair("safesearch", if self.config.safe_search { "true" } else { "false" })
            .append_pair("page", &request.page.to_string())
            .append_pair("per_page", &request.per_page.to_string());
        url
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[async_trait]
impl ImageSource for HttpSource {
    async fn search(&self, request: &SearchRequest) -> Result<PageResult> {
        log::debug!(
            "GET {} q={:?} page={} per_page={}",
            self.endpoint,
            request.query,
            request.page,
            request.per_page
        );

        let resp = self
            .client
            .get(self.request_url(request))
            .send()
            .await
            .map_err(|e| {
                Error::Network(format!(
                    "Failed to fetch page {}: {}",
                    request.page,
                    e.without_url()
                ))
            })?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::Network(format!("Failed to read response body: {}", e.without_url())))?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        let page: PageResult = serde_json::from_str(&body)?;
        log::debug!(
            "page {} returned {} hits (totalHits={})",
            request.page,
            page.hits.len(),
            page.total_hits
        );
        Ok(page)
    }
}
