//! pixgallery
//!
//! A paginated image search gallery. A query is submitted, the first page of
//! results is fetched from a Pixabay-compatible search API and rendered as
//! photo cards; a "load more" control appends further pages until the result
//! set is exhausted.
//!
//! # Features
//!
//! - **HTTP source** (default, `http`): talks to the real search endpoint via `reqwest`
//! - **Static source**: canned pages with the same pagination, for tests and offline runs
//! - **Session handle**: a cloneable handle with an in-flight guard so only one
//!   request per gallery is ever outstanding
//!
//! # Example
//!
//! ```no_run
//! use pixgallery::{GallerySession, LogNotifier, SearchConfig};
//!
//! # async fn run() -> pixgallery::Result<()> {
//! let config = SearchConfig {
//!     api_key: "your-key".to_string(),
//!     ..Default::default()
//! };
//! let source = pixgallery::new_source(&config)?;
//! let session = GallerySession::new(source, LogNotifier, &config);
//!
//! session.submit("cats").await?;
//! while session.snapshot().await.load_more_visible {
//!     session.load_more().await?;
//! }
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod error;
pub use error::{Error, Result};

pub mod client;
pub mod config;
pub mod controller;
pub mod fixture;
pub mod gallery;
pub mod markup;
pub mod notify;
pub mod session;

// Real search API backend
#[cfg(feature = "http")]
pub mod http;

pub use client::SearchClient;
pub use controller::{ControllerState, Outcome, PageController};
pub use fixture::StaticSource;
pub use gallery::{Gallery, ScrollBehavior, ScrollRequest};
pub use notify::{LogNotifier, Notice, NoticeLevel, Notifier, RecordingNotifier};
pub use session::{GallerySession, GallerySnapshot};

#[cfg(feature = "http")]
pub use http::HttpSource;

/// Default Pixabay search endpoint
pub const DEFAULT_ENDPOINT: &str = "https://pixabay.com/api/";

/// Configuration for searching and rendering a gallery
///
/// The defaults mirror what the gallery page has always used: 40 horizontal
/// photos per page with safe search on. `api_key` is empty by default and
/// must be supplied (see [`config::from_env`]).
///
/// # Examples
///
/// ```
/// let cfg = pixgallery::SearchConfig::default();
/// assert_eq!(cfg.per_page, 40);
/// assert!(cfg.safe_search);
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the search endpoint
    pub endpoint: String,
    /// API key sent as the `key` parameter
    pub api_key: String,
    /// Page size sent as `per_page`
    pub per_page: u32,
    /// `image_type` filter (photo, illustration, vector, all)
    pub image_type: String,
    /// `orientation` filter (horizontal, vertical, all)
    pub orientation: String,
    /// Whether to request safe-search results only
    pub safe_search: bool,
    /// User agent string to send with requests
    pub user_agent: String,
    /// Timeout for a single search request in milliseconds
    pub timeout_ms: u64,
    /// Height of one rendered card; "load more" scrolls by two of them
    pub card_height_px: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: String::new(),
            per_page: 40,
            image_type: "photo".to_string(),
            orientation: "horizontal".to_string(),
            safe_search: true,
            user_agent: concat!("pixgallery/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout_ms: 30000,
            card_height_px: 260,
        }
    }
}

impl SearchConfig {
    /// Smallest page size the API accepts
    pub const MIN_PER_PAGE: u32 = 3;
    /// Largest page size the API accepts
    pub const MAX_PER_PAGE: u32 = 200;

    /// Check the values the API would reject before any request is sent.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::ConfigError("endpoint must not be empty".into()));
        }
        if !(Self::MIN_PER_PAGE..=Self::MAX_PER_PAGE).contains(&self.per_page) {
            return Err(Error::ConfigError(format!(
                "per_page must be between {} and {}, got {}",
                Self::MIN_PER_PAGE,
                Self::MAX_PER_PAGE,
                self.per_page
            )));
        }
        if self.timeout_ms == 0 {
            return Err(Error::ConfigError("timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

/// One image record ("hit") as returned by the search API
///
/// Field names follow the API's JSON; anything else the API sends is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Medium-sized preview used as the card thumbnail
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    /// Full-size image the card links to
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    /// Comma separated tags, used as alt text
    #[serde(default)]
    pub tags: String,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub downloads: u64,
}

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageResult {
    /// Total number of matches the API knows about
    #[serde(default)]
    pub total: u64,
    /// Number of hits reachable through paging
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
    /// Hits on this page, in API order
    #[serde(default)]
    pub hits: Vec<Image>,
}

/// Parameters of a single page request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub page: u32,
    pub per_page: u32,
}

/// Backend that answers page requests
///
/// Implementations perform exactly one request per `search` call and never
/// retry; the caller decides what to do with a failure.
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch one page of results
    async fn search(&self, request: &SearchRequest) -> Result<PageResult>;
}

#[async_trait]
impl<S: ImageSource + ?Sized> ImageSource for std::sync::Arc<S> {
    async fn search(&self, request: &SearchRequest) -> Result<PageResult> {
        (**self).search(request).await
    }
}

/// Create the default search source for the given configuration
///
/// This is the HTTP source talking to `config.endpoint`.
#[cfg(feature = "http")]
pub fn new_source(config: &SearchConfig) -> Result<HttpSource> {
    HttpSource::new(config.clone())
}
