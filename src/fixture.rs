//! Static, in-memory image source.
//!
//! Serves a fixed list of images sliced into pages exactly the way the real
//! API pages them. Useful for tests and for running the gallery offline from
//! a saved API response (`--fixture` on the command line).

use crate::{Error, Image, ImageSource, PageResult, Result, SearchRequest};
use async_trait::async_trait;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

/// Canned image source with request bookkeeping
#[derive(Debug, Default)]
pub struct StaticSource {
    images: Vec<Image>,
    total_hits: Option<u64>,
    requests: AtomicUsize,
    fail_next: AtomicBool,
    last_request: Mutex<Option<SearchRequest>>,
}

impl StaticSource {
    /// Every query matches all of `images`; `totalHits` is their count.
    pub fn new(images: Vec<Image>) -> Self {
        Self {
            images,
            ..Default::default()
        }
    }

    /// A source that never has any hits
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Report `total_hits` instead of the number of images held
    pub fn with_total_hits(mut self, total_hits: u64) -> Self {
        self.total_hits = Some(total_hits);
        self
    }

    /// Load a saved API response (`{ totalHits, hits }`) from disk
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let page: PageResult = serde_json::from_str(&raw)?;
        Ok(Self::new(page.hits))
    }

    /// `count` synthetic images with predictable URLs and stats
    pub fn generated(count: usize) -> Self {
        let images = (1..=count as u64)
            .map(|i| Image {
                webformat_url: format!("https://cdn.example.test/{}_640.jpg", i),
                large_image_url: format!("https://cdn.example.test/{}_1280.jpg", i),
                tags: format!("sample, image {}", i),
                likes: i,
                views: i * 10,
                comments: i % 7,
                downloads: i * 3,
            })
            .collect();
        Self::new(images)
    }

    /// Make the next `search` call fail with a network error
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }

    /// Number of `search` calls served so far (failed ones included)
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<SearchRequest> {
        self.last_request.lock().ok().and_then(|g| g.clone())
    }
}

#[async_trait]
impl ImageSource for StaticSource {
    async fn search(&self, request: &SearchRequest) -> Result<PageResult> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_request.lock() {
            *last = Some(request.clone());
        }

        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(Error::Network("simulated transport failure".into()));
        }
        if request.page == 0 || request.per_page == 0 {
            return Err(Error::Http {
                status: 400,
                body: "[ERROR 400] invalid page parameters".into(),
            });
        }

        let per_page = request.per_page as usize;
        let start = (request.page as usize - 1).saturating_mul(per_page);
        let hits = self
            .images
            .iter()
            .skip(start)
            .take(per_page)
            .cloned()
            .collect();

        Ok(PageResult {
            total: self.images.len() as u64,
            total_hits: self.total_hits.unwrap_or(self.images.len() as u64),
            hits,
        })
    }
}
