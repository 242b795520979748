//! Query client: the pagination state of one search.
//!
//! Holds the active search term, the page cursor and the running count of
//! hits seen so far. Each `fetch_page` issues exactly one request through the
//! underlying [`ImageSource`]; nothing is retried or cached here.

use crate::{Error, ImageSource, PageResult, Result, SearchRequest};

pub struct SearchClient<S> {
    source: S,
    query: String,
    page: u32,
    per_page: u32,
    hits_seen: u64,
    total_hits: Option<u64>,
}

impl<S: ImageSource> SearchClient<S> {
    pub fn new(source: S, per_page: u32) -> Self {
        Self {
            source,
            query: String::new(),
            page: 1,
            per_page,
            hits_seen: 0,
            total_hits: None,
        }
    }

    /// Set the active search term (stored trimmed)
    pub fn set_query(&mut self, text: &str) {
        self.query = text.trim().to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Move the cursor back to the first page
    pub fn reset_page_counter(&mut self) {
        self.page = 1;
    }

    /// Forget the hits counted so far and the last known total
    pub fn reset_hits(&mut self) {
        self.hits_seen = 0;
        self.total_hits = None;
    }

    /// Fetch the page under the cursor.
    ///
    /// On success the cursor advances by one and `totalHits` is remembered.
    /// On failure the cursor stays put so the same page can be requested
    /// again. Hits are not counted here; see [`SearchClient::add_hits`].
    pub async fn fetch_page(&mut self) -> Result<PageResult> {
        if self.query.is_empty() {
            return Err(Error::EmptyQuery);
        }

        let request = SearchRequest {
            query: self.query.clone(),
            page: self.page,
            per_page: self.per_page,
        };
        let result = self.source.search(&request).await?;

        self.page += 1;
        self.total_hits = Some(result.total_hits);
        Ok(result)
    }

    /// Count `n` more hits as seen
    pub fn add_hits(&mut self, n: usize) {
        self.hits_seen += n as u64;
    }

    pub fn hits_seen(&self) -> u64 {
        self.hits_seen
    }

    /// `totalHits` from the most recent successful fetch of this search
    pub fn total_hits(&self) -> Option<u64> {
        self.total_hits
    }

    /// Hits still reachable by paging further
    pub fn remaining(&self) -> u64 {
        self.total_hits
            .map(|t| t.saturating_sub(self.hits_seen))
            .unwrap_or(0)
    }

    /// Whether every reachable hit has been seen
    pub fn is_exhausted(&self) -> bool {
        matches!(self.total_hits, Some(t) if self.hits_seen >= t)
    }

    /// The page the next `fetch_page` will request
    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
