//! Page controller: wires search submissions and "load more" clicks to the
//! query client, renders the hits into the gallery and decides when the
//! result set is exhausted.

use crate::client::SearchClient;
use crate::gallery::{Gallery, ScrollBehavior, ScrollRequest};
use crate::markup::render_card;
use crate::notify::{Notice, Notifier};
use crate::{ImageSource, Result, SearchConfig};

/// User-visible state of the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No results shown, "load more" hidden
    IdleEmpty,
    /// Results shown; "load more" visible iff more pages remain
    ShowingResults,
}

/// What a submit or load-more did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Blank query: nothing sent, nothing changed
    Rejected,
    /// "load more" is not available right now: nothing sent
    Ignored,
    /// The search came back without any hits
    NoResults,
    /// Hits were rendered into the gallery
    Rendered {
        added: usize,
        total_rendered: usize,
        more: bool,
    },
}

pub struct PageController<S, N> {
    client: SearchClient<S>,
    gallery: Gallery,
    notifier: N,
    state: ControllerState,
    card_height_px: u32,
}

impl<S: ImageSource, N: Notifier> PageController<S, N> {
    pub fn new(source: S, notifier: N, config: &SearchConfig) -> Self {
        Self {
            client: SearchClient::new(source, config.per_page),
            gallery: Gallery::new(),
            notifier,
            state: ControllerState::IdleEmpty,
            card_height_px: config.card_height_px,
        }
    }

    /// Handle a search form submission.
    ///
    /// A blank query only raises a notice; the current results stay as they
    /// are. Otherwise the gallery is cleared and the first page fetched.
    pub async fn submit(&mut self, raw_query: &str) -> Result<Outcome> {
        let query = raw_query.trim();
        if query.is_empty() {
            self.notifier.notify(Notice::empty_query());
            return Ok(Outcome::Rejected);
        }

        self.client.set_query(query);
        self.client.reset_page_counter();
        self.client.reset_hits();
        self.gallery.clear();
        self.gallery.hide_load_more();
        self.state = ControllerState::IdleEmpty;

        let page = self.client.fetch_page().await.map_err(|e| {
            log::error!("search for {:?} failed: {}", query, e);
            e
        })?;
        self.client.add_hits(page.hits.len());

        if page.hits.is_empty() {
            self.notifier.notify(Notice::no_results());
            return Ok(Outcome::NoResults);
        }

        self.notifier.notify(Notice::found(page.total_hits));
        self.gallery.append(page.hits.iter().map(render_card));
        self.state = ControllerState::ShowingResults;

        let more = !self.client.is_exhausted();
        if more {
            self.gallery.show_load_more();
        }

        log::info!(
            "rendered {} of {} hits for {:?}",
            page.hits.len(),
            page.total_hits,
            query
        );

        Ok(Outcome::Rendered {
            added: page.hits.len(),
            total_rendered: self.gallery.card_count(),
            more,
        })
    }

    /// Handle a "load more" click.
    ///
    /// Only acts while results are shown and the button is visible. A failed
    /// fetch leaves everything as it was so the click can be repeated.
    pub async fn load_more(&mut self) -> Result<Outcome> {
        if self.state != ControllerState::ShowingResults || !self.gallery.is_load_more_visible() {
            log::debug!("load more ignored: no further pages available");
            return Ok(Outcome::Ignored);
        }

        let fetched = self.client.fetch_page().await;
        let page = fetched.map_err(|e| {
            log::error!(
                "loading page {} for {:?} failed: {}",
                self.client.page(),
                self.client.query(),
                e
            );
            e
        })?;
        self.client.add_hits(page.hits.len());

        if !page.hits.is_empty() {
            self.gallery.append(page.hits.iter().map(render_card));
            self.gallery.scroll_by(ScrollRequest {
                top: self.card_height_px.saturating_mul(2),
                behavior: ScrollBehavior::Smooth,
            });
        }

        // An empty page means the API has nothing more even if totalHits says otherwise
        let more = !(self.client.is_exhausted() || page.hits.is_empty());
        if !more {
            self.notifier.notify(Notice::end_of_results());
            self.gallery.hide_load_more();
        }

        log::info!(
            "appended {} hits ({} of {} seen)",
            page.hits.len(),
            self.client.hits_seen(),
            page.total_hits
        );

        Ok(Outcome::Rendered {
            added: page.hits.len(),
            total_rendered: self.gallery.card_count(),
            more,
        })
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn client(&self) -> &SearchClient<S> {
        &self.client
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
