use crate::controller::{ControllerState, Outcome, PageController};
use crate::notify::Notifier;
use crate::{Error, ImageSource, Result, SearchConfig};
use std::sync::Arc;
use tokio::sync::Mutex;

/// A cloneable handle to one gallery page view.
///
/// Every clone drives the same controller. Submit and load-more acquire the
/// controller without waiting: while one action is waiting on the network any
/// other action fails fast with [`Error::Busy`] and sends no request, so at
/// most one fetch per gallery is ever in flight.
pub struct GallerySession<S, N> {
    inner: Arc<Mutex<PageController<S, N>>>,
}

impl<S, N> Clone for GallerySession<S, N> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

/// Point-in-time view of a gallery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GallerySnapshot {
    pub query: String,
    pub state: ControllerState,
    pub cards: usize,
    pub load_more_visible: bool,
    pub hits_seen: u64,
    pub total_hits: Option<u64>,
}

impl<S: ImageSource, N: Notifier> GallerySession<S, N> {
    pub fn new(source: S, notifier: N, config: &SearchConfig) -> Self {
        Self::from_controller(PageController::new(source, notifier, config))
    }

    pub fn from_controller(controller: PageController<S, N>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Submit a search; fails with `Error::Busy` if another action is in flight
    pub async fn submit(&self, raw_query: &str) -> Result<Outcome> {
        let mut controller = self.inner.try_lock().map_err(|_| {
            log::warn!("submit rejected: a request is already in flight");
            Error::Busy
        })?;
        controller.submit(raw_query).await
    }

    /// Load the next page; fails with `Error::Busy` if another action is in flight
    pub async fn load_more(&self) -> Result<Outcome> {
        let mut controller = self.inner.try_lock().map_err(|_| {
            log::warn!("load more rejected: a request is already in flight");
            Error::Busy
        })?;
        controller.load_more().await
    }

    /// Wait for any in-flight action and describe the gallery
    pub async fn snapshot(&self) -> GallerySnapshot {
        let controller = self.inner.lock().await;
        GallerySnapshot {
            query: controller.client().query().to_string(),
            state: controller.state(),
            cards: controller.gallery().card_count(),
            load_more_visible: controller.gallery().is_load_more_visible(),
            hits_seen: controller.client().hits_seen(),
            total_hits: controller.client().total_hits(),
        }
    }

    /// Wait for any in-flight action and render the page as standalone HTML
    pub async fn render_page(&self) -> String {
        let controller = self.inner.lock().await;
        let query = controller.client().query();
        let title = if query.is_empty() {
            "Image search".to_string()
        } else {
            format!("{} - Image search", query)
        };
        controller.gallery().to_html(&title)
    }

    /// Run `f` against the controller once no action is in flight
    pub async fn with_controller<R>(&self, f: impl FnOnce(&PageController<S, N>) -> R) -> R {
        let controller = self.inner.lock().await;
        f(&controller)
    }
}
