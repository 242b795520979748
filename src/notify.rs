//! User-facing notices (the page's transient toasts)

use std::sync::Mutex;

pub const EMPTY_QUERY_MESSAGE: &str = "Search input is empty";
pub const NO_RESULTS_MESSAGE: &str =
    "Sorry, there are no images matching your search query. Please try again.";
pub const END_OF_RESULTS_MESSAGE: &str =
    "We're sorry, but you've reached the end of search results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Failure,
}

/// A single notice shown to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Failure,
            message: message.into(),
        }
    }

    pub fn empty_query() -> Self {
        Self::info(EMPTY_QUERY_MESSAGE)
    }

    pub fn found(total_hits: u64) -> Self {
        Self::info(format!("Hooray! We found {} images.", total_hits))
    }

    pub fn no_results() -> Self {
        Self::failure(NO_RESULTS_MESSAGE)
    }

    pub fn end_of_results() -> Self {
        Self::info(END_OF_RESULTS_MESSAGE)
    }
}

/// Sink for notices
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Routes notices to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Info => log::info!("{}", notice.message),
            NoticeLevel::Failure => log::warn!("{}", notice.message),
        }
    }
}

/// Keeps every notice in order so it can be inspected later
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices.lock().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices.lock().ok().and_then(|g| g.last().cloned())
    }

    pub fn clear(&self) {
        if let Ok(mut g) = self.notices.lock() {
            g.clear();
        }
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        log::debug!("notice ({:?}): {}", notice.level, notice.message);
        if let Ok(mut g) = self.notices.lock() {
            g.push(notice);
        }
    }
}

impl<N: Notifier + ?Sized> Notifier for std::sync::Arc<N> {
    fn notify(&self, notice: Notice) {
        (**self).notify(notice)
    }
}
