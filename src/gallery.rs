//! In-process gallery model standing in for the page's DOM.
//!
//! Holds the rendered cards, the "load more" button visibility and the last
//! scroll request, and can write the whole thing out as a standalone page.

use crate::markup::escape;

/// How a scroll request should be animated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// A request to scroll the viewport down by `top` pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub top: u32,
    pub behavior: ScrollBehavior,
}

/// Gallery container plus the "load more" control
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    cards: Vec<String>,
    load_more_visible: bool,
    last_scroll: Option<ScrollRequest>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove every card
    pub fn clear(&mut self) {
        self.cards.clear();
        self.last_scroll = None;
    }

    /// Append rendered cards after the existing ones
    pub fn append<I>(&mut self, cards: I)
    where
        I: IntoIterator<Item = String>,
    {
        self.cards.extend(cards);
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn cards(&self) -> &[String] {
        &self.cards
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn show_load_more(&mut self) {
        self.load_more_visible = true;
    }

    pub fn hide_load_more(&mut self) {
        self.load_more_visible = false;
    }

    pub fn is_load_more_visible(&self) -> bool {
        self.load_more_visible
    }

    pub fn scroll_by(&mut self, request: ScrollRequest) {
        self.last_scroll = Some(request);
    }

    pub fn last_scroll(&self) -> Option<ScrollRequest> {
        self.last_scroll
    }

    /// The gallery's inner markup: all cards concatenated
    pub fn inner_html(&self) -> String {
        self.cards.concat()
    }

    /// A complete page with the search form, the gallery and the
    /// "load more" button (hidden via `visually-hidden` when not shown).
    pub fn to_html(&self, title: &str) -> String {
        let button_class = if self.load_more_visible {
            "load-more"
        } else {
            "load-more visually-hidden"
        };
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<title>{title}</title>
<style>
.gallery {{ display: flex; flex-wrap: wrap; gap: 16px; }}
.photo-card {{ width: 320px; }}
.gallery__image {{ width: 100%; height: 200px; object-fit: cover; }}
.info {{ display: flex; justify-content: space-around; font-size: 12px; }}
.visually-hidden {{ position: absolute; width: 1px; height: 1px; overflow: hidden; clip: rect(0 0 0 0); }}
</style>
</head>
<body>
<form class="search-form" id="search-form">
  <input type="text" name="searchQuery" autocomplete="off" autofocus placeholder="Search images..." />
  <button type="submit">Search</button>
</form>
<div class="gallery">
{cards}
</div>
<button type="button" class="{button_class}">Load more</button>
</body>
</html>
"#,
            title = escape(title),
            cards = self.inner_html(),
            button_class = button_class,
        )
    }
}
