//! Photo card markup, one fixed-shape fragment per image.
//!
//! The link carries the `gallery__link` class so a lightbox script can
//! attach to `.gallery a`.

use crate::Image;
use std::fmt::Write;

/// Render one photo card
pub fn render_card(image: &Image) -> String {
    let mut out = String::with_capacity(512);
    write_card(&mut out, image);
    out
}

/// Render all cards in order, concatenated
pub fn render_cards(images: &[Image]) -> String {
    let mut out = String::with_capacity(images.len() * 512);
    for image in images {
        write_card(&mut out, image);
    }
    out
}

fn write_card(out: &mut String, image: &Image) {
    // Writing into a String cannot fail
    let _ = write!(
        out,
        r#"<div class="photo-card">
  <a href="{large}" class="gallery__link"><img class="gallery__image" src="{small}" alt="{alt}" loading="lazy" /></a>
  <div class="info">
"#,
        large = escape(&image.large_image_url),
        small = escape(&image.webformat_url),
        alt = escape(&image.tags),
    );
    for (label, value) in [
        ("Likes", image.likes),
        ("Views", image.views),
        ("Comments", image.comments),
        ("Downloads", image.downloads),
    ] {
        let _ = write!(
            out,
            "    <p class=\"info-item\">\n      <b>{}: {}</b>\n    </p>\n",
            label, value
        );
    }
    out.push_str("  </div>\n</div>");
}

/// Escape text for use in HTML attribute values and element content.
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
