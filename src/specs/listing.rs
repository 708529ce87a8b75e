// src/specs/listing.rs
//! Where the pages live.
//!
//! - Letter listing: `BASE/list/<letter>/` for page 1, `BASE/list/<letter>/<n>/` after.
//! - Word entry:     `BASE/word/<slug>/`.
//! - Page count:     the pager's `<a title="Last …" href="…/list/a/37/">` link.
//!   No pager means the letter fits on one page.

use crate::config::consts::{LAST_PAGE_TITLE, LIST_PATH, WORD_PATH};
use crate::core::html::{attr_value, find_open_tag, opener_end, to_lower};

pub fn letter_page_url(base: &str, letter: char, page: u32) -> String {
    if page <= 1 {
        format!("{base}/{LIST_PATH}/{letter}/")
    } else {
        format!("{base}/{LIST_PATH}/{letter}/{page}/")
    }
}

pub fn word_url(base: &str, word: &str) -> String {
    format!("{base}/{WORD_PATH}/{}/", word_slug(word))
}

/// Lowercase, whitespace runs to `-`.
pub fn word_slug(word: &str) -> String {
    word.split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

/// Number of listing pages announced by the "Last" pager link; 1 if absent or unreadable.
pub fn last_page(doc: &str) -> u32 {
    let lc = to_lower(doc);
    let mut pos = 0usize;
    while let Some(start) = find_open_tag(&lc, "a", pos) {
        let Some(end) = opener_end(doc, start) else { break };
        let opener = &doc[start..end];
        pos = end;

        let is_last = attr_value(opener, "title")
            .is_some_and(|t| t.trim().to_ascii_lowercase().starts_with(LAST_PAGE_TITLE));
        if !is_last {
            continue;
        }
        if let Some(n) = attr_value(opener, "href").and_then(page_from_href) {
            return n.max(1);
        }
    }
    1
}

/// `https://…/list/a/37/` → 37
fn page_from_href(href: &str) -> Option<u32> {
    href.split('/')
        .filter(|seg| !seg.is_empty())
        .next_back()?
        .parse()
        .ok()
}
