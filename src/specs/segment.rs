// src/specs/segment.rs
//! Splits a page into entry blocks.
//!
//! Boundaries are `<div>` openers carrying the entry class (`word-group` on the
//! listing and word pages). Each block runs to its balanced `</div>`; broken
//! markup runs to the next boundary instead. Any non-empty page with no boundary
//! at all, whitespace-only included, comes back as a single block so callers
//! always get *something* to classify. Only an empty page yields nothing.

use crate::core::html::{find_class_block, to_lower};
use crate::data::{EntryBlock, RawPage};

/// Lazy block iterator. Calling [`segment`] again on the same page yields the same blocks.
pub struct Segments<'a> {
    html: &'a str,
    lc: String,
    class: String,
    pos: usize,
    index: usize,
    done: bool,
}

pub fn segment<'a>(page: &'a RawPage, entry_class: &str) -> Segments<'a> {
    let html = page.html();
    Segments {
        html,
        lc: to_lower(html),
        class: s!(entry_class),
        pos: 0,
        index: 0,
        done: page.is_empty(),
    }
}

impl<'a> Segments<'a> {
    fn emit(&mut self, start: usize, end: usize) -> EntryBlock<'a> {
        let block = EntryBlock { raw: &self.html[start..end], position: self.index };
        self.index += 1;
        block
    }
}

impl<'a> Iterator for Segments<'a> {
    type Item = EntryBlock<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match find_class_block(self.html, &self.lc, "div", &self.class, self.pos) {
            Some((start, end)) => {
                // Unbalanced block: cut at the next boundary instead of swallowing the page.
                let end = match find_class_block(self.html, &self.lc, "div", &self.class, start + 1) {
                    Some((next, _)) if next < end => next,
                    _ => end,
                };
                self.pos = end;
                Some(self.emit(start, end))
            }
            None => {
                self.done = true;
                if self.index == 0 {
                    let len = self.html.len();
                    Some(self.emit(0, len))
                } else {
                    None
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <div class="word-group">
          <div class="word"><a href="/word/yakap/"><h2 class="word-entry">yakap</h2></a></div>
          <div class="definition"><p>n. embrace; hug</p></div>
        </div>
        <div class="word-group">
          <div class="word"><a href="/word/yakapin/"><h2 class="word-entry">yakapin</h2></a></div>
          <div class="definition"><p>v. to embrace</p></div>
        </div>
        <div class="footer">Copyright</div>
        </body></html>
    "#;

    #[test]
    fn splits_on_word_groups() {
        let page = RawPage::new("u", PAGE);
        let blocks: Vec<_> = segment(&page, "word-group").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].raw.contains("yakap"));
        assert!(!blocks[0].raw.contains("yakapin"));
        assert!(blocks[1].raw.contains("yakapin"));
        assert!(!blocks[1].raw.contains("Copyright"));
        assert_eq!(blocks[1].position, 1);
    }

    #[test]
    fn restartable() {
        let page = RawPage::new("u", PAGE);
        let a: Vec<_> = segment(&page, "word-group").collect();
        let b: Vec<_> = segment(&page, "word-group").collect();
        assert_eq!(a, b);
    }

    #[test]
    fn no_boundary_yields_whole_page() {
        let html = "<p>yakapin (v.) something fig.</p>";
        let page = RawPage::new("u", html);
        let blocks: Vec<_> = segment(&page, "word-group").collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].raw, html);
        assert_eq!(blocks[0].position, 0);
    }

    #[test]
    fn whitespace_page_is_one_block() {
        let page = RawPage::new("u", "  \n ");
        let blocks: Vec<_> = segment(&page, "word-group").collect();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].raw, "  \n ");
    }

    #[test]
    fn empty_page_yields_nothing() {
        let page = RawPage::new("u", "");
        assert_eq!(segment(&page, "word-group").count(), 0);
    }

    #[test]
    fn unbalanced_block_stops_at_next_boundary() {
        let html = r#"<div class="word-group"><div>a</div><div class="word-group"><p>b</p></div>"#;
        let page = RawPage::new("u", html);
        let blocks: Vec<_> = segment(&page, "word-group").collect();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].raw, r#"<div class="word-group"><div>a</div>"#);
        assert!(blocks[1].raw.contains("<p>b</p>"));
    }
}
