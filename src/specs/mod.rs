// src/specs/mod.rs
//! # Scraping "specs" module
//!
//! Everything that knows **how to read the dictionary's pages** lives here, one
//! stage per file:
//!
//! - `listing`   – URLs for letter listings and word pages; pager ("Last") parsing.
//! - `segment`   – cut a page into one block per dictionary entry.
//! - `classify`  – heuristic headword / variant / part-of-speech / definition split.
//! - `normalize` – whitespace and punctuation cleanup of a classified entry.
//!
//! ## What does **not** live here
//! - **Networking** (`core::net`), **file output** (`file`), and the
//!   page loop / worker pool (`scrape`).
//!
//! ## Typical call chain
//! ```text
//! scrape::run → Fetch::fetch(url) → segment → classify → normalize → OutputWriter
//! ```
//!
//! ## Conventions
//! - **Case-insensitive** tag detection; scan within known blocks rather than
//!   matching the whole document.
//! - Stages after fetching never fail. Bad markup degrades to worse output.
//! - Specs are testable **offline** against inline HTML fixtures.
pub mod classify;
pub mod listing;
pub mod normalize;
pub mod segment;

pub use classify::{FieldClassifier, KeywordMatcher, PosMatcher};
pub use normalize::normalize;
pub use segment::{segment, Segments};
