// src/data.rs
//
// Pipeline data, in the order it flows:
//
// - RawPage:          fetched HTML + source URL. Immutable; consumed by the segmenter.
// - EntryBlock:       borrowed span of a page believed to hold one dictionary entry.
// - ClassifiedEntry:  best-effort fields pulled out of one block. Headword is never
//                     empty; everything else may be wrong (heuristic tagging).
// - NormalizedRecord: ClassifiedEntry after whitespace/punctuation cleanup. The unit
//                     written to output.

use serde::Serialize;

use crate::config::consts::LIST_SEP;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawPage {
    url: String,
    html: String,
}

impl RawPage {
    pub fn new(url: impl Into<String>, html: impl Into<String>) -> Self {
        Self { url: url.into(), html: html.into() }
    }
    pub fn url(&self) -> &str { &self.url }
    pub fn html(&self) -> &str { &self.html }
    pub fn is_empty(&self) -> bool { self.html.is_empty() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EntryBlock<'a> {
    pub raw: &'a str,
    /// Zero-based index of the block within its page.
    pub position: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifiedEntry {
    pub headword: String,
    pub variant_forms: Vec<String>,
    /// First-seen order; may contain false positives.
    pub parts_of_speech: Vec<String>,
    pub definition: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NormalizedRecord {
    pub headword: String,
    pub variant_forms: Vec<String>,
    pub parts_of_speech: Vec<String>,
    pub definition: String,
}

impl NormalizedRecord {
    pub const HEADERS: &'static [&'static str] = &["Headword", "Variant forms", "Parts of speech", "Definition"];

    /// Flat row for CSV/TSV: headword, variants, parts of speech, definition.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.headword.clone(),
            self.variant_forms.join(LIST_SEP),
            self.parts_of_speech.join(LIST_SEP),
            self.definition.clone(),
        ]
    }

    pub fn into_entry(self) -> ClassifiedEntry {
        ClassifiedEntry {
            headword: self.headword,
            variant_forms: self.variant_forms,
            parts_of_speech: self.parts_of_speech,
            definition: self.definition,
        }
    }
}
