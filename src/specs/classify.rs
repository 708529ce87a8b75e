// src/specs/classify.rs
//! Heuristic field extraction for one entry block.
//!
//! The site does not mark up parts of speech; they are baked into the definition
//! text (`v., inf. to embrace`). So this module *guesses*:
//!
//! - **Headword / variants**: the `word-entry` heading or first link when the
//!   markup has one; a leading `(a, b, c)` group is read as variant forms. Plain
//!   text blocks fall back to a leading comma group, then the first word run.
//! - **Parts of speech**: every vocabulary token found in the block text, in
//!   first-seen order. With [`PosMatch::Anywhere`] a token matches *inside other
//!   words too*, so entries pick up tags they do not have. That over-tagging is
//!   the accepted cost of not parsing a rendered DOM; do not quietly tighten it,
//!   switch the matcher mode instead.
//! - **Definition**: what is left after the headword span and the leading tag
//!   run, with standalone tokens cut out. No cleanup here; see `normalize`.
//!
//! Classification never fails. Worst case is a `?` headword and an empty rest.

use crate::config::{PosMatch, ScraperConfig};
use crate::config::consts::{DEFINITION_CLASS, HEADWORD_CLASS, UNKNOWN_HEADWORD};
use crate::core::html::{drop_blocks_ci, find_class_block, inner_after_open_tag, next_tag_block_ci, strip_tags, to_lower};
use crate::data::{ClassifiedEntry, EntryBlock};

/// Keyword-matching capability behind part-of-speech detection.
pub trait PosMatcher: Send + Sync {
    /// Every known token present in `text`, ordered by first occurrence, no repeats.
    fn scan(&self, text: &str) -> Vec<String>;

    /// Longest known token starting exactly at byte `at`.
    fn token_at(&self, text: &str, at: usize) -> Option<&str>;
}

/// Fixed-vocabulary substring matcher.
#[derive(Clone, Debug)]
pub struct KeywordMatcher {
    vocabulary: Vec<String>,
    mode: PosMatch,
}

impl KeywordMatcher {
    pub fn new<I, S>(vocabulary: I, mode: PosMatch) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let vocabulary = vocabulary
            .into_iter()
            .map(Into::into)
            .filter(|t: &String| !t.trim().is_empty())
            .collect();
        Self { vocabulary, mode }
    }

    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(config.pos_vocabulary.iter().cloned(), config.pos_match)
    }

    fn first_index(&self, text: &str, token: &str) -> Option<usize> {
        match self.mode {
            PosMatch::Anywhere => text.find(token),
            PosMatch::Standalone => text
                .match_indices(token)
                .map(|(i, _)| i)
                .find(|&i| boundary_before(text, i)),
        }
    }
}

impl PosMatcher for KeywordMatcher {
    fn scan(&self, text: &str) -> Vec<String> {
        let mut hits: Vec<(usize, usize, &str)> = self
            .vocabulary
            .iter()
            .enumerate()
            .filter_map(|(rank, tok)| self.first_index(text, tok).map(|at| (at, rank, tok.as_str())))
            .collect();
        // ties (same start) keep vocabulary order
        hits.sort_unstable_by_key(|&(at, rank, _)| (at, rank));

        let mut out: Vec<String> = Vec::with_capacity(hits.len());
        for (_, _, tok) in hits {
            if !out.iter().any(|o| o == tok) {
                out.push(s!(tok));
            }
        }
        out
    }

    fn token_at(&self, text: &str, at: usize) -> Option<&str> {
        let rest = text.get(at..)?;
        self.vocabulary
            .iter()
            .filter(|tok| rest.starts_with(tok.as_str()) && boundary_after(tok, rest))
            .max_by_key(|tok| tok.len())
            .map(String::as_str)
    }
}

fn boundary_before(text: &str, at: usize) -> bool {
    text[..at].chars().next_back().is_none_or(|c| !c.is_alphanumeric())
}

/// Word-like tokens (`existential`) must not run into more letters; dotted ones may.
fn boundary_after(tok: &str, rest: &str) -> bool {
    match tok.chars().next_back() {
        Some(c) if c.is_alphanumeric() => rest[tok.len()..].chars().next().is_none_or(|n| !n.is_alphanumeric()),
        _ => true,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphabetic() || c == '-' || c == '\''
}

pub struct FieldClassifier<M = KeywordMatcher> {
    matcher: M,
}

impl FieldClassifier<KeywordMatcher> {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self::new(KeywordMatcher::from_config(config))
    }
}

/// Visible text pulled out of a block's markup.
struct Markup {
    /// Text of the headword element, if the block has one.
    headword: Option<String>,
    /// Text expected to hold variants, tags and definition.
    body: String,
    /// All visible text; scanned for tags.
    full: String,
}

impl<M: PosMatcher> FieldClassifier<M> {
    pub fn new(matcher: M) -> Self {
        Self { matcher }
    }

    pub fn classify(&self, block: &EntryBlock<'_>) -> ClassifiedEntry {
        let markup = split_markup(block.raw);
        let body = markup.body.as_str();

        let mut variant_forms = Vec::new();
        let mut cursor;
        let headword = match markup.headword {
            Some(hw) => {
                cursor = repeated_headword(body, &hw);
                let lead = leading_ws(&body[cursor..]);
                if let Some((items, used)) = paren_group(&body[cursor + lead..]) {
                    variant_forms = items;
                    cursor += lead + used;
                }
                hw
            }
            None => {
                let lead = leading_ws(body);
                let grouped = paren_group(&body[lead..]).or_else(|| self.comma_group(&body[lead..]));
                if let Some((items, used)) = grouped {
                    cursor = lead + used;
                    variant_forms = items;
                    variant_forms[0].clone()
                } else if let Some((start, end)) = self.first_word(body) {
                    cursor = end;
                    s!(&body[start..end])
                } else if let Some(chunk) = body.split_whitespace().next() {
                    cursor = body.find(chunk).map_or(body.len(), |i| i + chunk.len());
                    s!(chunk)
                } else {
                    cursor = body.len();
                    s!(UNKNOWN_HEADWORD)
                }
            }
        };

        let parts_of_speech = self.matcher.scan(&markup.full);

        let def_start = self.skip_tag_run(body, cursor);
        let definition = self.remove_tokens(&body[def_start..]);

        ClassifiedEntry { headword, variant_forms, parts_of_speech, definition }
    }

    /// `a, b, c` at the start of plain text; needs at least two word runs.
    fn comma_group(&self, t: &str) -> Option<(Vec<String>, usize)> {
        let first = self.word_run(t, 0)?;
        let mut items = vec![s!(&t[..first])];
        let mut pos = first;
        while t[pos..].starts_with(',') {
            let after = pos + 1 + leading_ws(&t[pos + 1..]);
            match self.word_run(t, after) {
                Some(end) => {
                    items.push(s!(&t[after..end]));
                    pos = end;
                }
                None => break,
            }
        }
        (items.len() >= 2).then_some((items, pos))
    }

    /// End of a word run starting at `at`, unless the run is really a tag (`v.`).
    fn word_run(&self, t: &str, at: usize) -> Option<usize> {
        let rest = t.get(at..)?;
        if !rest.chars().next().is_some_and(char::is_alphabetic) || self.matcher.token_at(t, at).is_some() {
            return None;
        }
        let len = rest.find(|c: char| !is_word_char(c)).unwrap_or(rest.len());
        Some(at + len)
    }

    /// First word run that is not a tag; else the first word run at all.
    fn first_word(&self, t: &str) -> Option<(usize, usize)> {
        let mut fallback = None;
        for (i, c) in t.char_indices() {
            if !c.is_alphabetic() || !boundary_before(t, i) {
                continue;
            }
            if let Some(end) = self.word_run(t, i) {
                return Some((i, end));
            }
            if fallback.is_none() {
                let len = t[i..].find(|c: char| !is_word_char(c)).unwrap_or(t.len() - i);
                fallback = Some((i, i + len));
            }
        }
        fallback
    }

    /// Skip whitespace, separators and tags (`(v.)`, `v., inf.`) from `at`.
    fn skip_tag_run(&self, t: &str, mut at: usize) -> usize {
        while let Some(ch) = t[at..].chars().next() {
            if ch.is_whitespace() || matches!(ch, ',' | ';' | '/' | ')' | ']') {
                at += ch.len_utf8();
            } else if let Some(tok) = self.matcher.token_at(t, at) {
                at += tok.len();
            } else if matches!(ch, '(' | '[') && self.matcher.token_at(t, at + 1).is_some() {
                at += 1;
            } else {
                break;
            }
        }
        at
    }

    /// Cut standalone tag tokens out of definition text; everything else untouched.
    fn remove_tokens(&self, t: &str) -> String {
        let mut out = String::with_capacity(t.len());
        let mut i = 0;
        while let Some(ch) = t[i..].chars().next() {
            if boundary_before(t, i) {
                if let Some(tok) = self.matcher.token_at(t, i) {
                    i += tok.len();
                    continue;
                }
            }
            out.push(ch);
            i += ch.len_utf8();
        }
        out
    }
}

fn split_markup(raw: &str) -> Markup {
    let raw = drop_blocks_ci(&drop_blocks_ci(raw, "script"), "style");
    let lc = to_lower(&raw);

    let heading = find_class_block(&raw, &lc, "h2", HEADWORD_CLASS, 0)
        .map(|(s, e)| (strip_tags(&raw[s..e]), e))
        .or_else(|| {
            next_tag_block_ci(&raw, "a", 0).map(|(s, e)| (strip_tags(inner_after_open_tag(&raw[s..e])), e))
        })
        .filter(|(text, _)| !text.is_empty());

    let body = match find_class_block(&raw, &lc, "div", DEFINITION_CLASS, 0) {
        Some((s, e)) => strip_tags(&raw[s..e]),
        None => match &heading {
            Some((_, end)) => strip_tags(&raw[*end..]),
            None => strip_tags(&raw),
        },
    };

    Markup {
        full: strip_tags(&raw),
        headword: heading.map(|(text, _)| text),
        body,
    }
}

/// Length of the headword repeated at the start of the body, or 0.
fn repeated_headword(body: &str, hw: &str) -> usize {
    match body.strip_prefix(hw) {
        Some(rest) if !rest.chars().next().is_some_and(char::is_alphanumeric) => hw.len(),
        _ => 0,
    }
}

fn leading_ws(t: &str) -> usize {
    t.len() - t.trim_start().len()
}

/// `(a, b, c)` at the very start; items must be plain words (no dots or digits).
fn paren_group(t: &str) -> Option<(Vec<String>, usize)> {
    let inner_and_rest = t.strip_prefix('(')?;
    let close = inner_and_rest.find(')')?;
    let inner = &inner_and_rest[..close];
    let items: Vec<String> = inner.split(',').map(|i| s!(i.trim())).collect();
    let wordish = items.iter().all(|i| {
        i.chars().any(char::is_alphabetic) && i.chars().all(|c| is_word_char(c) || c == ' ')
    });
    wordish.then(|| (items, close + 2))
}
