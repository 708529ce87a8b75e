// src/specs/normalize.rs
//! Cleanup pass between classification and output. Pure and total.
//!
//! Collapses whitespace and peels punctuation artifacts off the ends of every
//! field. Stray marks in the middle of a definition are left alone, so some
//! noise reaches the output. Running it twice changes nothing.

use crate::core::sanitize::{normalize_ws, trim_artifacts};
use crate::data::{ClassifiedEntry, NormalizedRecord};

pub fn normalize(entry: ClassifiedEntry) -> NormalizedRecord {
    NormalizedRecord {
        headword: clean_headword(&entry.headword),
        variant_forms: dedup_nonempty(entry.variant_forms.iter().map(|v| trim_artifacts(v))),
        parts_of_speech: dedup_nonempty(entry.parts_of_speech.iter().map(|p| normalize_ws(p))),
        definition: trim_artifacts(&entry.definition),
    }
}

/// Cleanup must not empty a headword; fall back to its whitespace-normalized form.
fn clean_headword(hw: &str) -> String {
    let cleaned = trim_artifacts(hw);
    if cleaned.is_empty() { normalize_ws(hw) } else { cleaned }
}

fn dedup_nonempty(items: impl Iterator<Item = String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for item in items {
        if !item.is_empty() && !out.contains(&item) {
            out.push(item);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(hw: &str, variants: &[&str], pos: &[&str], def: &str) -> ClassifiedEntry {
        ClassifiedEntry {
            headword: s!(hw),
            variant_forms: variants.iter().map(|v| s!(*v)).collect(),
            parts_of_speech: pos.iter().map(|p| s!(*p)).collect(),
            definition: s!(def),
        }
    }

    #[test]
    fn cleans_definition_ends_and_spacing() {
        let r = normalize(entry("yakap", &[], &["n."], " ,  embrace;   hug ,"));
        assert_eq!(r.definition, "embrace; hug");
        assert_eq!(r.headword, "yakap");
    }

    #[test]
    fn drops_empty_and_repeated_variants() {
        let r = normalize(entry("a", &["b ", "", " b", "c,"], &["v.", " v. ", ""], ""));
        assert_eq!(r.variant_forms, vec!["b", "c"]);
        assert_eq!(r.parts_of_speech, vec!["v."]);
    }

    #[test]
    fn headword_never_emptied() {
        let r = normalize(entry(" (,) ", &[], &[], "x"));
        assert_eq!(r.headword, "(,)");
        let r = normalize(entry("-", &[], &[], "x"));
        assert_eq!(r.headword, "-");
    }

    #[test]
    fn idempotent() {
        let samples = [
            entry("yakapin", &[], &["v.", "fig."], "() something "),
            entry(" niyayakap ", &["niyayakap", "niyakap,", " yayakapin"], &["v.", "inf."], ", 1. embrace...  "),
            entry("-", &["--"], &[" n. "], " ; (colloq.) hug [ "),
            entry("?", &[], &[], ""),
        ];
        for e in samples {
            let once = normalize(e);
            let twice = normalize(once.clone().into_entry());
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn stray_inner_marks_survive() {
        let r = normalize(entry("x", &[], &[], "to hug ; ; tightly"));
        assert_eq!(r.definition, "to hug ; ; tightly");
    }
}
