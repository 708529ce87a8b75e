// src/core/sanitize.rs

/// Separators left behind at the front once headwords and tags are cut away.
const LEAD_JUNK: &[char] = &[',', ';', ':', ')', ']', '|', '/', '-', '–', '—'];
/// Dangling openers and separators at the end of a definition.
const TRAIL_JUNK: &[char] = &[',', ';', ':', '(', '[', '|', '/', '-', '–', '—'];

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Collapse whitespace, then peel punctuation artifacts off both ends.
/// Empty `()` / `[]` pairs at the front count as artifacts.
/// Only the ends are touched; stray marks inside the text survive.
pub fn trim_artifacts(s: &str) -> String {
    let s = normalize_ws(s);
    let mut t = s.as_str();
    loop {
        t = t.trim_start();
        if let Some(rest) = t.strip_prefix(LEAD_JUNK) {
            t = rest;
        } else if let Some(rest) = strip_empty_pair(t) {
            t = rest;
        } else {
            break;
        }
    }
    loop {
        t = t.trim_end();
        match t.strip_suffix(TRAIL_JUNK) {
            Some(rest) => t = rest,
            None => break,
        }
    }
    t.to_string()
}

fn strip_empty_pair(t: &str) -> Option<&str> {
    for (open, close) in [('(', ')'), ('[', ']')] {
        if let Some(rest) = t.strip_prefix(open) {
            if let Some(rest) = rest.trim_start().strip_prefix(close) {
                return Some(rest);
            }
        }
    }
    None
}

/// Filesystem-safe stem for a letter or word. Falls back to `fallback` when nothing is left.
pub fn sanitize_filename(name: &str, fallback: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_us = false;
    for ch in name.chars() {
        if ch.is_alphanumeric() { out.push(ch); last_us = false; }
        else if ch.is_whitespace() { if !last_us { out.push('_'); last_us = true; } }
        else if ch=='-' || ch=='_' { if !(last_us && ch=='_') { out.push(ch); } last_us = ch=='_'; }
    }
    let out = out.trim_matches('_').to_string();
    if out.is_empty() { s!(fallback) } else { out }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_ws_collapses_and_trims() {
        assert_eq!(normalize_ws("  to \n hug\t tightly "), "to hug tightly");
    }

    #[test]
    fn trim_artifacts_peels_both_ends() {
        assert_eq!(trim_artifacts("() something "), "something");
        assert_eq!(trim_artifacts(" , ; 1. embrace; hug ,"), "1. embrace; hug");
        assert_eq!(trim_artifacts("[ ] - word -"), "word");
    }

    #[test]
    fn trim_artifacts_keeps_inner_and_closing_marks() {
        assert_eq!(trim_artifacts("hug (tightly)."), "hug (tightly).");
        assert_eq!(trim_artifacts("(colloq.) hug"), "(colloq.) hug");
    }

    #[test]
    fn trim_artifacts_is_stable() {
        for s in ["() x ,", " ;;", "a  b", "-(", "[ ] ( ) y"] {
            let once = trim_artifacts(s);
            assert_eq!(trim_artifacts(&once), once, "input {s:?}");
        }
    }

    #[test]
    fn sanitize_filename_variants() {
        assert_eq!(sanitize_filename("a", "x"), "a");
        assert_eq!(sanitize_filename("mag-aral ka", "x"), "mag-aral_ka");
        assert_eq!(sanitize_filename("niño", "x"), "niño");
        assert_eq!(sanitize_filename("../", "x"), "x");
    }
}
