// src/core/html.rs
//! Tolerant, case-insensitive HTML slicing. No DOM; byte offsets into the
//! original string are preserved because only ASCII is lowercased.

use super::vischars::VisChars;

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// Position of the next `<tag` opener in an already-lowercased string.
/// Requires a tag-name boundary, so `<a` does not match `<abbr`.
pub fn find_open_tag(lc: &str, tag: &str, from: usize) -> Option<usize> {
    let pat = join!("<", tag);
    let mut pos = from;
    loop {
        let at = lc.get(pos..)?.find(&pat)? + pos;
        let after = at + pat.len();
        match lc.as_bytes().get(after) {
            Some(b) if b.is_ascii_whitespace() || *b == b'>' || *b == b'/' => return Some(at),
            None => return None,
            _ => pos = after,
        }
    }
}

/// Index just past the `>` closing the opener that starts at `start`.
pub fn opener_end(s: &str, start: usize) -> Option<usize> {
    Some(s.get(start..)?.find('>')? + start + 1)
}

/// Next `<tag ...>…</tag>` span from `from`, not nesting-aware.
pub fn next_tag_block_ci(s: &str, tag: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let tag = to_lower(tag);
    let close = join!("</", &tag, ">");
    let start = find_open_tag(&lc, &tag, from)?;
    let open_end = opener_end(s, start)?;
    let end_rel = lc[open_end..].find(&close)?;
    Some((start, open_end + end_rel + close.len()))
}

/// End (exclusive) of the element opened at `start`, counting nested `<tag`/`</tag`.
/// `None` when the markup never balances.
pub fn balanced_end(lc: &str, tag: &str, start: usize) -> Option<usize> {
    let close = join!("</", tag);
    let mut depth = 0usize;
    let mut pos = start;
    loop {
        let next_open = find_open_tag(lc, tag, pos);
        let next_close = lc.get(pos..)?.find(&close).map(|c| c + pos);
        match (next_open, next_close) {
            (Some(o), Some(c)) if o < c => {
                depth += 1;
                pos = o + 1;
            }
            (_, Some(c)) => {
                depth = depth.checked_sub(1)?;
                let end = opener_end(lc, c)?;
                if depth == 0 {
                    return Some(end);
                }
                pos = end;
            }
            (_, None) => return None,
        }
    }
}

/// Value of attribute `name` inside an opener like `<a href="…" title=x>`.
pub fn attr_value<'a>(opener: &'a str, name: &str) -> Option<&'a str> {
    let lc = to_lower(opener);
    let pat = join!(&to_lower(name), "=");
    let mut pos = 0;
    let at = loop {
        let at = lc.get(pos..)?.find(&pat)? + pos;
        // must be a whole attribute name: `data-class=` is not `class=`
        if at > 0 && lc.as_bytes()[at - 1].is_ascii_whitespace() {
            break at;
        }
        pos = at + pat.len();
    };
    let rest = &opener[at + pat.len()..];
    match rest.chars().next()? {
        q @ ('"' | '\'') => {
            let body = &rest[1..];
            Some(&body[..body.find(q)?])
        }
        _ => {
            let end = rest
                .find(|c: char| c.is_whitespace() || c == '>')
                .unwrap_or(rest.len());
            Some(&rest[..end])
        }
    }
}

/// True if the opener's `class` attribute lists `class` (case-insensitive).
pub fn has_class(opener: &str, class: &str) -> bool {
    attr_value(opener, "class")
        .map(|v| v.split_whitespace().any(|c| c.eq_ignore_ascii_case(class)))
        .unwrap_or(false)
}

/// First `<tag class="… class …">` element from `from`, as a byte span.
/// Unbalanced markup runs to the end of `s`.
pub fn find_class_block(s: &str, lc: &str, tag: &str, class: &str, from: usize) -> Option<(usize, usize)> {
    let mut pos = from;
    loop {
        let start = find_open_tag(lc, tag, pos)?;
        let oe = opener_end(s, start)?;
        if has_class(&s[start..oe], class) {
            let end = balanced_end(lc, tag, start).unwrap_or(s.len());
            return Some((start, end));
        }
        pos = oe;
    }
}

pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// Remove every `<tag …>…</tag>` span (script, style, …).
pub fn drop_blocks_ci(s: &str, tag: &str) -> String {
    let lc = to_lower(s);
    let close = join!("</", tag, ">");
    let mut out = String::with_capacity(s.len());
    let mut pos = 0usize;
    while let Some(start) = find_open_tag(&lc, tag, pos) {
        out.push_str(&s[pos..start]);
        pos = match lc[start..].find(&close) {
            Some(c) => start + c + close.len(),
            None => s.len(),
        };
    }
    out.push_str(&s[pos..]);
    out
}

/// Visible text: tags out, entities decoded, whitespace collapsed and trimmed.
pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let out: String = VisChars::new(s.as_ref()).collect();
    out.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_open_tag_respects_name_boundary() {
        let lc = "<abbr>x</abbr><a href=1>y</a>";
        assert_eq!(find_open_tag(lc, "a", 0), Some(14));
    }

    #[test]
    fn balanced_end_handles_nesting() {
        let s = r#"<div class="word-group"><div class="word">a</div><div>b</div></div><div>tail</div>"#;
        let lc = to_lower(s);
        let end = balanced_end(&lc, "div", 0).unwrap();
        assert!(s[..end].ends_with("</div></div>"));
        assert!(!s[..end].contains("tail"));
    }

    #[test]
    fn balanced_end_unbalanced_is_none() {
        let lc = "<div><div>x</div>";
        assert_eq!(balanced_end(lc, "div", 0), None);
    }

    #[test]
    fn attr_value_quoted_and_bare() {
        assert_eq!(attr_value(r#"<a href="/list/a/37/" title='Last Page'>"#, "title"), Some("Last Page"));
        assert_eq!(attr_value("<div class=word-group>", "class"), Some("word-group"));
        assert_eq!(attr_value(r#"<div data-class="x">"#, "class"), None);
    }

    #[test]
    fn has_class_matches_token() {
        assert!(has_class(r#"<DIV CLASS="clearfix Word-Group">"#, "word-group"));
        assert!(!has_class(r#"<div class="word-groups">"#, "word-group"));
    }

    #[test]
    fn next_tag_block_finds_anchor() {
        let s = r#"<abbr>no</abbr> <A href="x">Yes</A>"#;
        let (a, b) = next_tag_block_ci(s, "a", 0).unwrap();
        assert_eq!(&s[a..b], r#"<A href="x">Yes</A>"#);
        assert_eq!(inner_after_open_tag(&s[a..b]), "Yes");
    }

    #[test]
    fn drop_blocks_removes_scripts() {
        let s = "a<script>var x = '<p>';</script>b<SCRIPT src=1></SCRIPT>c";
        assert_eq!(drop_blocks_ci(s, "script"), "abc");
    }

    #[test]
    fn strip_tags_visible_text() {
        assert_eq!(strip_tags("<p> hug &amp; <i>kiss</i> </p>"), "hug & kiss");
    }
}
