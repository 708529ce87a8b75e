// src/core/vischars.rs
// Visible-text character iterator over an HTML fragment.
// Skips tags (<...>), decodes common entities, collapses whitespace to a single ' '.
// Block-level tags (p, div, br, li, h1..h6, ...) act as whitespace so words
// from neighbouring elements do not fuse together.

const BLOCK_TAGS: &[&str] = &[
    "p", "div", "br", "li", "ul", "ol", "dd", "dt", "dl", "tr", "td", "th",
    "h1", "h2", "h3", "h4", "h5", "h6", "section", "article", "hr", "table",
];

pub struct VisChars<'a> {
    s: &'a str,
    b: &'a [u8],
    i: usize,
    n: usize,
    last_space: bool,
}

impl<'a> VisChars<'a> {
    pub fn new(s: &'a str) -> Self {
        // leading whitespace is dropped
        Self { s, b: s.as_bytes(), i: 0, n: s.len(), last_space: true }
    }

    /// Called when current byte is '<'. Returns true for block-level tags.
    #[inline]
    fn skip_tag(&mut self) -> bool {
        self.i += 1;
        let name_start = self.i + usize::from(self.b.get(self.i) == Some(&b'/'));
        let mut name_end = name_start;
        while name_end < self.n && self.b[name_end].is_ascii_alphanumeric() {
            name_end += 1;
        }
        let name = &self.s[name_start..name_end];
        let is_block = BLOCK_TAGS.iter().any(|t| t.eq_ignore_ascii_case(name));

        let mut in_s = false; // '
        let mut in_d = false; // "
        while self.i < self.n {
            match self.b[self.i] {
                b'\'' if !in_d => in_s = !in_s,
                b'"'  if !in_s => in_d = !in_d,
                b'>' if !in_s && !in_d => { self.i += 1; break; }
                _ => {}
            }
            self.i += 1;
        }
        is_block
    }

    /// Called when current byte is '&'. Unknown or unterminated entities pass through as '&'.
    #[inline]
    fn entity(&mut self) -> char {
        let rest = &self.s[self.i + 1..];
        let end = match rest.bytes().take(10).position(|c| c == b';') {
            Some(e) => e,
            None => { self.i += 1; return '&'; }
        };
        match decode_entity(&rest[..end]) {
            Some(ch) => { self.i += end + 2; ch }
            None => { self.i += 1; '&' }
        }
    }

    #[inline]
    fn next_char(&mut self) -> Option<char> {
        let ch = self.s[self.i..].chars().next()?;
        self.i += ch.len_utf8();
        Some(ch)
    }

    fn next_raw(&mut self) -> Option<char> {
        while self.i < self.n {
            return match self.b[self.i] {
                b'<' => {
                    if self.skip_tag() { Some(' ') } else { continue; }
                }
                b'&' => Some(self.entity()),
                _ => self.next_char(),
            };
        }
        None
    }
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse::<u32>().ok()?,
        };
        return char::from_u32(code);
    }
    Some(match name {
        "nbsp" => ' ',
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "ndash" => '–',
        "mdash" => '—',
        "hellip" => '…',
        "ntilde" => 'ñ',
        "Ntilde" => 'Ñ',
        "rsquo" | "lsquo" => '\'',
        "ldquo" | "rdquo" => '"',
        _ => return None,
    })
}

impl<'a> Iterator for VisChars<'a> {
    type Item = char;
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let ch = self.next_raw()?;
            if ch.is_whitespace() {
                // collapse consecutive whitespace to a single space
                if self.last_space { continue; }
                self.last_space = true;
                return Some(' ');
            }
            self.last_space = false;
            return Some(ch);
        }
    }
}
