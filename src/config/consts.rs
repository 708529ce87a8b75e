// src/config/consts.rs

// Net config
pub const BASE_URL: &str = "https://tagalog.pinoydictionary.com";
pub const LIST_PATH: &str = "list";
pub const WORD_PATH: &str = "word";
pub const USER_AGENT: &str = concat!("tagalog_scrape/", env!("CARGO_PKG_VERSION"));
pub const REQUEST_TIMEOUT_SECS: u64 = 15;

// Page layout
pub const ENTRY_CLASS: &str = "word-group";
pub const DEFINITION_CLASS: &str = "definition";
pub const HEADWORD_CLASS: &str = "word-entry";
pub const LAST_PAGE_TITLE: &str = "last";

// Scrape
pub const LETTERS: std::ops::RangeInclusive<char> = 'a'..='z';
pub const UNKNOWN_HEADWORD: &str = "?";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";
pub const DEFAULT_FILE: &str = "tagalog-words";
pub const LIST_SEP: &str = "; ";

// Concurrency
pub const WORKERS: usize = 1;

/// Part-of-speech abbreviations, as listed in the site's own dictionary.js,
/// plus the irregular spellings that show up in definitions.
/// Bare `adj` and `n` are substring-matched like the rest, so under
/// `PosMatch::Anywhere` almost every entry picks up `n`.
pub const PARTS_OF_SPEECH: &[&str] = &[
    "n.",
    "syn.",
    "bot.",
    "zoo.",
    "by ext.",
    "interrog.",
    "gram.",
    "idiom.",
    "prep.",
    "pref.",
    "pers.",
    "conj.",
    "med.",
    "mat.",
    "electr.",
    "mil.",
    "intrj.",
    "adv.",
    "pron.",
    "comp.",
    "adj.",
    "v.",
    "inf.",
    "pl.",
    "coll.",
    "fig.",
    "poss.",
    "anat.",
    "rel.",
    "pseudo-verb",
    "existential",
    // irregular
    "imp.",
    "expr.",
    "excl.",
    "adj",
    "[n]",
    "vinf.",
    "n",
    "v.,inf.",
    "n.,zoo.",
    "adj./adv.",
];
