// src/config/options.rs
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use super::consts::*;
use crate::core::sanitize::sanitize_filename;
use crate::error::Error;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AppOptions {
    pub config: ScraperConfig,
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

/// How part-of-speech tokens are matched against entry text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PosMatch {
    /// Token counts if it occurs anywhere, even inside another word.
    /// Known to over-tag; this is the historical behavior.
    #[default]
    Anywhere,
    /// Token must not be preceded by a letter or digit.
    Standalone,
}

/// Everything the pipeline used to read from globals.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    pub base_url: String,
    pub pos_vocabulary: Vec<String>,
    pub pos_match: PosMatch,
    #[serde(rename = "request_timeout_secs", with = "secs")]
    pub request_timeout: Duration,
    pub user_agent: String,
    pub workers: usize,
    pub entry_class: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: s!(BASE_URL),
            pos_vocabulary: PARTS_OF_SPEECH.iter().map(|p| s!(*p)).collect(),
            pos_match: PosMatch::Anywhere,
            request_timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
            workers: WORKERS,
            entry_class: s!(ENTRY_CLASS),
        }
    }
}

impl ScraperConfig {
    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = fs::read_to_string(path).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        serde_json::from_str(&text).map_err(|e| Error::Config {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    pub fn base(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

mod secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}

/// One unit of scraping. Letters expand to all their listing pages.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Target {
    Letter(char),
    Word(String),
}

impl Target {
    /// Output grouping key: the letter, or the word itself.
    pub fn group(&self) -> String {
        match self {
            Target::Letter(c) => c.to_string(),
            Target::Word(w) => w.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    pub targets: Vec<Target>,
    /// Cap on listing pages per letter; `None` follows the site's "Last" link.
    pub max_pages: Option<u32>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            targets: LETTERS.map(Target::Letter).collect(),
            max_pages: None,
        }
    }
}

impl ScrapeOptions {
    /// Letters from free text ("abc", "a,b"); non-letters ignored, order kept, no repeats.
    pub fn letters_from(text: &str) -> Vec<Target> {
        let mut out: Vec<char> = Vec::new();
        for ch in text.chars().map(|c| c.to_ascii_lowercase()) {
            if LETTERS.contains(&ch) && !out.contains(&ch) {
                out.push(ch);
            }
        }
        out.into_iter().map(Target::Letter).collect()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportType {
    SingleFile,
    /// One file per letter or per word.
    #[default]
    PerTarget,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
    /// JSON Lines
    Json,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Tsv => "tsv",
            ExportFormat::Json => "jsonl",
        }
    }

    /// Field separator for delimited formats.
    pub fn delim(&self) -> Option<char> {
        match self {
            ExportFormat::Csv => Some(','),
            ExportFormat::Tsv => Some('\t'),
            ExportFormat::Json => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportOptions {
    pub format: ExportFormat,
    pub export_type: ExportType,
    pub out_dir: PathBuf,
    /// File stem for `SingleFile` (no extension; format controls it).
    pub file_stem: String,
    pub include_headers: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            export_type: ExportType::PerTarget,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
            file_stem: s!(DEFAULT_FILE),
            include_headers: false,
        }
    }
}

impl ExportOptions {
    /// Destination file for records of `group`.
    pub fn out_path(&self, group: &str) -> PathBuf {
        let stem = match self.export_type {
            ExportType::SingleFile => sanitize_filename(&self.file_stem, DEFAULT_FILE),
            ExportType::PerTarget => sanitize_filename(group, DEFAULT_FILE),
        };
        self.out_dir.join(join!(stem, ".", self.format.ext()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_file_fills_missing_fields_with_defaults() {
        let cfg: ScraperConfig =
            serde_json::from_str(r#"{ "request_timeout_secs": 3, "pos_vocabulary": ["v."] }"#).unwrap();
        assert_eq!(cfg.request_timeout, Duration::from_secs(3));
        assert_eq!(cfg.pos_vocabulary, vec!["v."]);
        assert_eq!(cfg.base_url, BASE_URL);
        assert_eq!(cfg.pos_match, PosMatch::Anywhere);
    }

    #[test]
    fn pos_match_parses_lowercase() {
        let cfg: ScraperConfig = serde_json::from_str(r#"{ "pos_match": "standalone" }"#).unwrap();
        assert_eq!(cfg.pos_match, PosMatch::Standalone);
    }

    #[test]
    fn letters_from_keeps_order_and_drops_junk() {
        let t = ScrapeOptions::letters_from("cAb,c9");
        assert_eq!(t, vec![Target::Letter('c'), Target::Letter('a'), Target::Letter('b')]);
    }

    #[test]
    fn default_targets_cover_alphabet() {
        let opts = ScrapeOptions::default();
        assert_eq!(opts.targets.len(), 26);
        assert_eq!(opts.targets[0], Target::Letter('a'));
    }

    #[test]
    fn out_path_per_target_and_single() {
        let mut export = ExportOptions::default();
        export.out_dir = PathBuf::from("o");
        assert_eq!(export.out_path("a"), PathBuf::from("o").join("a.csv"));

        export.export_type = ExportType::SingleFile;
        export.format = ExportFormat::Json;
        assert_eq!(export.out_path("a"), PathBuf::from("o").join("tagalog-words.jsonl"));
    }
}
