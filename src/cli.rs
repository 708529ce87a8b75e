// src/cli.rs
use std::{path::PathBuf, time::Duration};

use clap::{Parser, ValueEnum};
use tracing::debug;

use crate::config::{AppOptions, ExportFormat, ExportType, PosMatch, ScrapeOptions, ScraperConfig, Target};
use crate::core::HttpFetcher;
use crate::error::Error;
use crate::file::OutputWriter;
use crate::progress::Progress;
use crate::scrape::{self, RunSummary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Csv,
    Tsv,
    /// JSON Lines (.jsonl): one record object per line, never a single keyed document
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Matching {
    /// Tag hits anywhere in the text, even inside words
    Anywhere,
    /// Tag must start at a word boundary
    Standalone,
}

#[derive(Parser, Debug)]
#[command(name = "tagalog_scrape", version)]
#[command(about = "Scrape tagalog.pinoydictionary.com into CSV, TSV or JSON Lines")]
pub struct Args {
    /// Letters to scrape, e.g. "abk" (default: a-z unless --word is given)
    #[arg(long)]
    pub letters: Option<String>,

    /// Single word to look up; repeatable
    #[arg(long = "word", value_name = "WORD")]
    pub words: Vec<String>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Write everything to one file instead of one per letter/word.
    /// With --format json this is still JSON Lines, one object per word.
    #[arg(long, value_name = "STEM", num_args = 0..=1, default_missing_value = crate::config::consts::DEFAULT_FILE)]
    pub single: Option<String>,

    /// Write a header row (CSV/TSV)
    #[arg(long)]
    pub headers: bool,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Concurrent page fetches per letter
    #[arg(long)]
    pub workers: Option<usize>,

    /// Stop each letter after this many listing pages
    #[arg(long)]
    pub max_pages: Option<u32>,

    #[arg(long, value_enum)]
    pub pos_match: Option<Matching>,

    /// JSON scraper config; flags override it
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Resolve flags (and the optional config file) into run options.
    pub fn into_options(self) -> Result<AppOptions, Error> {
        let mut config = match &self.config {
            Some(path) => ScraperConfig::load(path)?,
            None => ScraperConfig::default(),
        };
        if let Some(secs) = self.timeout {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(n) = self.workers {
            config.workers = n.max(1);
        }
        if let Some(m) = self.pos_match {
            config.pos_match = match m {
                Matching::Anywhere => PosMatch::Anywhere,
                Matching::Standalone => PosMatch::Standalone,
            };
        }

        let mut targets = self.letters.as_deref().map(ScrapeOptions::letters_from).unwrap_or_default();
        targets.extend(self.words.iter().filter(|w| !w.trim().is_empty()).map(|w| Target::Word(s!(w.trim()))));
        let scrape = if targets.is_empty() && self.letters.is_none() {
            ScrapeOptions { max_pages: self.max_pages, ..ScrapeOptions::default() }
        } else {
            ScrapeOptions { targets, max_pages: self.max_pages }
        };

        let mut opts = AppOptions { config, scrape, ..AppOptions::default() };
        let export = &mut opts.export;
        export.format = match self.format {
            Format::Csv => ExportFormat::Csv,
            Format::Tsv => ExportFormat::Tsv,
            Format::Json => ExportFormat::Json,
        };
        export.include_headers = self.headers;
        if let Some(dir) = self.out {
            export.out_dir = dir;
        }
        if let Some(stem) = self.single {
            export.export_type = ExportType::SingleFile;
            export.file_stem = stem;
        }
        Ok(opts)
    }
}

/// Prints one line per page to stderr.
#[derive(Default)]
pub struct ConsoleProgress {
    target: String,
    pages: usize,
    seen: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, target: &str, pages: usize) {
        self.target = s!(target);
        self.pages = pages;
        self.seen = 0;
        eprintln!("[{}] {} page(s)", target, pages);
    }

    fn log(&mut self, msg: &str) {
        eprintln!("{msg}");
    }

    fn item_done(&mut self, url: &str, records: usize) {
        self.seen += 1;
        eprintln!("[{} {}/{}] {} words  {}", self.target, self.seen, self.pages, records, url);
    }

    fn item_failed(&mut self, url: &str, reason: &str) {
        self.seen += 1;
        eprintln!("[{} {}/{}] FAILED {}: {}", self.target, self.seen, self.pages.max(self.seen), url, reason);
    }
}

/// Parse args, set up logging, scrape.
pub fn run() -> Result<RunSummary, Error> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<RunSummary, Error> {
    crate::log::init(args.verbose);
    let opts = args.into_options()?;
    debug!(scrape = ?opts.scrape, export = ?opts.export, "options");

    let fetcher = HttpFetcher::new(&opts.config)?;
    let mut writer = OutputWriter::new(opts.export.clone());
    let mut progress = ConsoleProgress::default();
    Ok(scrape::run(&opts, &fetcher, &mut writer, Some(&mut progress)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> AppOptions {
        let argv = std::iter::once("tagalog_scrape").chain(args.iter().copied());
        Args::try_parse_from(argv).unwrap().into_options().unwrap()
    }

    #[test]
    fn no_flags_scrapes_alphabet_to_csv() {
        let opts = parse(&[]);
        assert_eq!(opts.scrape.targets.len(), 26);
        assert_eq!(opts.export.format, ExportFormat::Csv);
        assert_eq!(opts.export.export_type, ExportType::PerTarget);
    }

    #[test]
    fn letters_and_words_in_order() {
        let opts = parse(&["--letters", "kb", "--word", "yakap", "--word", "bahay"]);
        assert_eq!(
            opts.scrape.targets,
            vec![
                Target::Letter('k'),
                Target::Letter('b'),
                Target::Word(s!("yakap")),
                Target::Word(s!("bahay")),
            ]
        );
    }

    #[test]
    fn word_only_skips_letters() {
        let opts = parse(&["--word", "yakap"]);
        assert_eq!(opts.scrape.targets, vec![Target::Word(s!("yakap"))]);
    }

    #[test]
    fn single_without_stem_uses_default() {
        let opts = parse(&["--single", "--format", "json"]);
        assert_eq!(opts.export.export_type, ExportType::SingleFile);
        assert_eq!(opts.export.file_stem, crate::config::consts::DEFAULT_FILE);
        assert_eq!(opts.export.format, ExportFormat::Json);
        assert_eq!(
            opts.export.out_path("a"),
            std::path::Path::new("out").join("tagalog-words.jsonl")
        );
    }

    #[test]
    fn overrides_land_in_config() {
        let opts = parse(&["--timeout", "3", "--workers", "4", "--pos-match", "standalone", "--max-pages", "2"]);
        assert_eq!(opts.config.request_timeout, Duration::from_secs(3));
        assert_eq!(opts.config.workers, 4);
        assert_eq!(opts.config.pos_match, PosMatch::Standalone);
        assert_eq!(opts.scrape.max_pages, Some(2));
    }
}
