// src/scrape.rs
use std::{
    collections::BTreeMap,
    path::PathBuf,
    sync::{mpsc, atomic::{AtomicUsize, Ordering}},
    thread,
};

use tracing::{debug, error, info, warn};

use crate::{
    config::{AppOptions, ScraperConfig, Target},
    core::Fetch,
    data::{NormalizedRecord, RawPage},
    error::NetworkError,
    file::OutputWriter,
    progress::{NullProgress, Progress},
    specs::{listing, normalize, segment, FieldClassifier, PosMatcher},
};

/// What a run produced. Partial output is normal: failed pages are counted, not fatal.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub pages_ok: usize,
    pub pages_failed: usize,
    pub records_written: usize,
    pub write_failures: usize,
    pub files: Vec<PathBuf>,
}

type PageResult = Result<Vec<NormalizedRecord>, NetworkError>;

/// Segment → classify → normalize for one fetched page. Never fails.
pub fn extract_records<M: PosMatcher>(
    page: &RawPage,
    config: &ScraperConfig,
    classifier: &FieldClassifier<M>,
) -> Vec<NormalizedRecord> {
    let records: Vec<NormalizedRecord> = segment(page, &config.entry_class)
        .map(|block| normalize(classifier.classify(&block)))
        .inspect(|r| debug!(word = %r.headword, pos = ?r.parts_of_speech, definition = %r.definition, "entry"))
        .collect();
    debug!(url = page.url(), records = records.len(), "page extracted");
    records
}

/// Scrape every target in order and write as we go.
/// A failed fetch or write skips that page (a failed first listing page skips
/// the whole letter); the run always moves on to the next target.
pub fn run(
    opts: &AppOptions,
    fetcher: &dyn Fetch,
    writer: &mut OutputWriter,
    progress: Option<&mut dyn Progress>,
) -> RunSummary {
    let classifier = FieldClassifier::from_config(&opts.config);
    let mut quiet = NullProgress;
    let progress: &mut dyn Progress = match progress {
        Some(p) => p,
        None => &mut quiet,
    };
    let mut runner = Runner {
        config: &opts.config,
        fetcher,
        classifier: &classifier,
        writer,
        progress,
        summary: RunSummary::default(),
    };

    for target in &opts.scrape.targets {
        let group = target.group();
        match target {
            Target::Letter(letter) => runner.letter(*letter, &group, opts.scrape.max_pages),
            Target::Word(word) => runner.word(word, &group),
        }
    }
    runner.finish()
}

fn fetch_page<M: PosMatcher>(
    fetcher: &dyn Fetch,
    config: &ScraperConfig,
    classifier: &FieldClassifier<M>,
    url: &str,
) -> PageResult {
    let page = fetcher.fetch(url)?;
    Ok(extract_records(&page, config, classifier))
}

struct Runner<'a, 'p, M> {
    config: &'a ScraperConfig,
    fetcher: &'a dyn Fetch,
    classifier: &'a FieldClassifier<M>,
    writer: &'a mut OutputWriter,
    progress: &'p mut dyn Progress,
    summary: RunSummary,
}

impl<M: PosMatcher> Runner<'_, '_, M> {
    fn letter(&mut self, letter: char, group: &str, max_pages: Option<u32>) {
        let config = self.config;
        let first_url = listing::letter_page_url(config.base(), letter, 1);
        info!(%letter, "scraping letter");

        // Page 1 also tells us how many pages there are; without it the letter is skipped.
        let first = match self.fetcher.fetch(&first_url) {
            Ok(page) => page,
            Err(e) => {
                warn!(%letter, error = %e, "first listing page failed, skipping letter");
                self.failed(&first_url, &e.to_string());
                self.progress.log(&format!("skipping letter {letter}: {e}"));
                return;
            }
        };

        let mut last = listing::last_page(first.html());
        if let Some(cap) = max_pages.filter(|&cap| cap.max(1) < last) {
            self.progress.log(&format!("letter {letter}: {last} pages, stopping after {}", cap.max(1)));
            last = cap.max(1);
        }
        self.progress.begin(group, last as usize);
        debug!(%letter, pages = last, "pager read");

        let records = extract_records(&first, config, self.classifier);
        self.settle(&first_url, group, Ok(records));

        let urls: Vec<String> = (2..=last)
            .map(|page| listing::letter_page_url(config.base(), letter, page))
            .collect();
        self.pages(group, &urls);
    }

    fn word(&mut self, word: &str, group: &str) {
        let url = listing::word_url(self.config.base(), word);
        info!(%word, "scraping word");
        self.progress.begin(group, 1);
        let result = fetch_page(self.fetcher, self.config, self.classifier, &url);
        self.settle(&url, group, result);
    }

    /// Fetch + classify `urls` on up to `config.workers` threads; write strictly in `urls` order.
    fn pages(&mut self, group: &str, urls: &[String]) {
        let (fetcher, config, classifier) = (self.fetcher, self.config, self.classifier);
        let workers = config.workers.clamp(1, urls.len().max(1));

        if workers == 1 {
            for url in urls {
                let result = fetch_page(fetcher, config, classifier, url);
                self.settle(url, group, result);
            }
            return;
        }

        let next = AtomicUsize::new(0);
        let (tx, rx) = mpsc::channel::<(usize, PageResult)>();

        thread::scope(|scope| {
            for _ in 0..workers {
                let tx = tx.clone();
                let next = &next;
                scope.spawn(move || loop {
                    let i = next.fetch_add(1, Ordering::Relaxed);
                    let Some(url) = urls.get(i) else { break };
                    if tx.send((i, fetch_page(fetcher, config, classifier, url))).is_err() {
                        break;
                    }
                });
            }
            drop(tx); // main thread is sole receiver now

            // Hold early finishers until every page before them is written.
            let mut pending: BTreeMap<usize, PageResult> = BTreeMap::new();
            let mut next_write = 0usize;
            for (i, result) in rx {
                pending.insert(i, result);
                while let Some(result) = pending.remove(&next_write) {
                    self.settle(&urls[next_write], group, result);
                    next_write += 1;
                }
            }
        });
    }

    fn settle(&mut self, url: &str, group: &str, result: PageResult) {
        let records = match result {
            Ok(records) => records,
            Err(e) => {
                warn!(url, error = %e, "fetch failed, skipping page");
                self.failed(url, &e.to_string());
                return;
            }
        };

        match self.writer.write_all(&records, group) {
            Ok(path) => {
                self.summary.pages_ok += 1;
                self.summary.records_written += records.len();
                info!(url, records = records.len(), file = %path.display(), "page done");
                self.progress.item_done(url, records.len());
            }
            Err(e) => {
                error!(url, error = %e, "write failed, skipping page");
                self.summary.write_failures += 1;
                self.progress.item_failed(url, &e.to_string());
            }
        }
    }

    fn failed(&mut self, url: &str, reason: &str) {
        self.summary.pages_failed += 1;
        self.progress.item_failed(url, reason);
    }

    fn finish(mut self) -> RunSummary {
        self.summary.files = self.writer.files().to_vec();
        self.progress.finish();
        info!(
            pages_ok = self.summary.pages_ok,
            pages_failed = self.summary.pages_failed,
            records = self.summary.records_written,
            write_failures = self.summary.write_failures,
            "run finished"
        );
        self.summary
    }
}
