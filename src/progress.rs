// src/progress.rs
/// Lightweight progress reporting for a scrape run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called when a target starts, with its page count once known.
    fn begin(&mut self, _target: &str, _pages: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One page fetched, classified and written.
    fn item_done(&mut self, _url: &str, _records: usize) {}

    /// One page skipped (fetch or write failure).
    fn item_failed(&mut self, _url: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
