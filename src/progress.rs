// src/progress.rs
/// Lightweight progress reporting for the scrape loop.
/// Frontends (CLI, tests) implement this to surface per-query status.
pub trait Progress {
    /// Called at the start with the number of queries.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// One query fetched and mapped.
    fn item_done(&mut self, _query: &str, _rows: usize) {}

    /// One query failed; it contributes no rows.
    fn item_failed(&mut self, _query: &str, _reason: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
