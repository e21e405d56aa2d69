// src/runner.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    config::options::{AppOptions, ScrapeOptions},
    core::net::Fetch,
    diff::diff,
    error::Result,
    model::{ChangeType, ListingRecord},
    normalize::normalize,
    progress::Progress,
    scrape::{collect_listings, QueryReport},
    store::{self, SheetStore},
};

/// Summary of what a run fetched, found and wrote.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub queries: usize,
    pub queries_ok: usize,
    pub queries_failed: usize,
    /// Listing rows across all exports, before dedup
    pub rows_fetched: usize,
    pub unique_listings: usize,
    pub previous_size: usize,
    pub snapshot_size: usize,
    pub added: usize,
    pub price_changes: usize,
    pub status_changes: usize,
    pub removed: usize,
    /// False when nothing was written (every query failed)
    pub persisted: bool,
    pub reports: Vec<QueryReport>,
}

impl RunSummary {
    pub fn changes(&self) -> usize {
        self.added + self.price_changes + self.status_changes + self.removed
    }
}

/// Top-level runner: build the query list, then run it.
/// A bad query setup fails here, before any request goes out.
pub fn run(
    opts: &AppOptions,
    fetcher: &dyn Fetch,
    store: &mut dyn SheetStore,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary> {
    let queries = opts.queries.resolve()?;
    logf!("{} search queries", queries.len());
    run_queries(&queries, fetcher, store, &opts.scrape, progress, Utc::now())
}

/// Fetch → normalize → diff against the stored snapshot → write back.
///
/// Writes, in order: raw export archive (replace), snapshot (replace),
/// change log (append). When not a single query succeeded nothing is
/// written: an outage must not read as every listing leaving the market.
pub fn run_queries(
    queries: &[String],
    fetcher: &dyn Fetch,
    store: &mut dyn SheetStore,
    scrape: &ScrapeOptions,
    progress: Option<&mut dyn Progress>,
    now: DateTime<Utc>,
) -> Result<RunSummary> {
    let outcome = collect_listings(queries, fetcher, scrape, progress)?;
    let current: Vec<ListingRecord> = outcome.listings.iter().map(normalize).collect();
    let previous = store::load_snapshot(store);

    let mut summary = RunSummary {
        started_at: now,
        queries: queries.len(),
        queries_ok: queries.len() - outcome.failed(),
        queries_failed: outcome.failed(),
        rows_fetched: outcome.fetched,
        unique_listings: current.len(),
        previous_size: previous.len(),
        snapshot_size: previous.len(),
        added: 0,
        price_changes: 0,
        status_changes: 0,
        removed: 0,
        persisted: false,
        reports: outcome.reports,
    };

    if summary.queries_ok == 0 {
        loge!("all {} queries failed - snapshot left untouched", summary.queries);
        return Ok(summary);
    }

    let d = diff(&previous, &current, now);

    store::save_raw_feed(store, &outcome.slices)?;
    store::save_snapshot(store, &d.merged)?;
    store::append_changes(store, &d.changes, now)?;

    summary.snapshot_size = d.merged.len();
    summary.added = d.count(ChangeType::Added);
    summary.price_changes = d.count(ChangeType::PriceChange);
    summary.status_changes = d.count(ChangeType::StatusChange);
    summary.removed = d.count(ChangeType::RemovedFromMarket);
    summary.persisted = true;

    logf!(
        "wrote snapshot ({} rows), logged {} changes",
        summary.snapshot_size,
        summary.changes()
    );
    Ok(summary)
}
