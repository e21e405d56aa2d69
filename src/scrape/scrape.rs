// src/scrape/scrape.rs
use std::thread;

use serde::Serialize;

use crate::{
    config::{consts::EXPORT_SEP, options::ScrapeOptions},
    core::net::{Fetch, Resource},
    csv::parse_rows,
    error::{Error, Result},
    model::{ExportSlice, RawListing},
    progress::Progress,
    queries::query_term,
    specs::{export_link::ExportLinkExtractor, listings},
};

use super::dedup::dedup;

/// How one query went.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct QueryReport {
    pub query: String,
    pub ok: bool,
    pub rows: usize,
    pub error: Option<String>,
}

pub struct ScrapeOutcome {
    /// Deduplicated, in fetch order
    pub listings: Vec<RawListing>,
    /// Listing rows mapped across all queries, before dedup
    pub fetched: usize,
    /// Raw export rows per successful query, for the archive
    pub slices: Vec<ExportSlice>,
    pub reports: Vec<QueryReport>,
}

impl ScrapeOutcome {
    pub fn failed(&self) -> usize {
        self.reports.iter().filter(|r| !r.ok).count()
    }
}

/// Fetch every query in order, one at a time, pausing `opts.delay` between them.
///
/// A query that fails (HTTP status, transport, link not found, unusable
/// export) is logged and reported, then skipped; it never aborts the run.
/// Only an empty query list or a broken extractor setup is fatal.
pub fn collect_listings(
    queries: &[String],
    fetcher: &dyn Fetch,
    opts: &ScrapeOptions,
    mut progress: Option<&mut dyn Progress>,
) -> Result<ScrapeOutcome> {
    if queries.is_empty() {
        return Err(Error::NoQueries);
    }
    let extractor = ExportLinkExtractor::new(&opts.export_fragment)?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(queries.len());
    }

    let mut all: Vec<RawListing> = Vec::new();
    let mut slices = Vec::new();
    let mut reports = Vec::with_capacity(queries.len());

    for (i, query) in queries.iter().enumerate() {
        if i > 0 && !opts.delay.is_zero() {
            thread::sleep(opts.delay); // be polite
        }

        match fetch_export(query, fetcher, &extractor, opts) {
            Ok(rows) => {
                let mapped = listings::map_rows(&rows, query);
                logf!("OK: {} -> +{} rows", query, mapped.len());
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(query, mapped.len());
                }
                reports.push(QueryReport { query: query.clone(), ok: true, rows: mapped.len(), error: None });
                if rows.len() > 1 {
                    slices.push(ExportSlice { query: query.clone(), term: query_term(query), rows });
                }
                all.extend(mapped);
            }
            Err(e) => {
                let reason = e.to_string();
                logw!("FAIL: {} -> {}", query, reason);
                if let Some(p) = progress.as_deref_mut() {
                    p.item_failed(query, &reason);
                }
                reports.push(QueryReport { query: query.clone(), ok: false, rows: 0, error: Some(reason) });
            }
        }
    }

    let fetched = all.len();
    let listings = dedup(all);
    let line = format!("{} rows fetched, {} unique listings", fetched, listings.len());
    logf!("{}", line);

    if let Some(p) = progress.as_deref_mut() {
        p.log(&line);
        p.finish();
    }

    Ok(ScrapeOutcome { listings, fetched, slices, reports })
}

/// Rows of one query's export (header first).
///
/// Search pages take two fetches: the page (referer = site root), then the
/// export link found in it (referer = the page). A query that already is an
/// export URL takes one.
pub fn fetch_export(
    query: &str,
    fetcher: &dyn Fetch,
    extractor: &ExportLinkExtractor,
    opts: &ScrapeOptions,
) -> Result<Vec<Vec<String>>> {
    let text = if extractor.is_direct_export(query) {
        fetcher.get_text(query, Resource::Export, &opts.referer)?
    } else {
        let html = fetcher.get_text(query, Resource::Page, &opts.referer)?;
        let csv_url = extractor.extract(&html, query).ok_or(Error::LinkNotFound)?;
        fetcher.get_text(&csv_url, Resource::Export, query)?
    };

    let rows = parse_rows(&text, EXPORT_SEP);
    if let Some(header) = rows.first() {
        if !listings::has_listing_columns(header) {
            return Err(Error::UnrecognizedExport);
        }
    }
    Ok(rows)
}
