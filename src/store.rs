// src/store.rs
//
// Persistence through a tab-oriented key-value interface.
//
// - SheetStore: read / replace / append rows of a named tab. Anything that
//   can do that (a directory of CSV files, memory, a remote spreadsheet)
//   can back a run.
// - live_feed:   current snapshot, full replace each run
// - changes_log: append-only change events
// - raw_feed:    raw export rows keyed by search term, full replace
//
// Reading the snapshot never fails the run: missing, empty or malformed
// data reads as an empty snapshot.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::config::consts::{STORE_SEP, TAB_CHANGES_LOG, TAB_LIVE_FEED, TAB_RAW_FEED};
use crate::core::HeaderIndex;
use crate::core::sanitize::{format_number, to_number};
use crate::error::Result;
use crate::file;
use crate::model::{ChangeEvent, ExportSlice, ListingRecord, SnapshotEntry};

pub const LIVE_FEED_HEADERS: [&str; 19] = [
    "mls_id", "listing_url", "address", "price", "status", "dom", "beds", "baths", "sqft",
    "lot_sqft", "year_built", "lat", "lon", "agent_name", "brokerage",
    "first_seen", "last_seen", "last_change_at", "record_hash",
];

pub const CHANGES_LOG_HEADERS: [&str; 9] = [
    "ts", "change_type", "mls_id", "listing_url", "address",
    "old_price", "new_price", "old_status", "new_status",
];

pub trait SheetStore {
    /// All rows of `tab`, or None if the tab does not exist.
    fn read_rows(&self, tab: &str) -> Result<Option<Vec<Vec<String>>>>;
    fn replace_rows(&mut self, tab: &str, rows: &[Vec<String>]) -> Result<()>;
    fn append_rows(&mut self, tab: &str, rows: &[Vec<String>]) -> Result<()>;
}

/* ---------------- Backends ---------------- */

/// One `<tab>.csv` per tab under a directory.
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path { &self.dir }

    pub fn tab_path(&self, tab: &str) -> PathBuf {
        self.dir.join(join!(&file::sanitize_tab_filename(tab), ".csv"))
    }
}

impl SheetStore for DirStore {
    fn read_rows(&self, tab: &str) -> Result<Option<Vec<Vec<String>>>> {
        Ok(file::read_rows(&self.tab_path(tab), STORE_SEP)?)
    }

    fn replace_rows(&mut self, tab: &str, rows: &[Vec<String>]) -> Result<()> {
        Ok(file::write_rows(&self.tab_path(tab), rows, STORE_SEP)?)
    }

    fn append_rows(&mut self, tab: &str, rows: &[Vec<String>]) -> Result<()> {
        Ok(file::append_rows(&self.tab_path(tab), rows, STORE_SEP)?)
    }
}

/// In-memory tabs.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    tabs: HashMap<String, Vec<Vec<String>>>,
}

impl MemStore {
    pub fn new() -> Self { Self::default() }
    pub fn tab(&self, tab: &str) -> Option<&[Vec<String>]> {
        self.tabs.get(tab).map(|v| v.as_slice())
    }
}

impl SheetStore for MemStore {
    fn read_rows(&self, tab: &str) -> Result<Option<Vec<Vec<String>>>> {
        Ok(self.tabs.get(tab).cloned())
    }

    fn replace_rows(&mut self, tab: &str, rows: &[Vec<String>]) -> Result<()> {
        self.tabs.insert(s!(tab), rows.to_vec());
        Ok(())
    }

    fn append_rows(&mut self, tab: &str, rows: &[Vec<String>]) -> Result<()> {
        self.tabs.entry(s!(tab)).or_default().extend_from_slice(rows);
        Ok(())
    }
}

/* ---------------- Timestamps ---------------- */

pub fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim()).ok().map(|d| d.with_timezone(&Utc))
}

fn format_opt_ts(ts: Option<DateTime<Utc>>) -> String {
    ts.map(format_ts).unwrap_or_default()
}

/* ---------------- live_feed ---------------- */

pub fn snapshot_to_rows(entries: &[SnapshotEntry]) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(entries.len() + 1);
    rows.push(LIVE_FEED_HEADERS.iter().map(|h| s!(*h)).collect());
    for e in entries {
        let r = &e.record;
        rows.push(vec![
            r.mls_id.clone(),
            r.listing_url.clone(),
            r.address.clone(),
            format_number(r.price),
            r.status.clone(),
            r.dom.clone(),
            format_number(r.beds),
            format_number(r.baths),
            format_number(r.sqft),
            r.lot_sqft.clone(),
            r.year_built.clone(),
            r.lat.clone(),
            r.lon.clone(),
            r.agent_name.clone(),
            r.brokerage.clone(),
            format_opt_ts(e.first_seen),
            format_opt_ts(e.last_seen),
            format_opt_ts(e.last_change_at),
            r.record_hash.clone(),
        ]);
    }
    rows
}

/// Header-keyed rows back into entries.
/// None when the header has no identity column at all (not a snapshot).
/// Rows without any identity value are skipped.
pub fn snapshot_from_rows(rows: &[Vec<String>]) -> Option<Vec<SnapshotEntry>> {
    let Some((header, body)) = rows.split_first() else { return Some(Vec::new()) };
    let h = HeaderIndex::new(header);
    if h.get("mls_id").is_none() && h.get("listing_url").is_none() && h.get("address").is_none() {
        return None;
    }

    let entries = body
        .iter()
        .map(|row| {
            let cell = |name: &str| s!(HeaderIndex::cell(row, h.get(name)));
            let num = |name: &str| to_number(HeaderIndex::cell(row, h.get(name)));
            let ts = |name: &str| parse_ts(HeaderIndex::cell(row, h.get(name)));
            SnapshotEntry {
                record: ListingRecord {
                    mls_id: cell("mls_id"),
                    listing_url: cell("listing_url"),
                    address: cell("address"),
                    price: num("price"),
                    status: cell("status"),
                    dom: cell("dom"),
                    beds: num("beds"),
                    baths: num("baths"),
                    sqft: num("sqft"),
                    lot_sqft: cell("lot_sqft"),
                    year_built: cell("year_built"),
                    lat: cell("lat"),
                    lon: cell("lon"),
                    agent_name: cell("agent_name"),
                    brokerage: cell("brokerage"),
                    record_hash: cell("record_hash"),
                },
                first_seen: ts("first_seen"),
                last_seen: ts("last_seen"),
                last_change_at: ts("last_change_at"),
            }
        })
        .filter(|e| !e.key().is_empty())
        .collect();
    Some(entries)
}

/// Previous snapshot. Absent, unreadable or malformed → empty.
pub fn load_snapshot(store: &dyn SheetStore) -> Vec<SnapshotEntry> {
    let rows = match store.read_rows(TAB_LIVE_FEED) {
        Ok(Some(rows)) => rows,
        Ok(None) => {
            logf!("no previous {} - starting fresh", TAB_LIVE_FEED);
            return Vec::new();
        }
        Err(e) => {
            loge!("reading {} failed, treating as empty: {}", TAB_LIVE_FEED, e);
            return Vec::new();
        }
    };
    match snapshot_from_rows(&rows) {
        Some(entries) => entries,
        None => {
            logw!("{} has no identity columns, treating as empty", TAB_LIVE_FEED);
            Vec::new()
        }
    }
}

pub fn save_snapshot(store: &mut dyn SheetStore, entries: &[SnapshotEntry]) -> Result<()> {
    store.replace_rows(TAB_LIVE_FEED, &snapshot_to_rows(entries))
}

/* ---------------- changes_log ---------------- */

pub fn change_rows(changes: &[ChangeEvent], ts: DateTime<Utc>) -> Vec<Vec<String>> {
    let stamp = format_ts(ts);
    changes
        .iter()
        .map(|c| {
            let price = |r: &Option<ListingRecord>| format_number(r.as_ref().and_then(|r| r.price));
            let status = |r: &Option<ListingRecord>| r.as_ref().map(|r| r.status.clone()).unwrap_or_default();
            vec![
                stamp.clone(),
                s!(c.change_type.as_str()),
                c.mls_id.clone(),
                c.listing_url.clone(),
                c.address.clone(),
                price(&c.old),
                price(&c.new),
                status(&c.old),
                status(&c.new),
            ]
        })
        .collect()
}

/// Append events; the header row goes in first if the tab is new or empty.
pub fn append_changes(store: &mut dyn SheetStore, changes: &[ChangeEvent], ts: DateTime<Utc>) -> Result<()> {
    if changes.is_empty() {
        return Ok(());
    }
    let has_header = matches!(store.read_rows(TAB_CHANGES_LOG)?, Some(rows) if !rows.is_empty());
    if !has_header {
        let header: Vec<String> = CHANGES_LOG_HEADERS.iter().map(|h| s!(*h)).collect();
        store.append_rows(TAB_CHANGES_LOG, &[header])?;
    }
    store.append_rows(TAB_CHANGES_LOG, &change_rows(changes, ts))
}

/* ---------------- raw_feed ---------------- */

/// Data rows of every slice, each prefixed with its search term,
/// with a blank row between slices. Export header rows are not kept.
pub fn raw_feed_rows(slices: &[ExportSlice]) -> Vec<Vec<String>> {
    let mut out: Vec<Vec<String>> = Vec::new();
    for slice in slices {
        if slice.rows.len() <= 1 {
            continue;
        }
        if !out.is_empty() {
            out.push(Vec::new());
        }
        for row in &slice.rows[1..] {
            let mut r = Vec::with_capacity(row.len() + 1);
            r.push(slice.term.clone());
            r.extend(row.iter().cloned());
            out.push(r);
        }
    }
    out
}

/// Replace the archive. Nothing to archive → the previous archive stays.
pub fn save_raw_feed(store: &mut dyn SheetStore, slices: &[ExportSlice]) -> Result<()> {
    let rows = raw_feed_rows(slices);
    if rows.is_empty() {
        return Ok(());
    }
    store.replace_rows(TAB_RAW_FEED, &rows)
}
