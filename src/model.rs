// src/model.rs
//
// Listing data as it moves through the pipeline:
//
//   export rows ─map→ RawListing ─normalize→ ListingRecord ─diff→ SnapshotEntry + ChangeEvent
//
// Numeric fields that feed the content hash are parsed; descriptive fields
// stay as the export wrote them.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// One export row after column mapping, before canonicalization.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawListing {
    pub mls_id: String,
    pub url: String,
    pub address: String,
    pub price: Option<f64>,
    pub status: String,
    pub dom: String,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub sqft: Option<f64>,
    pub lot_sqft: String,
    pub year_built: String,
    pub lat: String,
    pub lon: String,
    pub agent_name: String,
    pub brokerage: String,
    /// Query this row was fetched from
    pub source_query: String,
}

impl RawListing {
    /// Key used to collapse the same listing seen by several queries.
    pub fn dedup_key(&self) -> &str {
        if !self.url.is_empty() { &self.url } else { &self.address }
    }
}

/// Canonical listing.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ListingRecord {
    pub mls_id: String,
    pub listing_url: String,
    pub address: String,
    pub price: Option<f64>,
    pub status: String,
    pub dom: String,
    pub beds: Option<f64>,
    pub baths: Option<f64>,
    pub sqft: Option<f64>,
    pub lot_sqft: String,
    pub year_built: String,
    pub lat: String,
    pub lon: String,
    pub agent_name: String,
    pub brokerage: String,
    pub record_hash: String,
}

impl ListingRecord {
    /// First non-empty of mls_id, listing_url, address. "" if none.
    pub fn identity_key(&self) -> &str {
        [&self.mls_id, &self.listing_url, &self.address]
            .into_iter()
            .find(|s| !s.is_empty())
            .map(|s| s.as_str())
            .unwrap_or("")
    }

    /// Blank status counts as Active.
    pub fn is_active(&self) -> bool {
        self.status.is_empty() || self.status.eq_ignore_ascii_case("Active")
    }
}

/// A listing as held in the snapshot.
///
/// Entries produced by `diff::diff` always carry all three timestamps;
/// entries read back from storage may have blanks.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct SnapshotEntry {
    pub record: ListingRecord,
    pub first_seen: Option<DateTime<Utc>>,
    pub last_seen: Option<DateTime<Utc>>,
    pub last_change_at: Option<DateTime<Utc>>,
}

impl SnapshotEntry {
    pub fn key(&self) -> &str { self.record.identity_key() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    Added,
    PriceChange,
    StatusChange,
    RemovedFromMarket,
}

impl ChangeType {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Added => "added",
            ChangeType::PriceChange => "price_change",
            ChangeType::StatusChange => "status_change",
            ChangeType::RemovedFromMarket => "removed_from_market",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChangeEvent {
    pub change_type: ChangeType,
    pub old: Option<ListingRecord>,
    pub new: Option<ListingRecord>,
    pub mls_id: String,
    pub listing_url: String,
    pub address: String,
}

impl ChangeEvent {
    /// Key fields are copied from `keyed` (new side, or old side for removals).
    pub fn new(
        change_type: ChangeType,
        old: Option<ListingRecord>,
        new: Option<ListingRecord>,
        keyed: &ListingRecord,
    ) -> Self {
        Self {
            change_type,
            mls_id: keyed.mls_id.clone(),
            listing_url: keyed.listing_url.clone(),
            address: keyed.address.clone(),
            old,
            new,
        }
    }
}

/// Raw rows (header included) of one query's export, kept for the archive.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExportSlice {
    pub query: String,
    pub term: String,
    pub rows: Vec<Vec<String>>,
}
