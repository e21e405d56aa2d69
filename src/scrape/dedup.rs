// src/scrape/dedup.rs
use std::collections::HashSet;

use crate::model::RawListing;

/// Collapse listings seen by several queries into one per key (URL, else address).
///
/// First occurrence in fetch order wins, so with a fixed query order the
/// surviving row (and its `source_query`) is deterministic.
pub fn dedup(listings: Vec<RawListing>) -> Vec<RawListing> {
    let mut seen: HashSet<String> = HashSet::with_capacity(listings.len());
    let mut out = Vec::with_capacity(listings.len());
    for l in listings {
        if seen.insert(s!(l.dedup_key())) {
            out.push(l);
        }
    }
    out
}
