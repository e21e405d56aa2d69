// src/diff.rs
//
// Snapshot reconciliation: previous snapshot + this run's listings
// → new snapshot + change events.
//
// Invariants:
// - first_seen is set on first observation and only carried afterwards.
// - last_seen is `now` for every listing present in this run.
// - last_change_at moves only when record_hash, status or price differ.
// - Listings that vanish are not carried into the new snapshot; they leave a
//   removed_from_market event, and only if they were still Active.
// - Diffing a snapshot against the same listings again yields no events.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use crate::model::{ChangeEvent, ChangeType, ListingRecord, SnapshotEntry};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diff {
    /// One entry per listing key in `current`, in `current` order
    pub merged: Vec<SnapshotEntry>,
    pub changes: Vec<ChangeEvent>,
}

impl Diff {
    pub fn count(&self, kind: ChangeType) -> usize {
        self.changes.iter().filter(|c| c.change_type == kind).count()
    }
}

/// Reconcile `current` against `previous` as of `now`.
///
/// Both sides are keyed by `ListingRecord::identity_key`; on duplicate keys
/// the first occurrence wins and rows with no key at all are skipped.
pub fn diff(previous: &[SnapshotEntry], current: &[ListingRecord], now: DateTime<Utc>) -> Diff {
    let mut prev: HashMap<&str, &SnapshotEntry> = HashMap::with_capacity(previous.len());
    for e in previous {
        let key = e.key();
        if !key.is_empty() {
            prev.entry(key).or_insert(e);
        }
    }

    let mut out = Diff::default();
    let mut seen: HashSet<&str> = HashSet::with_capacity(current.len());

    for rec in current {
        let key = rec.identity_key();
        if key.is_empty() {
            logw!("listing without mls id, url or address skipped");
            continue;
        }
        if !seen.insert(key) {
            continue;
        }

        let Some(p) = prev.get(key) else {
            out.merged.push(SnapshotEntry {
                record: rec.clone(),
                first_seen: Some(now),
                last_seen: Some(now),
                last_change_at: Some(now),
            });
            out.changes.push(ChangeEvent::new(ChangeType::Added, None, Some(rec.clone()), rec));
            continue;
        };

        let price_changed = p.record.price != rec.price;
        let status_changed = p.record.status != rec.status;
        let changed = price_changed || status_changed || p.record.record_hash != rec.record_hash;

        let last_change_at = if changed {
            now
        } else {
            p.last_change_at.or(p.first_seen).unwrap_or(now)
        };

        out.merged.push(SnapshotEntry {
            record: rec.clone(),
            first_seen: Some(p.first_seen.unwrap_or(now)),
            last_seen: Some(now),
            last_change_at: Some(last_change_at),
        });

        if price_changed {
            out.changes.push(ChangeEvent::new(
                ChangeType::PriceChange,
                Some(p.record.clone()),
                Some(rec.clone()),
                rec,
            ));
        }
        if status_changed {
            out.changes.push(ChangeEvent::new(
                ChangeType::StatusChange,
                Some(p.record.clone()),
                Some(rec.clone()),
                rec,
            ));
        }
    }

    let mut gone: HashSet<&str> = HashSet::new();
    for e in previous {
        let key = e.key();
        if key.is_empty() || seen.contains(key) || !gone.insert(key) {
            continue;
        }
        // only Active listings can leave the market; Pending/Sold stay quiet
        if e.record.is_active() {
            out.changes.push(ChangeEvent::new(
                ChangeType::RemovedFromMarket,
                Some(e.record.clone()),
                None,
                &e.record,
            ));
        }
    }

    logd!(
        "diff: {} previous, {} current, {} merged, {} changes",
        previous.len(),
        current.len(),
        out.merged.len(),
        out.changes.len()
    );
    out
}
