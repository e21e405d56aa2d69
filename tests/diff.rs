// tests/diff.rs
//
// Snapshot reconciliation: events, timestamps, idempotence.
//
use chrono::{DateTime, TimeZone, Utc};

use listing_watch::diff::diff;
use listing_watch::model::{ChangeType, ListingRecord, RawListing, SnapshotEntry};
use listing_watch::normalize::normalize;

fn t(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, day, 12, 0, 0).unwrap()
}

fn rec(mls: &str, price: f64, status: &str) -> ListingRecord {
    normalize(&RawListing {
        mls_id: mls.into(),
        url: format!("https://www.redfin.com/home/{mls}"),
        address: format!("{mls} Main St"),
        price: Some(price),
        status: status.into(),
        beds: Some(3.0),
        ..Default::default()
    })
}

fn kinds(changes: &[listing_watch::model::ChangeEvent]) -> Vec<ChangeType> {
    changes.iter().map(|c| c.change_type).collect()
}

#[test]
fn empty_previous_means_everything_is_added() {
    let d = diff(&[], &[rec("A", 100.0, "Active"), rec("B", 200.0, "Active")], t(1));
    assert_eq!(kinds(&d.changes), vec![ChangeType::Added, ChangeType::Added]);
    assert_eq!(d.merged.len(), 2);
    for e in &d.merged {
        assert_eq!(e.first_seen, Some(t(1)));
        assert_eq!(e.last_seen, Some(t(1)));
        assert_eq!(e.last_change_at, Some(t(1)));
    }
    assert!(d.changes[0].old.is_none());
    assert_eq!(d.changes[0].mls_id, "A");
}

#[test]
fn same_listings_again_produce_no_events() {
    let current = vec![rec("A", 100.0, "Active"), rec("B", 200.0, "Pending")];
    let first = diff(&[], &current, t(1));
    let second = diff(&first.merged, &current, t(2));

    assert!(second.changes.is_empty());
    assert_eq!(second.merged.len(), 2);
    for e in &second.merged {
        assert_eq!(e.first_seen, Some(t(1)));
        assert_eq!(e.last_seen, Some(t(2)));
        assert_eq!(e.last_change_at, Some(t(1)));
    }
}

#[test]
fn price_change_moves_last_change_at() {
    let first = diff(&[], &[rec("A", 100.0, "Active")], t(1));
    let d = diff(&first.merged, &[rec("A", 90.0, "Active")], t(2));

    assert_eq!(kinds(&d.changes), vec![ChangeType::PriceChange]);
    let ev = &d.changes[0];
    assert_eq!(ev.old.as_ref().and_then(|r| r.price), Some(100.0));
    assert_eq!(ev.new.as_ref().and_then(|r| r.price), Some(90.0));

    let e = &d.merged[0];
    assert_eq!(e.first_seen, Some(t(1)));
    assert_eq!(e.last_change_at, Some(t(2)));
    assert_eq!(e.record.price, Some(90.0));
}

#[test]
fn price_and_status_change_emit_two_events() {
    let first = diff(&[], &[rec("A", 100.0, "Active")], t(1));
    let d = diff(&first.merged, &[rec("A", 95.0, "Pending")], t(2));
    assert_eq!(kinds(&d.changes), vec![ChangeType::PriceChange, ChangeType::StatusChange]);
}

#[test]
fn hash_only_change_is_silent_but_dated() {
    let first = diff(&[], &[rec("A", 100.0, "Active")], t(1));
    let mut bigger = rec("A", 100.0, "Active");
    bigger.beds = Some(4.0);
    bigger.record_hash = "different".into();

    let d = diff(&first.merged, &[bigger], t(2));
    assert!(d.changes.is_empty());
    assert_eq!(d.merged[0].last_change_at, Some(t(2)));
}

#[test]
fn active_listing_that_vanishes_is_removed() {
    let first = diff(&[], &[rec("A", 100.0, "Active"), rec("B", 200.0, "Active")], t(1));
    let d = diff(&first.merged, &[rec("A", 100.0, "Active")], t(2));

    assert_eq!(kinds(&d.changes), vec![ChangeType::RemovedFromMarket]);
    let ev = &d.changes[0];
    assert_eq!(ev.mls_id, "B");
    assert!(ev.new.is_none());
    assert_eq!(ev.old.as_ref().map(|r| r.mls_id.as_str()), Some("B"));
    // Not carried into the new snapshot
    assert_eq!(d.merged.len(), 1);
    assert_eq!(d.merged[0].key(), "A");
}

#[test]
fn non_active_listing_vanishes_quietly() {
    let first = diff(&[], &[rec("A", 100.0, "Pending"), rec("B", 100.0, "Sold")], t(1));
    let d = diff(&first.merged, &[], t(2));
    assert!(d.changes.is_empty());
    assert!(d.merged.is_empty());
}

#[test]
fn active_comparison_ignores_case() {
    let first = diff(&[], &[rec("A", 100.0, "ACTIVE")], t(1));
    let d = diff(&first.merged, &[], t(2));
    assert_eq!(kinds(&d.changes), vec![ChangeType::RemovedFromMarket]);
}

#[test]
fn key_falls_back_to_url_then_address() {
    let mut no_mls = rec("A", 100.0, "Active");
    no_mls.mls_id.clear();
    assert_eq!(no_mls.identity_key(), "https://www.redfin.com/home/A");

    let first = diff(&[], &[no_mls.clone()], t(1));
    let d = diff(&first.merged, &[no_mls.clone()], t(2));
    assert!(d.changes.is_empty());

    no_mls.listing_url.clear();
    assert_eq!(no_mls.identity_key(), "A Main St");
}

#[test]
fn duplicate_and_keyless_current_rows() {
    let mut keyless = rec("", 1.0, "Active");
    keyless.listing_url.clear();
    keyless.address.clear();

    let d = diff(
        &[],
        &[rec("A", 100.0, "Active"), rec("A", 50.0, "Active"), keyless],
        t(1),
    );
    assert_eq!(d.merged.len(), 1);
    assert_eq!(d.merged[0].record.price, Some(100.0));
    assert_eq!(d.count(ChangeType::Added), 1);
}

#[test]
fn stored_entries_without_timestamps() {
    let prev = vec![SnapshotEntry { record: rec("A", 100.0, "Active"), ..Default::default() }];
    let d = diff(&prev, &[rec("A", 100.0, "Active")], t(3));
    assert!(d.changes.is_empty());
    let e = &d.merged[0];
    assert_eq!(e.first_seen, Some(t(3)));
    assert_eq!(e.last_seen, Some(t(3)));
    assert_eq!(e.last_change_at, Some(t(3)));
}
