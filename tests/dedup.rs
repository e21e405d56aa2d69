// tests/dedup.rs
use listing_watch::model::RawListing;
use listing_watch::scrape::dedup;

fn listing(url: &str, address: &str, query: &str) -> RawListing {
    RawListing {
        url: url.into(),
        address: address.into(),
        source_query: query.into(),
        ..Default::default()
    }
}

#[test]
fn same_url_keeps_first_seen() {
    let out = dedup(vec![
        listing("https://x/home/1", "1 A St", "q1"),
        listing("https://x/home/2", "2 B St", "q1"),
        listing("https://x/home/1", "1 A St", "q2"),
    ]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].source_query, "q1");
    assert_eq!(out[1].url, "https://x/home/2");
}

#[test]
fn address_is_the_key_when_url_is_missing() {
    let out = dedup(vec![
        listing("", "1 A St", "q1"),
        listing("", "1 A St", "q2"),
        listing("", "2 B St", "q2"),
    ]);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].source_query, "q1");
}

#[test]
fn url_and_address_keys_do_not_mix() {
    // Same address, but one row has a URL: two different keys
    let out = dedup(vec![listing("https://x/home/1", "1 A St", "q1"), listing("", "1 A St", "q2")]);
    assert_eq!(out.len(), 2);
}
