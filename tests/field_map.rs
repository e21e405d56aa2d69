// tests/field_map.rs
//
// Export rows → RawListing.
//
use listing_watch::specs::listings::{has_listing_columns, map_rows};

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

const URL_COL: &str =
    "URL (SEE https://www.redfin.com/buy-a-home/comparative-market-analysis FOR INFO ON PRICING)";

fn full_export() -> Vec<Vec<String>> {
    vec![
        row(&[
            "SALE TYPE", "MLS#", "ADDRESS", "CITY", "STATE OR PROVINCE", "ZIP OR POSTAL CODE",
            "PRICE", "BEDS", "BATHS", "SQUARE FEET", "LOT SIZE", "YEAR BUILT", "DAYS ON MARKET",
            "STATUS", URL_COL, "LATITUDE", "LONGITUDE",
        ]),
        row(&[
            "MLS Listing", "ML123", "12 Oak St", "Memphis", "TN", "38104",
            "$1,250,000", "3", "2.5", "1,800", "5,000", "1990", "12",
            "Active", "https://www.redfin.com/TN/Memphis/12-Oak-St-38104/home/1", "35.13", "-89.99",
        ]),
    ]
}

#[test]
fn maps_every_field() {
    let out = map_rows(&full_export(), "q1");
    assert_eq!(out.len(), 1);
    let l = &out[0];
    assert_eq!(l.mls_id, "ML123");
    assert_eq!(l.url, "https://www.redfin.com/TN/Memphis/12-Oak-St-38104/home/1");
    assert_eq!(l.address, "12 Oak St, Memphis, TN, 38104");
    assert_eq!(l.price, Some(1_250_000.0));
    assert_eq!(l.beds, Some(3.0));
    assert_eq!(l.baths, Some(2.5));
    assert_eq!(l.sqft, Some(1800.0));
    assert_eq!(l.lot_sqft, "5,000");
    assert_eq!(l.year_built, "1990");
    assert_eq!(l.dom, "12");
    assert_eq!(l.status, "Active");
    assert_eq!(l.lat, "35.13");
    assert_eq!(l.lon, "-89.99");
    assert_eq!(l.source_query, "q1");
}

#[test]
fn short_header_names_are_accepted() {
    let rows = vec![
        row(&["ADDRESS", "CITY", "STATE", "ZIP", "URL", "SQFT", "LAT", "LON"]),
        row(&["1 Elm", "Memphis", "TN", "38111", "/home/2", "900", "35.1", "-90.0"]),
    ];
    let l = &map_rows(&rows, "q")[0];
    assert_eq!(l.address, "1 Elm, Memphis, TN, 38111");
    assert_eq!(l.url, "/home/2");
    assert_eq!(l.sqft, Some(900.0));
    assert_eq!(l.lat, "35.1");
    assert_eq!(l.lon, "-90.0");
}

#[test]
fn missing_columns_and_bad_numbers_stay_empty() {
    let rows = vec![
        row(&["ADDRESS", "CITY", "PRICE"]),
        row(&["1 A St", "", "call agent"]),
    ];
    let l = &map_rows(&rows, "q")[0];
    assert_eq!(l.address, "1 A St");
    assert_eq!(l.price, None);
    assert_eq!(l.status, "");
    assert_eq!(l.url, "");
}

#[test]
fn rows_without_url_or_address_are_dropped() {
    let mut rows = full_export();
    rows.push(row(&[
        "MLS Listing", "ML999", "", "", "", "", "$1", "", "", "", "", "", "", "Active", "", "", "",
    ]));
    let out = map_rows(&rows, "q");
    assert_eq!(out.len(), 1);
    assert_eq!(out[0].mls_id, "ML123");
}

#[test]
fn header_only_export_maps_to_nothing() {
    assert!(map_rows(&full_export()[..1], "q").is_empty());
    assert!(map_rows(&[], "q").is_empty());
}

#[test]
fn listing_columns_check() {
    assert!(has_listing_columns(&full_export()[0]));
    assert!(has_listing_columns(&row(&["ADDRESS", "PRICE"])));
    assert!(!has_listing_columns(&row(&["<!DOCTYPE html><html>", "body"])));
}
