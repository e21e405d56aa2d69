// src/specs/listings.rs
//! Column mapping for the search export CSV.
//!
//! Header names drift between exports ("URL (SEE https://…)", "SQUARE FEET"
//! vs "SQFT", "LAT" vs "LATITUDE"), so everything goes through
//! [`HeaderIndex`]. Fields with a stable name use exact lookup; the drifting
//! ones use an any-of candidate list.

use crate::core::HeaderIndex;
use crate::core::sanitize::to_number;
use crate::model::RawListing;

const URL_HEADERS: &[&str] = &[
    "URL",
    "URL (REDFIN)",
    "URL (SEE LISTING)",
    "LISTING URL",
    "LINK",
    "PROPERTY URL",
];
const SQFT_HEADERS: &[&str] = &["SQUARE FEET", "SQFT"];
const LAT_HEADERS: &[&str] = &["LATITUDE", "LAT"];
const LON_HEADERS: &[&str] = &["LONGITUDE", "LON", "LONG"];

/// Resolved column positions for one export.
#[derive(Clone, Debug, Default)]
struct Columns {
    mls: Option<usize>,
    url: Option<usize>,
    street: Option<usize>,
    city: Option<usize>,
    state: Option<usize>,
    zip: Option<usize>,
    price: Option<usize>,
    status: Option<usize>,
    beds: Option<usize>,
    baths: Option<usize>,
    sqft: Option<usize>,
    dom: Option<usize>,
    lot: Option<usize>,
    year: Option<usize>,
    lat: Option<usize>,
    lon: Option<usize>,
    agent: Option<usize>,
    brokerage: Option<usize>,
}

impl Columns {
    fn resolve(h: &HeaderIndex) -> Self {
        Self {
            mls: h.get("MLS#"),
            url: h.any(URL_HEADERS),
            street: h.get("ADDRESS"),
            city: h.get("CITY"),
            state: h.get("STATE OR PROVINCE").or_else(|| h.get("STATE")),
            zip: h.get("ZIP OR POSTAL CODE").or_else(|| h.get("ZIP")),
            price: h.get("PRICE"),
            status: h.get("STATUS"),
            beds: h.get("BEDS"),
            baths: h.get("BATHS"),
            sqft: h.any(SQFT_HEADERS),
            dom: h.get("DAYS ON MARKET"),
            lot: h.get("LOT SIZE"),
            year: h.get("YEAR BUILT"),
            lat: h.any(LAT_HEADERS),
            lon: h.any(LON_HEADERS),
            agent: h.get("LISTING AGENT"),
            brokerage: h.get("BROKERAGE"),
        }
    }
}

/// Whether a header row can identify listings at all (URL or street address).
/// HTML login walls and error pages served as "CSV" fail this.
pub fn has_listing_columns(header: &[String]) -> bool {
    let h = HeaderIndex::new(header);
    h.any(URL_HEADERS).is_some() || h.get("ADDRESS").is_some()
}

/// Map export rows (`rows[0]` is the header) to listings tagged with `source_query`.
/// Rows with neither a URL nor any address part are dropped.
pub fn map_rows(rows: &[Vec<String>], source_query: &str) -> Vec<RawListing> {
    let Some((header, body)) = rows.split_first() else { return Vec::new() };
    let cols = Columns::resolve(&HeaderIndex::new(header));

    body.iter()
        .map(|r| map_row(r, &cols, source_query))
        .filter(|l| !l.url.is_empty() || !l.address.is_empty())
        .collect()
}

fn map_row(r: &[String], c: &Columns, source_query: &str) -> RawListing {
    let cell = |idx: Option<usize>| s!(HeaderIndex::cell(r, idx));
    let num = |idx: Option<usize>| to_number(HeaderIndex::cell(r, idx));

    let address = [c.street, c.city, c.state, c.zip]
        .into_iter()
        .map(|idx| HeaderIndex::cell(r, idx))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    RawListing {
        mls_id: cell(c.mls),
        url: cell(c.url),
        address,
        price: num(c.price),
        status: cell(c.status),
        dom: cell(c.dom),
        beds: num(c.beds),
        baths: num(c.baths),
        sqft: num(c.sqft),
        lot_sqft: cell(c.lot),
        year_built: cell(c.year),
        lat: cell(c.lat),
        lon: cell(c.lon),
        agent_name: cell(c.agent),
        brokerage: cell(c.brokerage),
        source_query: s!(source_query),
    }
}
