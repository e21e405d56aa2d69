// src/normalize.rs
use crate::core::sanitize::format_number;
use crate::model::{ListingRecord, RawListing};

pub const DEFAULT_STATUS: &str = "Active";
const HASH_SEP: &str = "|";

/// Canonicalize a mapped export row.
pub fn normalize(raw: &RawListing) -> ListingRecord {
    let status = if raw.status.trim().is_empty() { s!(DEFAULT_STATUS) } else { raw.status.clone() };
    let record_hash = record_hash(raw.price, &status, raw.beds, raw.baths, raw.sqft);

    ListingRecord {
        mls_id: raw.mls_id.clone(),
        listing_url: raw.url.clone(),
        address: raw.address.clone(),
        price: raw.price,
        status,
        dom: raw.dom.clone(),
        beds: raw.beds,
        baths: raw.baths,
        sqft: raw.sqft,
        lot_sqft: raw.lot_sqft.clone(),
        year_built: raw.year_built.clone(),
        lat: raw.lat.clone(),
        lon: raw.lon.clone(),
        agent_name: raw.agent_name.clone(),
        brokerage: raw.brokerage.clone(),
        record_hash,
    }
}

/// Content hash over the fields that count as a real change.
/// Agent, brokerage, coordinates etc. are left out so cosmetic refreshes of
/// the export do not show up as changes.
pub fn record_hash(
    price: Option<f64>,
    status: &str,
    beds: Option<f64>,
    baths: Option<f64>,
    sqft: Option<f64>,
) -> String {
    let parts = [
        format_number(price),
        s!(status),
        format_number(beds),
        format_number(baths),
        format_number(sqft),
    ];
    blake3::hash(parts.join(HASH_SEP).as_bytes()).to_hex().to_string()
}
