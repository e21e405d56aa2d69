// src/scrape/mod.rs
mod scrape;
pub mod dedup;

pub use scrape::{collect_listings, fetch_export, QueryReport, ScrapeOutcome};
pub use dedup::dedup;
