//! # Scraping "specs" module
//!
//! This module hosts the **site-specific reading rules**: where the ground
//! truth lives in what the listing site serves, and how to extract it robustly.
//!
//! ## What lives here
//! - **Export link discovery** in search-results HTML (`export_link`), as an
//!   ordered list of independent matcher strategies.
//! - **Export column mapping** (`listings`): CSV rows to `RawListing`, with
//!   tolerant header matching and numeric coercion.
//!
//! ## What does **not** live here
//! - **Networking**: `core::net` fetches, `scrape` decides when.
//! - **Canonicalization / hashing**: `normalize`.
//! - **Persistence and diffing**: `store`, `diff`.
//!
//! ## Typical call chain
//! ```text
//! runner → scrape::collect_listings → core::net (page)
//!                                   → specs::export_link::extract
//!                                   → core::net (csv) → csv::parse_rows
//!                                   → specs::listings::map_rows
//! ```
//!
//! ## Conventions & invariants
//! - **Case-insensitive** matching for tags, attributes and header names.
//! - Nothing here panics or errors on odd input; a miss is `None` or an
//!   empty list and the caller decides what that means.
//! - Testable **offline** against captured page/export text.
pub mod export_link;
pub mod listings;
