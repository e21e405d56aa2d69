// src/config/consts.rs

// Net config
pub const SITE_REFERER: &str = "https://www.redfin.com/";
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/118 Safari/537.36";
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Path fragment of the site's "Download All" export endpoint.
pub const EXPORT_API_FRAGMENT: &str = "stingray/api/gis-csv";
pub const EXPORT_SEP: char = ',';

// Queries
pub const TERM_PLACEHOLDER: &str = "{TERM}";
pub const ZIP_PLACEHOLDER: &str = "{ZIP}";
pub const DEFAULT_BASE_URL: &str = "https://www.redfin.com/zipcode/{ZIP}/filter/property-type=house+multifamily,remarks={TERM},include=forsale+fsbo,status=active";
pub const DEFAULT_ZIPS: &[&str] = &["38104", "38111", "38117", "38109", "38127"];
pub const DEFAULT_TERMS: &[&str] = &[
    "seller financing",
    "owner financing",
    "owner will carry",
    "seller will carry",
    "OWC",
    "contract for deed",
    "wraparound mortgage",
    "wrap mortgage",
    "assumable",
    "assume loan",
    "assume mortgage",
    "subject to",
    "no bank qualifying",
    "no qualifying",
    "easy qualifying",
    "flexible terms",
    "creative financing",
    "carryback",
    "seller carryback",
    "private financing",
    "owner terms",
    "seller terms",
    "motivated",
    "motivated seller",
    "must sell",
    "need to sell",
    "priced to sell",
];

// Local store
pub const STORE_DIR: &str = ".store";
pub const STORE_SEP: char = ',';
pub const TAB_LIVE_FEED: &str = "live_feed";
pub const TAB_CHANGES_LOG: &str = "changes_log";
pub const TAB_RAW_FEED: &str = "raw_feed";

// Scrape
pub const REQUEST_PAUSE_MS: u64 = 350; // be polite, one query at a time
