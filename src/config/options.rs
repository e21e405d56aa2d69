// src/config/options.rs
use std::path::PathBuf;
use std::time::Duration;

use super::consts::*;
use crate::error::{Error, Result};
use crate::queries;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AppOptions {
    pub queries: QuerySource,
    pub scrape: ScrapeOptions,
    pub store: StoreOptions,
}

/// Where the search query list comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuerySource {
    /// Explicit search-page or export URLs, used as given, in order.
    Urls(Vec<String>),
    /// Base template with `{TERM}` (and optionally `{ZIP}`) filled from lists.
    Template {
        base: String,
        terms: Vec<String>,
        zips: Vec<String>,
    },
}

impl Default for QuerySource {
    fn default() -> Self {
        Self::Template {
            base: s!(DEFAULT_BASE_URL),
            terms: DEFAULT_TERMS.iter().map(|t| s!(*t)).collect(),
            zips: DEFAULT_ZIPS.iter().map(|z| s!(*z)).collect(),
        }
    }
}

impl QuerySource {
    /// Build the ordered query list. Fails before any network activity
    /// when the template is unusable or nothing would be fetched.
    pub fn resolve(&self) -> Result<Vec<String>> {
        let urls = match self {
            QuerySource::Urls(v) => v
                .iter()
                .map(|u| u.trim())
                .filter(|u| !u.is_empty())
                .map(String::from)
                .collect(),
            QuerySource::Template { base, terms, zips } => queries::build_urls(base, terms, zips)?,
        };
        if urls.is_empty() {
            return Err(Error::NoQueries);
        }
        Ok(urls)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrapeOptions {
    /// Pause between consecutive queries
    pub delay: Duration,
    pub timeout: Duration,
    pub user_agent: String,
    /// Referer for the first fetch of each query
    pub referer: String,
    pub cookie: Option<String>,
    pub export_fragment: String,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(REQUEST_PAUSE_MS),
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            user_agent: s!(USER_AGENT),
            referer: s!(SITE_REFERER),
            cookie: None,
            export_fragment: s!(EXPORT_API_FRAGMENT),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreOptions {
    pub dir: PathBuf,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self { dir: PathBuf::from(STORE_DIR) }
    }
}
