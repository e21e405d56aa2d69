// src/specs/export_link.rs
//! Finding the "Download All" export link in a search-results page.
//!
//! The site does not expose the link in one stable place. Depending on the
//! page build it shows up as a plain `href`, a redirecting download endpoint,
//! a `data-*` attribute on a button, a bare `.csv` link, single-quoted markup,
//! or only inside an inline JSON blob with escaped slashes.
//!
//! Each of those is one [`LinkStrategy`]. [`ExportLinkExtractor`] tries them
//! in a fixed order and takes the first hit. The order matters: the patterns
//! overlap, and a generic `.csv` link on the page (a sample file, a help
//! download) must not win over the real export endpoint.
//!
//! Order (`href` means any attribute ending in it, so `data-href` too):
//! 1. `href="…<fragment>…"`
//! 2. `href="…download…format=csv…"`
//! 3. `data-*="…<fragment tail>…"`
//! 4. `href="….csv…"`
//! 5. `href='…<fragment>…'`, then `href='….csv…'`
//! 6. `\/stingray\/api\/gis-csv…` inside JSON, unescaped
//!
//! `<fragment>` defaults to `stingray/api/gis-csv`; its tail is the last path
//! segment (`gis-csv`), which is what other `data-*` attributes carry.

use regex::Regex;
use url::Url;

use crate::core::sanitize::{normalize_entities, unescape_json_url};
use crate::error::Result;

/// One way of digging the export link out of a page.
pub trait LinkStrategy {
    fn name(&self) -> &str;
    /// Raw (possibly relative) link, or None if this pattern is absent.
    fn attempt(&self, html: &str) -> Option<String>;
}

/// Capture group 1 of an attribute match, with HTML entities decoded.
pub struct QuotedAttr {
    name: &'static str,
    re: Regex,
}

impl QuotedAttr {
    pub fn new(name: &'static str, pattern: &str) -> Result<Self> {
        Ok(Self { name, re: Regex::new(pattern)? })
    }
}

impl LinkStrategy for QuotedAttr {
    fn name(&self) -> &str { self.name }

    fn attempt(&self, html: &str) -> Option<String> {
        let caps = self.re.captures(html)?;
        let href = normalize_entities(caps.get(1)?.as_str().trim());
        if href.is_empty() { None } else { Some(href) }
    }
}

/// Whole match of a JSON-escaped path, with `\/` and `&` undone.
pub struct EscapedJson {
    re: Regex,
}

impl EscapedJson {
    pub fn new(fragment: &str) -> Result<Self> {
        let escaped = join!("\\/", &fragment.replace('/', "\\/"));
        let re = Regex::new(&format!(r#"(?i){}[^"'\s<>]*"#, regex::escape(&escaped)))?;
        Ok(Self { re })
    }
}

impl LinkStrategy for EscapedJson {
    fn name(&self) -> &str { "json-escaped-export-api" }

    fn attempt(&self, html: &str) -> Option<String> {
        self.re.find(html).map(|m| unescape_json_url(m.as_str()))
    }
}

pub struct ExportLinkExtractor {
    fragment: String,
    strategies: Vec<Box<dyn LinkStrategy>>,
    direct_csv: Regex,
}

// Any attribute ending in `href`: a `data-href` export button counts as much
// as an anchor.
const HREF_ATTR: &str = r"href\s*=\s*";

impl ExportLinkExtractor {
    pub fn new(fragment: &str) -> Result<Self> {
        let frag = regex::escape(fragment);
        let tail = regex::escape(fragment.rsplit('/').next().unwrap_or(fragment));

        let strategies: Vec<Box<dyn LinkStrategy>> = vec![
            Box::new(QuotedAttr::new(
                "href-export-api",
                &format!(r#"(?i){HREF_ATTR}"([^"]*?{frag}[^"]*)""#),
            )?),
            Box::new(QuotedAttr::new(
                "href-download-csv",
                &format!(r#"(?i){HREF_ATTR}"([^"]*?download[^"]+format=csv[^"]*)""#),
            )?),
            Box::new(QuotedAttr::new(
                "data-attr-export-api",
                &format!(r#"(?i)data-[a-z0-9_-]+\s*=\s*"([^"]*?{tail}[^"]*)""#),
            )?),
            Box::new(QuotedAttr::new(
                "href-dot-csv",
                &format!(r#"(?i){HREF_ATTR}"([^"]+\.csv[^"]*)""#),
            )?),
            Box::new(QuotedAttr::new(
                "single-quoted-export-api",
                &format!(r"(?i){HREF_ATTR}'([^']*?{frag}[^']*)'"),
            )?),
            Box::new(QuotedAttr::new(
                "single-quoted-dot-csv",
                &format!(r"(?i){HREF_ATTR}'([^']+\.csv[^']*)'"),
            )?),
            Box::new(EscapedJson::new(fragment)?),
        ];

        Ok(Self {
            fragment: fragment.to_ascii_lowercase(),
            strategies,
            direct_csv: Regex::new(r"(?i)\.csv\b")?,
        })
    }

    /// Append a lowest-priority fallback.
    pub fn push(&mut self, strategy: Box<dyn LinkStrategy>) {
        self.strategies.push(strategy);
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Absolute export URL from `html`, or None when every strategy misses.
    pub fn extract(&self, html: &str, base_url: &str) -> Option<String> {
        for strategy in &self.strategies {
            if let Some(href) = strategy.attempt(html) {
                logd!("export link via {}: {}", strategy.name(), href);
                return Some(absolutize(&href, base_url));
            }
        }
        None
    }

    /// True when the query already points at an export, so no page fetch is needed.
    pub fn is_direct_export(&self, url: &str) -> bool {
        url.to_ascii_lowercase().contains(&self.fragment) || self.direct_csv.is_match(url)
    }
}

/// Resolve `href` against `base`. On any parse failure, `href` comes back as-is.
pub fn absolutize(href: &str, base: &str) -> String {
    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| s!(href))
}
