// src/queries.rs
//
// Search query list construction.
// Nothing here runs on its own: callers build the list explicitly
// (see `QuerySource::resolve`) and hand it to the scrape loop.

use url::form_urlencoded;

use crate::config::consts::{TERM_PLACEHOLDER, ZIP_PLACEHOLDER};
use crate::error::{Error, Result};

// Left literal in a search term, on top of what form encoding keeps.
const TERM_KEEP: [(&str, &str); 5] = [("%21", "!"), ("%27", "'"), ("%28", "("), ("%29", ")"), ("%7E", "~")];

/// Trim, lowercase, percent-encode with spaces as '+'.
/// Inner whitespace is kept as typed; `! ' ( ) ~` stay literal.
/// Blank terms yield None.
pub fn encode_term(term: &str) -> Option<String> {
    let t = term.trim().to_lowercase();
    if t.is_empty() {
        return None;
    }
    let mut out: String = form_urlencoded::byte_serialize(t.as_bytes()).collect();
    for (escaped, literal) in TERM_KEEP {
        out = out.replace(escaped, literal);
    }
    Some(out)
}

/// Expand `base` over every (zip, term) pair, zip-major.
///
/// `{TERM}` is mandatory. `{ZIP}` is optional; without it `zips` is ignored
/// and each term yields one URL.
pub fn build_urls(base: &str, terms: &[String], zips: &[String]) -> Result<Vec<String>> {
    if !base.contains(TERM_PLACEHOLDER) {
        return Err(Error::MissingPlaceholder(s!(base)));
    }
    let encoded: Vec<String> = terms.iter().filter_map(|t| encode_term(t)).collect();

    let zips: Vec<Option<String>> = if base.contains(ZIP_PLACEHOLDER) {
        zips.iter()
            .map(|z| z.trim())
            .filter(|z| !z.is_empty())
            .map(|z| Some(form_urlencoded::byte_serialize(z.as_bytes()).collect()))
            .collect()
    } else {
        vec![None]
    };

    let mut urls = Vec::with_capacity(zips.len() * encoded.len());
    for zip in &zips {
        for term in &encoded {
            let mut url = base.replacen(TERM_PLACEHOLDER, term, 1);
            if let Some(z) = zip {
                url = url.replacen(ZIP_PLACEHOLDER, z, 1);
            }
            urls.push(url);
        }
    }
    Ok(urls)
}

/// Split a free-form list of URLs on `http(s)://` boundaries.
/// Commas inside filter paths (`remarks=a,status=active`) survive, which a
/// plain split on ',' would not.
pub fn parse_search_urls(raw: &str) -> Vec<String> {
    let lc = raw.to_ascii_lowercase();
    let starts: Vec<usize> = (0..lc.len())
        .filter(|&i| {
            let rest = &lc.as_bytes()[i..];
            rest.starts_with(b"http://") || rest.starts_with(b"https://")
        })
        .collect();

    let mut out = Vec::with_capacity(starts.len());
    for (n, &start) in starts.iter().enumerate() {
        let end = starts.get(n + 1).copied().unwrap_or(raw.len());
        let piece = raw[start..end].trim_matches(|c: char| c.is_whitespace() || c == ',' || c == ';');
        if !piece.is_empty() {
            out.push(s!(piece));
        }
    }
    out
}

/// The search term a query URL was built from (`remarks=...`), decoded.
/// Falls back to the URL itself.
pub fn query_term(url: &str) -> String {
    const KEY: &str = "remarks=";
    let lc = url.to_ascii_lowercase();
    let Some(pos) = lc.find(KEY) else { return s!(url) };

    let rest = &url[pos + KEY.len()..];
    let end = rest.find([',', '/', '&', '?', '#']).unwrap_or(rest.len());
    let decoded = form_urlencoded::parse(join!("t=", &rest[..end]).as_bytes())
        .next()
        .map(|(_, v)| v.into_owned())
        .unwrap_or_default();

    if decoded.trim().is_empty() { s!(url) } else { decoded }
}
