// src/core/sanitize.rs

/// Decode the handful of entities that show up inside href attributes.
/// `&amp;` goes last so `&amp;quot;` stays `&quot;`.
pub fn normalize_entities(s: &str) -> String {
    s.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

/// Undo JSON string escaping commonly seen around embedded URLs.
pub fn unescape_json_url(s: &str) -> String {
    s.replace("\\/", "/").replace("\\u0026", "&")
}

/// Numeric coercion for export cells: "$1,250,000" → 1250000, "2.5 ba" → 2.5.
/// Everything but digits and '.' is dropped. No digits → None (never 0).
pub fn to_number(cell: &str) -> Option<f64> {
    let kept: String = cell.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
    if !kept.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    kept.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Shortest display form; "" for None. 100.0 → "100", 2.5 → "2.5".
pub fn format_number(n: Option<f64>) -> String {
    match n {
        Some(v) => v.to_string(),
        None => s!(),
    }
}
