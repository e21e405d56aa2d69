// src/core/header.rs
//
// Column lookup over an export's header row.
// Names are compared trimmed and upper-cased, so "Square Feet", " SQUARE FEET "
// and "square feet" are the same column.

use std::collections::HashMap;

#[derive(Clone, Debug, Default)]
pub struct HeaderIndex {
    /// Normalized names in column order
    names: Vec<String>,
    exact: HashMap<String, usize>,
}

fn norm(name: &str) -> String {
    name.trim().to_uppercase()
}

impl HeaderIndex {
    /// Build from the header row. On duplicate names the first column wins.
    pub fn new(headers: &[String]) -> Self {
        let names: Vec<String> = headers.iter().map(|h| norm(h)).collect();
        let mut exact = HashMap::with_capacity(names.len());
        for (i, n) in names.iter().enumerate() {
            exact.entry(n.clone()).or_insert(i);
        }
        Self { names, exact }
    }

    pub fn len(&self) -> usize { self.names.len() }
    pub fn is_empty(&self) -> bool { self.names.is_empty() }

    /// Exact (case-insensitive) lookup.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.exact.get(&norm(name)).copied()
    }

    /// First candidate with an exact match wins.
    /// Failing that, the first header (in column order) that *contains* any
    /// candidate wins. That fallback is order-dependent, not a best match:
    /// with headers `["LOT SIZE", "SIZE"]`, `any(&["SIZE X", "SIZE"])` gets
    /// the exact `SIZE`, but `any(&["IZE"])` gets `LOT SIZE`.
    pub fn any(&self, candidates: &[&str]) -> Option<usize> {
        if let Some(i) = candidates.iter().find_map(|c| self.get(c)) {
            return Some(i);
        }
        let cands: Vec<String> = candidates
            .iter()
            .map(|c| norm(c))
            .filter(|c| !c.is_empty())
            .collect();
        self.names
            .iter()
            .position(|h| cands.iter().any(|c| h.contains(c.as_str())))
    }

    /// Trimmed cell at `idx`, or "" when the column is unknown or the row is short.
    pub fn cell<'r>(row: &'r [String], idx: Option<usize>) -> &'r str {
        idx.and_then(|i| row.get(i)).map(|s| s.trim()).unwrap_or("")
    }
}
