// src/error.rs
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /* ---------------- structural: abort before any network ---------------- */
    #[error("no search queries supplied")]
    NoQueries,

    #[error("base url template must include a {{TERM}} placeholder: {0}")]
    MissingPlaceholder(String),

    /* ---------------- per query: logged, query contributes nothing ---------------- */
    #[error("{what} {status}: {url}")]
    Status {
        what: &'static str,
        status: u16,
        url: String,
    },

    #[error("csv link not found in page")]
    LinkNotFound,

    #[error("export has no url or address column")]
    UnrecognizedExport,

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /* ---------------- local ---------------- */
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Pattern(#[from] regex::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Failures that only cost the current query its records.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Error::Status { .. } | Error::LinkNotFound | Error::UnrecognizedExport | Error::Http(_)
        )
    }
}
