// src/core/net.rs
// Outbound HTTP GET. Text bodies only (HTML search pages, CSV exports).

use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, COOKIE, REFERER, USER_AGENT};

use crate::config::options::ScrapeOptions;
use crate::error::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resource {
    Page,
    Export,
}

impl Resource {
    pub fn accept(self) -> &'static str {
        match self {
            Resource::Page => "text/html,application/xhtml+xml",
            Resource::Export => "text/csv,*/*;q=0.9",
        }
    }
    pub fn label(self) -> &'static str {
        match self {
            Resource::Page => "page",
            Resource::Export => "csv",
        }
    }
}

/// Anything that can turn a URL into text.
/// The scrape loop only talks to this; tests plug in canned responses.
pub trait Fetch {
    fn get_text(&self, url: &str, kind: Resource, referer: &str) -> Result<String>;
}

pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    cookie: Option<String>,
}

impl HttpFetcher {
    pub fn new(opts: &ScrapeOptions) -> Result<Self> {
        let client = Client::builder().timeout(opts.timeout).build()?;
        Ok(Self {
            client,
            user_agent: opts.user_agent.clone(),
            cookie: opts.cookie.clone().filter(|c| !c.trim().is_empty()),
        })
    }
}

impl Fetch for HttpFetcher {
    fn get_text(&self, url: &str, kind: Resource, referer: &str) -> Result<String> {
        let mut req = self
            .client
            .get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT, kind.accept())
            .header(REFERER, referer);
        if let Some(cookie) = &self.cookie {
            // session cookie passed through verbatim
            req = req.header(COOKIE, cookie.as_str());
        }

        let resp = req.send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status { what: kind.label(), status: status.as_u16(), url: s!(url) });
        }
        logd!("GET {} -> {}", url, status.as_u16());
        Ok(resp.text()?)
    }
}
