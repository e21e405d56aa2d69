// src/cli.rs
use std::{fs, path::PathBuf, time::Duration};

use clap::Parser;
use color_eyre::eyre::{eyre, Result, WrapErr};

use crate::{
    config::{
        consts::*,
        options::{AppOptions, QuerySource, ScrapeOptions, StoreOptions},
    },
    core::net::HttpFetcher,
    log,
    progress::Progress,
    queries::parse_search_urls,
    runner::{self, RunSummary},
    store::DirStore,
};

/// Fetch listing exports, diff them against the last snapshot, log what changed.
#[derive(Parser, Debug)]
#[command(name = "listing_watch", version, about)]
pub struct Args {
    /// Search page or export URL (repeatable). Replaces the template queries.
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,

    /// Several search URLs in one string; separators between them are optional
    #[arg(long, env = "SEARCH_URLS", value_name = "URLS")]
    pub search_urls: Option<String>,

    /// Query template; must contain {TERM}, may contain {ZIP}
    #[arg(long, value_name = "TEMPLATE")]
    pub base: Option<String>,

    /// Search term (repeatable)
    #[arg(long = "term", value_name = "TERM")]
    pub terms: Vec<String>,

    /// File with one search term per line ('#' starts a comment)
    #[arg(long, value_name = "FILE")]
    pub terms_file: Option<PathBuf>,

    /// ZIP code (repeatable, or comma separated)
    #[arg(long = "zip", value_name = "ZIP", value_delimiter = ',')]
    pub zips: Vec<String>,

    /// Directory holding live_feed, changes_log, raw_feed and debug.log
    #[arg(long, default_value = STORE_DIR)]
    pub store: PathBuf,

    /// Cookie header sent with every request
    #[arg(long, env = "SITE_COOKIE", hide_env_values = true)]
    pub cookie: Option<String>,

    /// Pause between queries
    #[arg(long, default_value_t = REQUEST_PAUSE_MS)]
    pub delay_ms: u64,

    /// Per-request timeout
    #[arg(long, default_value_t = HTTP_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Print the run summary as JSON
    #[arg(long)]
    pub json: bool,

    /// Print the resolved query list and exit
    #[arg(long)]
    pub list_queries: bool,

    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn to_options(&self) -> Result<AppOptions> {
        Ok(AppOptions {
            queries: self.query_source()?,
            scrape: ScrapeOptions {
                delay: Duration::from_millis(self.delay_ms),
                timeout: Duration::from_secs(self.timeout_secs),
                cookie: self.cookie.clone().filter(|c| !c.trim().is_empty()),
                ..ScrapeOptions::default()
            },
            store: StoreOptions { dir: self.store.clone() },
        })
    }

    /// Explicit URLs win; otherwise the template, with defaults for
    /// whatever was not given. An explicit value that holds no http(s) URL
    /// is an error, never a silent fall back to the default sweep.
    fn query_source(&self) -> Result<QuerySource> {
        let mut urls: Vec<String> = Vec::new();
        for raw in &self.urls {
            let found = parse_search_urls(raw);
            if found.is_empty() {
                return Err(eyre!("--url {:?} is not an http(s) URL", raw));
            }
            urls.extend(found);
        }
        if let Some(blob) = self.search_urls.as_deref().filter(|b| !b.trim().is_empty()) {
            let found = parse_search_urls(blob);
            if found.is_empty() {
                return Err(eyre!("SEARCH_URLS holds no http(s) URL: {:?}", blob));
            }
            urls.extend(found);
        }
        if !urls.is_empty() {
            return Ok(QuerySource::Urls(urls));
        }

        let mut terms = self.terms.clone();
        if let Some(path) = &self.terms_file {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("reading terms file {}", path.display()))?;
            terms.extend(
                text.lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty() && !l.starts_with('#'))
                    .map(String::from),
            );
        }
        if terms.is_empty() {
            terms = DEFAULT_TERMS.iter().map(|t| s!(*t)).collect();
        }
        let zips = if self.zips.is_empty() {
            DEFAULT_ZIPS.iter().map(|z| s!(*z)).collect()
        } else {
            self.zips.clone()
        };

        Ok(QuerySource::Template {
            base: self.base.clone().unwrap_or_else(|| s!(DEFAULT_BASE_URL)),
            terms,
            zips,
        })
    }
}

pub fn run() -> Result<()> {
    run_with(Args::parse())
}

pub fn run_with(args: Args) -> Result<()> {
    let opts = args.to_options()?;

    if args.list_queries {
        for q in opts.queries.resolve()? {
            println!("{}", q);
        }
        return Ok(());
    }

    log::init(&opts.store.dir, args.verbose)
        .wrap_err_with(|| format!("opening store {}", opts.store.dir.display()))?;

    let fetcher = HttpFetcher::new(&opts.scrape)?;
    let mut store = DirStore::new(&opts.store.dir);
    let mut progress = ConsoleProgress { quiet: args.json, done: 0, total: 0 };

    let summary = runner::run(&opts, &fetcher, &mut store, Some(&mut progress))?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    if !summary.persisted {
        return Err(eyre!("all {} queries failed; nothing written", summary.queries));
    }
    Ok(())
}

/* ---------------- Console output ---------------- */

struct ConsoleProgress {
    quiet: bool,
    done: usize,
    total: usize,
}

impl Progress for ConsoleProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
    }

    fn log(&mut self, msg: &str) {
        if !self.quiet { println!("{}", msg); }
    }

    fn item_done(&mut self, query: &str, rows: usize) {
        self.done += 1;
        if !self.quiet {
            println!("[{}/{}] OK: {} -> +{} rows", self.done, self.total, query, rows);
        }
    }

    fn item_failed(&mut self, query: &str, reason: &str) {
        self.done += 1;
        if !self.quiet {
            println!("[{}/{}] FAIL: {} -> {}", self.done, self.total, query, reason);
        }
    }
}

fn print_summary(s: &RunSummary) {
    println!();
    println!("queries:  {} ok, {} failed", s.queries_ok, s.queries_failed);
    println!("listings: {} fetched, {} unique", s.rows_fetched, s.unique_listings);
    if !s.persisted {
        println!("snapshot: unchanged ({} rows)", s.previous_size);
        return;
    }
    println!("snapshot: {} -> {} rows", s.previous_size, s.snapshot_size);
    println!(
        "changes:  {} added, {} price, {} status, {} removed",
        s.added, s.price_changes, s.status_changes, s.removed
    );
}
