// src/log.rs
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{
    fmt::{self, time::Uptime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

pub const LOG_FILE: &str = "debug.log";

/// Install the process-wide subscriber.
///
/// Two sinks:
/// - `<store_dir>/debug.log`, appended, crate events at DEBUG and above,
///   stamped with time elapsed since start.
/// - stderr, filtered by `RUST_LOG`, falling back to `warn` (`debug` when verbose).
///
/// Calling this twice is harmless; the second install is ignored.
pub fn init(store_dir: &Path, verbose: bool) -> io::Result<()> {
    fs::create_dir_all(store_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(store_dir.join(LOG_FILE))?;

    let file_layer = fmt::layer()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(Uptime::default())
        .with_filter(EnvFilter::new("listing_watch=debug"));

    let fallback = if verbose { "listing_watch=debug" } else { "warn" };
    let stderr_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(fallback));

    let stderr_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let _ = tracing_subscriber::registry()
        .with(file_layer)
        .with(stderr_layer)
        .try_init();
    Ok(())
}
