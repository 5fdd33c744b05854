//! Tracing setup.
//!
//! The terminal belongs to the UI, so log lines go to a file instead of
//! stdout/stderr.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

/// Filter directives for `level`, keeping HTTP internals quiet.
fn default_directives(level: &str) -> String {
    format!("{level},kaigi_feeder={level},hyper=warn,reqwest=warn")
}

/// Install the global subscriber writing to `file`.
///
/// `level` is the base level from config; `RUST_LOG` still overrides it.
pub fn init_logging(level: &str, file: &Path) -> Result<()> {
    if let Some(dir) = file.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("creating log directory {}", dir.display()))?;
    }
    let writer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file)
        .with_context(|| format!("opening log file {}", file.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_names(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("installing tracing subscriber: {e}"))?;
    Ok(())
}
