//! File-targeted tracing setup so debug logs never corrupt the TUI.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::Level;

use crate::config::TermConfig;

/// Path to the log file we append to between runs.
pub(crate) fn log_file_path() -> PathBuf {
    std::env::temp_dir().join("neonterm.log")
}

/// Install the tracing subscriber when logging is requested. Logging is off by
/// default; stdout is reserved for the alternate-screen UI either way.
pub(crate) fn init_logging(config: &TermConfig) -> Result<()> {
    if !config.logs || config.no_logs {
        return Ok(());
    }
    let path = log_file_path();
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    // try_init so a second call (tests) is harmless.
    let _ = tracing_subscriber::fmt()
        .with_ansi(false)
        .with_max_level(Level::DEBUG)
        .with_writer(Arc::new(file))
        .try_init();
    tracing::debug!("=== neonterm started ===");
    Ok(())
}
