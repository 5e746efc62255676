//! Log setup for the terminal runner.
//!
//! The terminal is in raw mode while playing, so logs never go to stdout or
//! stderr: they are written to the configured file, or dropped entirely.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};

use crate::config::RunConfig;

/// Install the global `tracing` subscriber. Returns false if logging is off.
pub fn init(config: &RunConfig) -> Result<bool> {
    let Some(path) = &config.log_path else {
        return Ok(false);
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(config.env_filter()?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow!("installing log subscriber: {e}"))?;

    Ok(true)
}
