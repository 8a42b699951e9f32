//! Tracing setup.
//!
//! The TUI owns the terminal, so the interactive app logs to a file in the
//! platform data directory. Subcommands log to stderr.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use starfolio_config::Config;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "STARFOLIO_LOG";

/// Log file name inside the data directory.
pub const LOG_FILE: &str = "starfolio.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Log to `starfolio.log`. Returns the log path, or `None` when there is no
/// home directory to put it in, in which case nothing is logged.
pub fn init_file() -> color_eyre::Result<Option<PathBuf>> {
    let Some(dir) = Config::log_dir() else {
        return Ok(None);
    };
    fs::create_dir_all(&dir)?;
    let path = dir.join(LOG_FILE);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!(e))?;
    Ok(Some(path))
}

/// Log to stderr, keeping stdout for command output.
pub fn init_stderr() -> color_eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| eyre!(e))
}
