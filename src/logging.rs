use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "NUMDR_LOG";
pub const LOG_FILE: &str = "numdr.log";
const DEFAULT_FILTER: &str = "numdr=info";

/// Filter precedence: explicit override, then `NUMDR_LOG`, then the default.
pub fn build_filter(level_override: Option<&str>) -> Result<EnvFilter> {
    if let Some(directive) = level_override {
        return EnvFilter::try_new(directive)
            .map_err(|e| anyhow!("invalid log filter {directive:?}: {e}"));
    }
    Ok(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)))
}

/// Appends a separator with the start time so runs are easy to tell apart.
pub fn write_session_header(path: &Path) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{}\nnumdr session - {}\n{}",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    )?;
    Ok(())
}

/// Routes `tracing` output to `<log_dir>/numdr.log`. The terminal belongs to
/// the UI, so nothing is ever written to stdout or stderr.
pub fn init(log_dir: &Path, level_override: Option<&str>) -> Result<PathBuf> {
    fs::create_dir_all(log_dir)?;
    let path = log_dir.join(LOG_FILE);
    write_session_header(&path)?;

    let file = OpenOptions::new().create(true).append(true).open(&path)?;
    tracing_subscriber::fmt()
        .with_env_filter(build_filter(level_override)?)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install log subscriber: {e}"))?;
    Ok(path)
}
