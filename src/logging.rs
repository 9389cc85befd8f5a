//! Log initialization.
//!
//! The terminal belongs to the game while it runs, so records go to a file.
//! Level and style come from the environment, falling back to `trace` in
//! debug builds and `info` in release builds.

use anyhow::{Context, Result};
use env_logger::fmt::Formatter;
use env_logger::{Target, WriteStyle};
use log::Record;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default log level for debug compilations.
const DEBUG_LOG_LEVEL: &str = "trace";

/// Default log level for release compilations.
const RELEASE_LOG_LEVEL: &str = "info";

/// Environment variable for log level setting.
const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

const LOG_FILE: &str = "snake_arcade.log";

/// Default log file inside the application data directory
pub fn default_log_path() -> Result<PathBuf> {
    Ok(crate::store::data_dir()?.join(LOG_FILE))
}

/// Install the global logger writing to `path`. Call once from the binary.
pub fn init_logger(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {:?}", parent))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {:?}", path))?;

    let log_level = match cfg!(debug_assertions) {
        true => DEBUG_LOG_LEVEL,
        false => RELEASE_LOG_LEVEL,
    };

    env_logger::Builder::from_env(env_logger::Env::default().filter_or(LOG_LEVEL_ENV, log_level))
        .format(format)
        .write_style(WriteStyle::Never)
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Logger already initialized")?;

    Ok(())
}

/// Logging output format: unix seconds, level, module, message.
fn format(buf: &mut Formatter, record: &Record<'_>) -> io::Result<()> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    writeln!(
        buf,
        "{}\t{}\t{}\t{}",
        secs,
        record.level(),
        record.target(),
        record.args()
    )
}
