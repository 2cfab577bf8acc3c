//! Miscellaneous helper utilities.

use crate::models::Game;
use chrono::{NaiveDate, TimeZone};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

pub const LOG_FILE_NAME: &str = "mlb_odds.log";

/// Directory for the log file: `MLB_ODDS_LOG_DIR`, or the working directory.
pub fn log_dir() -> PathBuf {
    std::env::var("MLB_ODDS_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Non-blocking writer appending to `dir/mlb_odds.log`.
///
/// `tracing_appender::rolling` panics if it cannot open the file, so the
/// directory and file are opened here first.
pub fn file_writer(dir: &Path) -> std::io::Result<(NonBlocking, WorkerGuard)> {
    std::fs::create_dir_all(dir)?;
    std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(LOG_FILE_NAME))?;
    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    Ok(tracing_appender::non_blocking(appender))
}

/// Initialize `tracing` subscriber with env-based filter.
///
/// If `RUST_LOG` is not set, defaults to `info` level. Logs go to stderr so
/// tables printed on stdout stay clean, and to `mlb_odds.log` under
/// [`log_dir`]. The returned guard flushes the file on drop; hold it for the
/// life of the process.
pub fn init_logging() -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    let dir = log_dir();
    let (file_layer, guard) = match file_writer(&dir) {
        Ok((writer, guard)) => (
            Some(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(writer),
            ),
            Some(guard),
        ),
        Err(e) => {
            eprintln!(
                "Warning: could not open {}/{LOG_FILE_NAME} ({e}), file logging disabled",
                dir.display()
            );
            (None, None)
        }
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .init();
    guard
}

/// Keep games whose start falls on `date` as seen in `tz`.
pub fn games_on_date<Tz: TimeZone>(games: Vec<Game>, date: NaiveDate, tz: &Tz) -> Vec<Game> {
    games
        .into_iter()
        .filter(|g| g.commence_time.with_timezone(tz).date_naive() == date)
        .collect()
}
