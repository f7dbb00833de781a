//! File logging for the terminal app
//!
//! Logging stays off unless `POKEDEX_LOG` is set, since anything written to
//! stderr would draw over the UI. The variable names either a log file, which
//! is appended to, or a directory, which gets one `pokedex.{pid}.log` per run.
//! Verbosity comes from `RUST_LOG` (default `info`). Fetch spans are logged
//! when they close, so each line carries the fetch kind and its duration.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file or directory
pub const LOG_ENV: &str = "POKEDEX_LOG";

const DEFAULT_FILTER: &str = "info";

/// Install the file subscriber if `POKEDEX_LOG` is set.
///
/// Returns the file being written, or `None` when logging is off or the file
/// cannot be opened.
pub fn init_tracing() -> Option<PathBuf> {
    let target = std::env::var_os(LOG_ENV)?;
    let path = log_file_path(Path::new(&target), std::process::id());

    let file = match open_log_file(&path) {
        Ok(file) => file,
        Err(err) => {
            eprintln!("Warning: cannot open log file {}: {err}", path.display());
            return None;
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .init();
    Some(path)
}

/// Resolve the configured target to a file: directories get a per-process name
pub fn log_file_path(target: &Path, pid: u32) -> PathBuf {
    if target.is_dir() {
        target.join(format!("pokedex.{pid}.log"))
    } else {
        target.to_path_buf()
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}
