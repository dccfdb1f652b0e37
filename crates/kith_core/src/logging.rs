//! File logging bootstrap for the core crate.
//!
//! # Responsibility
//! - Start rolling file logs at most once per process.
//! - Keep every emitted event metadata-only; journal content never
//!   reaches a log line.
//!
//! # Invariants
//! - A second call with the same configuration is a no-op.
//! - A second call with a different configuration is rejected.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::info;
use once_cell::sync::OnceCell;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "kith";
const ROTATE_AT_BYTES: u64 = 2 * 1024 * 1024;
const KEEP_LOG_FILES: usize = 4;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();

struct ActiveLogging {
    level: String,
    directory: PathBuf,
    _handle: LoggerHandle,
}

/// Failure to bring up or reconfigure logging.
#[derive(Debug)]
pub enum LoggingError {
    /// Level is not one of trace|debug|info|warn|error.
    UnknownLevel { level: String },
    /// Target directory is empty or not absolute.
    BadDirectory { directory: PathBuf },
    /// Logging is already active with a different configuration.
    AlreadyActive { level: String, directory: PathBuf },
    /// The logger backend could not start.
    Backend { message: String },
}

impl Display for LoggingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownLevel { level } => write!(
                f,
                "unknown log level `{level}`; expected trace|debug|info|warn|error"
            ),
            Self::BadDirectory { directory } => write!(
                f,
                "log directory `{}` must be a non-empty absolute path",
                directory.display()
            ),
            Self::AlreadyActive { level, directory } => write!(
                f,
                "logging is already active at `{}` with level `{level}`",
                directory.display()
            ),
            Self::Backend { message } => write!(f, "logger setup failed: {message}"),
        }
    }
}

impl Error for LoggingError {}

/// Starts file logging under `log_dir` at `level`.
///
/// Repeating the call with an identical configuration succeeds without
/// side effects; any conflicting repeat is rejected. Never panics.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<(), LoggingError> {
    let level = canonical_level(level)?;
    if log_dir.as_os_str().is_empty() || !log_dir.is_absolute() {
        return Err(LoggingError::BadDirectory {
            directory: log_dir.to_path_buf(),
        });
    }

    let active = ACTIVE.get_or_try_init(|| start_backend(&level, log_dir))?;
    if active.level != level || active.directory != log_dir {
        return Err(LoggingError::AlreadyActive {
            level: active.level.clone(),
            directory: active.directory.clone(),
        });
    }
    Ok(())
}

/// Returns `(level, directory)` while logging is active.
pub fn logging_status() -> Option<(String, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.level.clone(), active.directory.clone()))
}

/// Default log level for the current build mode.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_backend(level: &str, directory: &Path) -> Result<ActiveLogging, LoggingError> {
    std::fs::create_dir_all(directory).map_err(|err| LoggingError::Backend {
        message: format!("cannot create `{}`: {err}", directory.display()),
    })?;

    let handle = Logger::try_with_str(level)
        .and_then(|logger| {
            logger
                .log_to_file(
                    FileSpec::default()
                        .directory(directory)
                        .basename(LOG_BASENAME),
                )
                .rotate(
                    Criterion::Size(ROTATE_AT_BYTES),
                    Naming::Numbers,
                    Cleanup::KeepLogFiles(KEEP_LOG_FILES),
                )
                .append()
                .write_mode(WriteMode::BufferAndFlush)
                .format_for_files(flexi_logger::detailed_format)
                .start()
        })
        .map_err(|err| LoggingError::Backend {
            message: err.to_string(),
        })?;

    info!(
        "event=logging_started level={level} dir={} version={}",
        directory.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        level: level.to_string(),
        directory: directory.to_path_buf(),
        _handle: handle,
    })
}

fn canonical_level(level: &str) -> Result<String, LoggingError> {
    let normalized = level.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(normalized),
        "warning" => Ok("warn".to_string()),
        _ => Err(LoggingError::UnknownLevel {
            level: level.to_string(),
        }),
    }
}
