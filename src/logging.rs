//! Console and daily rolling file logging.
//!
//! Both sinks log at `INFO`. The file sink writes through a background worker; the
//! returned `WorkerGuard` flushes it on drop and must live as long as the process.

use std::path::{Path, PathBuf};
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Layer,
};

use crate::error::AppError;

const FALLBACK_PREFIX: &str = "rocket";

/// Installs the global logger.
///
/// # Arguments
/// - `log_file` - Base path of the log file, e.g. `logs/rocket-.log` rolls over into
///   `logs/rocket.2026-10-18.log`
///
/// # Returns
/// - `Ok(WorkerGuard)` - Guard of the file writer
/// - `Err(AppError)` - The log directory is not writable or a logger is already set
pub fn init(log_file: &Path) -> Result<WorkerGuard, AppError> {
    let location = LogFileLocation::from_path(log_file);

    let mut builder = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(location.prefix);
    if let Some(suffix) = location.suffix {
        builder = builder.filename_suffix(suffix);
    }
    let appender = builder.build(&location.directory)?;

    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(LevelFilter::INFO))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(writer)
                .with_filter(LevelFilter::INFO),
        )
        .try_init()
        .map_err(|e| AppError::LoggingErr(e.to_string()))?;

    Ok(guard)
}

/// Directory and file name parts of a rolling log file.
#[derive(Debug, PartialEq, Eq)]
struct LogFileLocation {
    directory: PathBuf,
    /// File stem with trailing separators removed; the appender adds its own `.`
    prefix: String,
    suffix: Option<String>,
}

impl LogFileLocation {
    fn from_path(path: &Path) -> Self {
        let directory = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map_or_else(|| PathBuf::from("."), Path::to_path_buf);

        let prefix = path
            .file_stem()
            .map(|stem| {
                stem.to_string_lossy()
                    .trim_end_matches(['-', '_', '.'])
                    .to_string()
            })
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| FALLBACK_PREFIX.to_string());

        let suffix = path
            .extension()
            .map(|extension| extension.to_string_lossy().to_string());

        Self {
            directory,
            prefix,
            suffix,
        }
    }
}
