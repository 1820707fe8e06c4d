use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use time::UtcOffset;
use time::macros::format_description;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{self, fmt, prelude::*};

const LOG_RETENTION_DAYS: u64 = 7;

/// How the process-wide subscriber should be set up.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Disable ANSI colors on stderr.
    pub no_color: bool,
    /// Filter directive for stderr; falls back to `RUST_LOG`, then `info`.
    pub log_level: Option<String>,
    /// Also write a DEBUG-level session log file.
    pub file_logging: bool,
    /// Where session logs go; defaults to the user cache directory.
    pub log_dir: Option<PathBuf>,
}

/// Get the log directory path in the user-specific OS cache directory
/// - Linux: ~/.cache/syntax-node/
/// - macOS: ~/Library/Caches/syntax-node/
/// - Windows: %LOCALAPPDATA%\syntax-node\
fn default_log_dir() -> io::Result<PathBuf> {
    let mut log_dir = dirs::cache_dir().ok_or_else(|| {
        io::Error::new(io::ErrorKind::NotFound, "Unable to determine user cache directory")
    })?;
    log_dir.push("syntax-node");
    Ok(log_dir)
}

/// Clean up session logs older than LOG_RETENTION_DAYS
fn cleanup_old_logs(log_dir: &Path) -> io::Result<()> {
    let now = std::time::SystemTime::now();
    let retention = std::time::Duration::from_secs(LOG_RETENTION_DAYS * 24 * 60 * 60);

    for entry in fs::read_dir(log_dir)?.flatten() {
        let Ok(metadata) = entry.metadata() else { continue };
        let is_session_log = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with("session-") && name.ends_with(".log"));
        if !metadata.is_file() || !is_session_log {
            continue;
        }
        let expired = metadata
            .modified()
            .ok()
            .and_then(|modified| now.duration_since(modified).ok())
            .is_some_and(|age| age > retention);
        if expired {
            if let Err(e) = fs::remove_file(entry.path()) {
                eprintln!("Failed to remove old log file {:?}: {}", entry.path(), e);
            }
        }
    }
    Ok(())
}

fn stderr_filter(log_level: Option<&str>) -> tracing_subscriber::EnvFilter {
    match log_level {
        Some(level) => tracing_subscriber::EnvFilter::new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
    }
}

/// Installs the global tracing subscriber.
///
/// The returned guard flushes the file writer on drop and must be kept alive for
/// the lifetime of the program. Calling this twice (e.g. from several tests) keeps
/// the first subscriber and is not an error.
pub fn init_logger(options: &LogOptions) -> io::Result<WorkerGuard> {
    let timer = fmt::time::OffsetTime::new(
        UtcOffset::UTC,
        format_description!(
            "[[[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z]"
        ),
    );

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_timer(timer.clone())
        .with_ansi(!options.no_color)
        .with_filter(stderr_filter(options.log_level.as_deref()));

    let (result, guard) = if options.file_logging {
        let log_dir = match &options.log_dir {
            Some(dir) => dir.clone(),
            None => default_log_dir()?,
        };
        fs::create_dir_all(&log_dir)?;
        cleanup_old_logs(&log_dir)?;

        let timestamp = time::OffsetDateTime::now_utc()
            .format(format_description!("[year][month][day]-[hour][minute][second]"))
            .map_err(io::Error::other)?;
        let log_path = log_dir.join(format!("session-{}-{}.log", timestamp, std::process::id()));
        let file = fs::OpenOptions::new().create(true).append(true).open(&log_path)?;

        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_timer(timer)
            .with_ansi(false)
            .with_filter(tracing_subscriber::EnvFilter::new("debug"));

        eprintln!("Logging to file: {:?}", log_path);
        let result = tracing_subscriber::registry()
            .with(stderr_layer)
            .with(file_layer)
            .try_init();
        (result, guard)
    } else {
        let (_, guard) = tracing_appender::non_blocking(std::io::sink());
        let result = tracing_subscriber::registry().with(stderr_layer).try_init();
        (result, guard)
    };

    match result {
        Ok(()) => Ok(guard),
        // Ignore errors due to the subscriber or logger already being set
        Err(e)
            if e.to_string().contains("already been set")
                || e.to_string().contains("SetLoggerError") =>
        {
            Ok(guard)
        }
        Err(e) => Err(io::Error::other(e)),
    }
}
