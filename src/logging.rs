//! Logging to a file through tracing.

use std::path::{Path, PathBuf};

use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log file, relative to the working directory.
pub const DEFAULT_LOG_FILE: &str = "gradient-range.log";

/// Environment variable holding full filter directives; overrides `--log-level`.
pub const LOG_ENV: &str = "GRADIENT_RANGE_LOG";

/// Filter directives for `level`: this crate at `level`, dependencies at `warn`.
pub fn filter_directives(level: &str) -> String {
    format!("warn,gradient_range={level}")
}

/// Directory and file name for the log. A path naming an existing directory
/// gets the default file name inside it.
pub fn log_target(log_path: Option<&Path>) -> (PathBuf, String) {
    let Some(path) = log_path else {
        return (PathBuf::from("."), DEFAULT_LOG_FILE.to_string());
    };
    if path.is_dir() {
        return (path.to_path_buf(), DEFAULT_LOG_FILE.to_string());
    }

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());
    (dir, file)
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(filter_directives(level)))
        .unwrap_or_else(|_| EnvFilter::new(filter_directives("info")))
}

/// Initialize tracing with file output.
///
/// Logs go to a file so they never interleave with the terminal UI or with
/// report output on stdout. Missing directories are created. The returned
/// guard must be held until exit; dropping it flushes remaining logs.
///
/// In debug builds span enter/close events are recorded as well.
pub fn init_logging(
    log_path: Option<&Path>,
    level: Option<&str>,
) -> Result<WorkerGuard, InitError> {
    let (dir, file) = log_target(log_path);
    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file)
        .build(dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_level(true)
        .with_thread_ids(false);

    #[cfg(debug_assertions)]
    let file_layer = {
        use tracing_subscriber::fmt::format::FmtSpan;
        file_layer.with_span_events(FmtSpan::ENTER | FmtSpan::CLOSE)
    };

    tracing_subscriber::registry()
        .with(build_filter(level.unwrap_or("info")))
        .with(file_layer)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_the_working_directory() {
        assert_eq!(
            log_target(None),
            (PathBuf::from("."), DEFAULT_LOG_FILE.to_string())
        );
        assert_eq!(
            log_target(Some(Path::new("run.log"))),
            (PathBuf::from("."), "run.log".to_string())
        );
    }

    #[test]
    fn nested_path_splits_into_dir_and_file() {
        assert_eq!(
            log_target(Some(Path::new("logs/today/run.log"))),
            (PathBuf::from("logs/today"), "run.log".to_string())
        );
    }

    #[test]
    fn directory_gets_default_file_name() {
        let dir = std::env::temp_dir();
        assert_eq!(
            log_target(Some(&dir)),
            (dir.clone(), DEFAULT_LOG_FILE.to_string())
        );
    }

    #[test]
    fn level_applies_to_this_crate_only() {
        assert_eq!(filter_directives("debug"), "warn,gradient_range=debug");
        assert!(EnvFilter::try_new(filter_directives("trace")).is_ok());
    }
}
