//! Logging setup for the `paddock` binary.
//!
//! The terminal belongs to the browser, so log output goes to a file
//! through a non-blocking `tracing-appender` writer.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::config::LogConfig;

/// Verbosity requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Errors only.
    Quiet,
    #[default]
    Normal,
    /// Debug and above.
    Verbose,
    Trace,
}

impl Verbosity {
    #[must_use]
    pub fn to_level(self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::INFO,
            Self::Verbose => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Default directive: our crates at `level`, everything else at warn.
fn default_directive(level: &str) -> String {
    format!("warn,paddock={level},paddock_core={level},paddock_tui={level}")
}

/// Install the global subscriber. `RUST_LOG` takes precedence over both
/// the flag and the config file.
///
/// Keep the returned guard alive until exit so buffered lines are flushed.
pub fn init_logging(verbosity: Option<Verbosity>, config: &LogConfig) -> Result<WorkerGuard> {
    let level = verbosity.map_or_else(|| config.level.clone(), |v| v.to_level().to_string());
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(&level.to_lowercase())))
        .with_context(|| format!("invalid log level {level:?}"))?;

    let (dir, file) = split_log_path(&config.file)?;
    let appender = tracing_appender::rolling::never(dir, file);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .compact(),
    );
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = subscriber.try_init();
    Ok(guard)
}

fn split_log_path(path: &Path) -> Result<(&Path, &std::ffi::OsStr)> {
    let file = path
        .file_name()
        .with_context(|| format!("log path {} has no file name", path.display()))?;
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    Ok((dir, file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(Verbosity::Quiet.to_level(), Level::ERROR);
        assert_eq!(Verbosity::default().to_level(), Level::INFO);
        assert_eq!(Verbosity::Trace.to_level(), Level::TRACE);
    }

    #[test]
    fn directive_scopes_our_crates() {
        let directive = default_directive("debug");
        assert!(directive.starts_with("warn,"));
        assert!(directive.contains("paddock_core=debug"));
        assert!(EnvFilter::try_new(directive).is_ok());
    }

    #[test]
    fn log_path_splits() {
        let (dir, file) = split_log_path(Path::new("paddock.log")).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(dir, Path::new("."));
        assert_eq!(file, "paddock.log");

        let (dir, _) = split_log_path(Path::new("/tmp/logs/paddock.log")).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(dir, Path::new("/tmp/logs"));

        assert!(split_log_path(Path::new("/")).is_err());
    }
}
