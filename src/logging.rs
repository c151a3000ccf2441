//! Diagnostic logging to stderr (and optionally a file) via `tracing`.
//!
//! Verbosity maps `-v` counts onto levels: none → warn, 1 → info, 2 → debug, 3+ → trace.
//! `RUST_LOG`, when set, takes precedence over the count; `--quiet` silences both.
//! Scan output itself is written to stdout by the report sinks and never goes through
//! the logger.
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::{Error, Result};

fn level_for(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "off";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Filter directives: quiet wins, then a non-empty `RUST_LOG`, then the verbosity count.
fn directives(rust_log: Option<String>, verbosity: u8, quiet: bool) -> String {
    match rust_log {
        Some(d) if !quiet && !d.trim().is_empty() => d,
        _ => level_for(verbosity, quiet).to_string(),
    }
}

fn filter(verbosity: u8, quiet: bool) -> EnvFilter {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::try_new(directives(rust_log, verbosity, quiet))
        .unwrap_or_else(|_| EnvFilter::new(level_for(verbosity, quiet)))
}

pub fn setup_logging(verbosity: u8, quiet: bool, log_file: Option<&Path>) -> Result<()> {
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let subscriber = tracing_subscriber::registry()
        .with(filter(verbosity, quiet))
        .with(stderr_layer);

    let installed = match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let file_layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(true);
            subscriber.with(file_layer).try_init()
        }
        None => subscriber.try_init(),
    };
    installed.map_err(|e| Error::Logging(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, info};

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(level_for(0, false), "warn");
        assert_eq!(level_for(1, false), "info");
        assert_eq!(level_for(2, false), "debug");
        assert_eq!(level_for(9, false), "trace");
        assert_eq!(level_for(3, true), "off");
    }

    #[test]
    fn quiet_overrides_rust_log() {
        assert_eq!(directives(Some("debug".into()), 0, true), "off");
        assert_eq!(directives(Some("motifscan=trace".into()), 2, true), "off");
    }

    #[test]
    fn rust_log_overrides_verbosity() {
        assert_eq!(directives(Some("motifscan=debug".into()), 0, false), "motifscan=debug");
        assert_eq!(directives(Some("  ".into()), 1, false), "info");
        assert_eq!(directives(None, 2, false), "debug");
    }

    #[test]
    fn file_layer_captures_events() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("scan.log");
        let file = File::create(&log_path).unwrap();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("debug"))
            .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false));

        tracing::subscriber::with_default(subscriber, || {
            debug!(matches = 2, "scan finished");
            info!("fetched entry");
        });

        let content = std::fs::read_to_string(log_path).unwrap();
        assert!(content.contains("scan finished"));
        assert!(content.contains("DEBUG"));
        assert!(content.contains("matches=2"));
    }

    #[test]
    fn unwritable_log_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be opened as a log file.
        let result = setup_logging(0, false, Some(dir.path()));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
