//! Tracing subscriber setup shared by the fdrk service binaries

use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::{Error, Result};

/// Filter used when `RUST_LOG` is unset: `level` for each crate, `info` for HTTP traces
pub fn default_directives(crates: &[&str], level: &str) -> String {
    crates
        .iter()
        .map(|name| format!("{}={}", name, level))
        .chain(std::iter::once("tower_http=info".to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Open `path` for appending, creating missing parent directories
pub fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            Error::Config(format!("Failed to create log directory {}: {}", parent.display(), e))
        })?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| Error::Config(format!("Failed to open log file {}: {}", path.display(), e)))
}

/// Install the global subscriber
///
/// `RUST_LOG` overrides the configured level. With `logging.file` set, events
/// are appended to that file without ANSI colors; otherwise they go to stderr.
pub fn init(crates: &[&str], logging: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(crates, &logging.level)));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match &logging.file {
        Some(path) => {
            let file = open_log_file(path)?;
            registry
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()
        }
        None => registry.with(fmt::layer().with_writer(std::io::stderr)).try_init(),
    };
    installed.map_err(|e| Error::Config(format!("Failed to install log subscriber: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn test_default_directives() {
        assert_eq!(
            default_directives(&["fdrk_fe", "fdrk_common"], "debug"),
            "fdrk_fe=debug,fdrk_common=debug,tower_http=info"
        );
    }

    #[test]
    fn test_open_log_file_creates_parents_and_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("logs/nested/fdrk-fe.log");

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }

    #[test]
    fn test_open_log_file_on_directory_is_config_error() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(open_log_file(dir.path()), Err(Error::Config(_))));
    }
}
