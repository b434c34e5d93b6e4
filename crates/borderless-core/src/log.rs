//! Logging setup on top of `tracing`.
//!
//! With file logging enabled, output goes to `logs/borderless.log`
//! under the config directory. A file that grew past the configured
//! size is rotated to `borderless.log.1` at startup (one backup kept).
//! Otherwise output goes to stderr.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "borderless.log";
const BACKUP_NAME: &str = "borderless.log.1";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether file logging is enabled. Defaults to `false`.
    pub enabled: bool,
    /// Minimum log level: "debug", "info", "warn", or "error".
    pub level: String,
    /// Maximum log file size in megabytes before rotation.
    pub max_file_mb: u64,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".into(),
            max_file_mb: 10,
        }
    }
}

/// Installs the global subscriber. Later calls are ignored.
///
/// `RUST_LOG` overrides the configured level when set.
pub fn init(config: &LogConfig, log_dir: &Path) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.enabled
        && let Some(path) = prepare_file(log_dir, config.max_file_mb)
        && let Ok(file) = OpenOptions::new().create(true).append(true).open(&path)
    {
        let _ = builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init();
        return;
    }
    let _ = builder.with_writer(std::io::stderr).try_init();
}

/// Creates the log directory and rotates an oversized log file.
fn prepare_file(log_dir: &Path, max_file_mb: u64) -> Option<PathBuf> {
    fs::create_dir_all(log_dir).ok()?;
    let path = log_dir.join(LOG_FILE_NAME);
    let len = fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    if len > max_file_mb * 1024 * 1024 {
        let _ = fs::rename(&path, log_dir.join(BACKUP_NAME));
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oversized_log_is_rotated() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join(LOG_FILE_NAME), vec![b'x'; 2 * 1024 * 1024]).unwrap();

        // Act
        let path = prepare_file(&log_dir, 1).unwrap();

        // Assert
        assert!(!path.exists());
        assert!(log_dir.join(BACKUP_NAME).exists());
    }

    #[test]
    fn small_log_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join(LOG_FILE_NAME), "line\n").unwrap();

        let path = prepare_file(&log_dir, 1).unwrap();

        assert!(path.exists());
        assert!(!log_dir.join(BACKUP_NAME).exists());
    }

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("nested").join("logs");

        let path = prepare_file(&log_dir, 10).unwrap();

        assert!(log_dir.is_dir());
        assert_eq!(path, log_dir.join(LOG_FILE_NAME));
    }
}
