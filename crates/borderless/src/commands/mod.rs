pub mod apply;
pub mod block;
pub mod control;
pub mod favorites;
pub mod init;
pub mod list;
pub mod run;
pub mod taskbar;

use std::fmt::Display;

use borderless_core::config::ConfigPaths;
use borderless_core::log::{self, LogConfig};

/// Prints an error and exits with status 1.
pub fn fail(message: impl Display) -> ! {
    eprintln!("Error: {message}");
    std::process::exit(1);
}

/// Exits on platforms without a desktop backend.
#[cfg(not(windows))]
pub fn requires_windows(command: &str) -> ! {
    fail(format!("`borderless {command}` requires Windows"))
}

/// Parses a window handle from a string (supports decimal and 0x hex).
pub fn parse_handle(s: &str) -> Result<usize, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => usize::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|_| format!("invalid window handle {s:?}"))
}

/// Warnings to stderr for one-shot commands. The daemon sets up its own
/// logging from config.toml.
pub fn init_quiet_logging(paths: &ConfigPaths) {
    let config = LogConfig {
        level: "warn".into(),
        ..LogConfig::default()
    };
    log::init(&config, &paths.log_dir());
}
