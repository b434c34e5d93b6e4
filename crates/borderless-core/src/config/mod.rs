mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;

pub use loader::{ConfigPaths, config_dir, load, save, try_load};

/// Top-level configuration.
///
/// Loaded from `~/.config/borderless/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub engine: EngineConfig,
    pub hotkeys: HotkeysConfig,
    pub logging: LogConfig,
}

/// Settings of the periodic favorites worker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between two scans.
    pub poll_interval_secs: u64,
    /// Scan without applying favorites.
    pub paused: bool,
    /// Binary names never tracked (case-insensitive).
    pub blocked_processes: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 3,
            paused: false,
            blocked_processes: default_blocked_processes(),
        }
    }
}

/// Shell and system processes whose windows are never worth tracking.
pub fn default_blocked_processes() -> Vec<String> {
    [
        "explorer",
        "ShellExperienceHost",
        "StartMenuExperienceHost",
        "SearchHost",
        "TextInputHost",
        "ApplicationFrameHost",
        "SystemSettings",
        "borderless",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// The three global hotkeys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeysConfig {
    /// Toggles borderless on the foreground window.
    pub borderless: HotkeyBinding,
    /// Toggles pointer visibility.
    pub cursor: HotkeyBinding,
    /// Clips the pointer to the foreground window.
    pub mouse_lock: HotkeyBinding,
}

impl Default for HotkeysConfig {
    fn default() -> Self {
        use Modifier::Win;
        Self {
            borderless: HotkeyBinding::new(true, "F6", &[Win]),
            cursor: HotkeyBinding::new(false, "ScrollLock", &[Win]),
            mouse_lock: HotkeyBinding::new(false, "ScrollLock", &[]),
        }
    }
}

/// A key combination that can be switched off.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// Key name (e.g. "F6", "ScrollLock", "B").
    pub key: String,
    /// Modifier keys (e.g. ["win", "shift"]).
    #[serde(default)]
    pub modifiers: Vec<Modifier>,
}

impl HotkeyBinding {
    pub fn new(enabled: bool, key: &str, modifiers: &[Modifier]) -> Self {
        Self {
            enabled,
            key: key.into(),
            modifiers: modifiers.to_vec(),
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

/// Keyboard modifier keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Modifier {
    Alt,
    Shift,
    Ctrl,
    Win,
}

impl Config {
    /// Clamps values to safe ranges.
    pub fn validate(&mut self) {
        self.engine.poll_interval_secs = self.engine.poll_interval_secs.clamp(1, 60);
        self.logging.max_file_mb = self.logging.max_file_mb.clamp(1, 1024);
        self.engine.blocked_processes.retain(|name| !name.trim().is_empty());
    }
}

impl EngineConfig {
    /// Adds `binary_name` to the block list. Returns false if it was
    /// already there (case-insensitive).
    pub fn block(&mut self, binary_name: &str) -> bool {
        let name = binary_name.trim();
        if name.is_empty()
            || self
                .blocked_processes
                .iter()
                .any(|b| b.eq_ignore_ascii_case(name))
        {
            return false;
        }
        self.blocked_processes.push(name.to_string());
        true
    }
}

#[cfg(test)]
mod tests;
