/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `borderless init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# Borderless configuration
# Location: ~/.config/borderless/config.toml
# Favorites live next to this file in favorites.json.

[engine]
# Seconds between scans for windows matching a favorite (1 to 60).
poll_interval_secs = 3
# Keep scanning but stop applying favorites.
paused = false
# Executables (without .exe) whose windows are never tracked.
blocked_processes = [
    "explorer",
    "ShellExperienceHost",
    "StartMenuExperienceHost",
    "SearchHost",
    "TextInputHost",
    "ApplicationFrameHost",
    "SystemSettings",
    "borderless",
]

# Global hotkeys. Modifiers: "alt", "ctrl", "shift", "win".
[hotkeys.borderless]
# Make the foreground window borderless, or restore it.
enabled = true
key = "F6"
modifiers = ["win"]

[hotkeys.cursor]
# Hide or show the mouse cursor.
enabled = false
key = "ScrollLock"
modifiers = ["win"]

[hotkeys.mouse_lock]
# Lock the mouse inside the foreground window.
enabled = false
key = "ScrollLock"
modifiers = []

[logging]
# Enable file logging to ~/.config/borderless/logs/borderless.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10
"##
    .to_string()
}
