use super::template::generate_config;
use super::*;

#[test]
fn default_config_has_expected_values() {
    // Arrange / Act
    let config = Config::default();

    // Assert
    assert_eq!(config.engine.poll_interval_secs, 3);
    assert!(!config.engine.paused);
    assert!(config.hotkeys.borderless.enabled);
    assert!(!config.hotkeys.cursor.enabled);
    assert!(!config.hotkeys.mouse_lock.enabled);
}

#[test]
fn partial_toml_uses_defaults_for_missing_sections() {
    // Arrange
    let toml_str = "[engine]\npoll_interval_secs = 5\n";

    // Act
    let config: Config = toml::from_str(toml_str).unwrap();

    // Assert
    assert_eq!(config.engine.poll_interval_secs, 5);
    assert_eq!(config.engine.blocked_processes, default_blocked_processes());
    assert_eq!(config.hotkeys, HotkeysConfig::default());
}

#[test]
fn hotkey_without_enabled_flag_is_enabled() {
    let toml_str = "[hotkeys.cursor]\nkey = \"F7\"\n";

    let config: Config = toml::from_str(toml_str).unwrap();

    assert!(config.hotkeys.cursor.enabled);
    assert!(config.hotkeys.cursor.modifiers.is_empty());
    assert_eq!(config.hotkeys.borderless, HotkeysConfig::default().borderless);
}

#[test]
fn validate_clamps_extreme_values() {
    // Arrange
    let mut config = Config::default();
    config.engine.poll_interval_secs = 0;
    config.engine.blocked_processes = vec!["game".into(), "  ".into()];
    config.logging.max_file_mb = 0;

    // Act
    config.validate();

    // Assert
    assert_eq!(config.engine.poll_interval_secs, 1);
    assert_eq!(config.engine.blocked_processes, vec!["game".to_string()]);
    assert_eq!(config.logging.max_file_mb, 1);

    config.engine.poll_interval_secs = 3600;
    config.validate();
    assert_eq!(config.engine.poll_interval_secs, 60);
}

#[test]
fn block_adds_each_name_once_ignoring_case() {
    // Arrange
    let mut engine = EngineConfig::default();

    // Act
    let added = engine.block("game");
    let again = engine.block("GAME");
    let builtin = engine.block("Explorer");

    // Assert
    assert!(added);
    assert!(!again);
    assert!(!builtin);
    assert_eq!(
        engine.blocked_processes.iter().filter(|b| b.eq_ignore_ascii_case("game")).count(),
        1
    );
}

#[test]
fn config_template_matches_default_values() {
    // Act
    let config: Config = toml::from_str(&generate_config()).unwrap();

    // Assert
    assert_eq!(config, Config::default());
}

#[test]
fn load_missing_file_returns_defaults() {
    let dir = tempfile::tempdir().unwrap();

    let config = load(&dir.path().join("config.toml"));

    assert_eq!(config, Config::default());
}

#[test]
fn load_invalid_file_returns_defaults() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[engine\npaused = ").unwrap();

    // Act
    let err = try_load(&path).unwrap_err();
    let config = load(&path);

    // Assert
    assert!(matches!(err, crate::Error::Toml { .. }));
    assert_eq!(config, Config::default());
}

#[test]
fn load_clamps_values_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[engine]\npoll_interval_secs = 0\npaused = true\n").unwrap();

    let config = load(&path);

    assert_eq!(config.engine.poll_interval_secs, 1);
    assert!(config.engine.paused);
}

#[test]
fn saved_config_loads_back() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");
    let mut config = Config::default();
    config.engine.paused = true;
    config.engine.block("game");

    // Act
    save(&path, &config).unwrap();
    let loaded = try_load(&path).unwrap();

    // Assert
    assert_eq!(loaded, config);
}

#[test]
fn paths_live_under_root() {
    let paths = ConfigPaths::new("/tmp/b");

    assert_eq!(paths.config_file(), std::path::Path::new("/tmp/b/config.toml"));
    assert_eq!(paths.favorites_file(), std::path::Path::new("/tmp/b/favorites.json"));
    assert_eq!(paths.taskbar_journal(), std::path::Path::new("/tmp/b/taskbar.json"));
    assert_eq!(paths.log_dir(), std::path::Path::new("/tmp/b/logs"));
}
