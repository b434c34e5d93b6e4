use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;

use super::Config;
use crate::error::{Error, Result};

/// Returns the default config directory: `~/.config/borderless/`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".config").join("borderless"))
}

/// Locations of every file kept under the config directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    root: PathBuf,
}

impl ConfigPaths {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Paths under [`config_dir`].
    pub fn default_location() -> Result<Self> {
        config_dir().map(Self::new).ok_or(Error::NoConfigDir)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_file(&self) -> PathBuf {
        self.root.join("config.toml")
    }

    pub fn favorites_file(&self) -> PathBuf {
        self.root.join("favorites.json")
    }

    /// Saved workareas while the taskbar is hidden.
    pub fn taskbar_journal(&self) -> PathBuf {
        self.root.join("taskbar.json")
    }

    pub fn log_dir(&self) -> PathBuf {
        self.root.join("logs")
    }
}

/// Reads and parses `config.toml`, then clamps it via [`Config::validate`].
pub fn try_load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let mut config: Config = toml::from_str(&content).map_err(|source| Error::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    config.validate();
    Ok(config)
}

/// Writes `config` to `path` atomically.
///
/// The file is regenerated from the values, so comments from the
/// template written by `init` do not survive.
pub fn save(path: &Path, config: &Config) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let text = toml::to_string_pretty(config).map_err(|source| Error::TomlWrite {
        path: path.to_path_buf(),
        source,
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(text.as_bytes())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

/// Loads the configuration from disk, falling back to defaults.
///
/// Non-existent files silently return defaults; other errors are logged.
pub fn load(path: &Path) -> Config {
    load_or_default(|| try_load(path), Config::default)
}

fn load_or_default<T>(try_load: impl FnOnce() -> Result<T>, default: impl Fn() -> T) -> T {
    match try_load() {
        Ok(val) => val,
        Err(e) if e.is_not_found() => default(),
        Err(e) => {
            warn!("{e}");
            default()
        }
    }
}
