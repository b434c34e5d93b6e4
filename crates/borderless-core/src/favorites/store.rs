use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info, warn};

use super::FavoriteRule;
use super::record::FavoriteRecord;
use crate::error::{Error, Result};
use crate::tracked::TrackedWindow;

/// The ordered, uniquely keyed collection of favorite rules.
///
/// No two rules share a search text, regardless of match kind. Every
/// mutation is written back to the backing file, if there is one.
#[derive(Debug, Default)]
pub struct FavoriteStore {
    path: Option<PathBuf>,
    rules: Vec<FavoriteRule>,
    loaded_mtime: Option<SystemTime>,
    unreadable: bool,
}

impl FavoriteStore {
    /// Opens the store backed by `path`.
    ///
    /// A missing file is created empty. An unreadable or unparseable
    /// file is logged and treated as empty, and mutations refuse to
    /// save over it until it loads cleanly again.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let mut store = Self {
            path: Some(path.into()),
            ..Self::default()
        };
        match store.read_file() {
            Ok(rules) => store.rules = rules,
            Err(e) if e.is_not_found() => {
                if let Err(e) = store.save() {
                    warn!("could not create favorites file: {e}");
                }
            }
            Err(e) => {
                warn!("ignoring favorites file: {e}");
                store.unreadable = true;
            }
        }
        store
    }

    /// A store that is not backed by any file.
    pub fn detached(rules: impl IntoIterator<Item = FavoriteRule>) -> Self {
        Self {
            rules: dedup(rules.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn rules(&self) -> &[FavoriteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, search_text: &str) -> Option<&FavoriteRule> {
        self.rules.iter().find(|r| r.search_text() == search_text)
    }

    /// True unless a rule of either kind already claims `search_text`.
    pub fn can_add(&self, search_text: &str) -> bool {
        !search_text.is_empty() && self.get(search_text).is_none()
    }

    /// Appends `rule` and persists. Returns `false` without touching
    /// anything when its search text is already claimed.
    pub fn add(&mut self, rule: FavoriteRule) -> Result<bool> {
        if !self.can_add(rule.search_text()) {
            return Ok(false);
        }
        debug!("adding favorite {}", rule.summary());
        self.rules.push(rule);
        self.save()?;
        Ok(true)
    }

    /// Removes the rule claiming `search_text` and persists.
    pub fn remove(&mut self, search_text: &str) -> Result<Option<FavoriteRule>> {
        let Some(pos) = self
            .rules
            .iter()
            .position(|r| r.search_text() == search_text)
        else {
            return Ok(None);
        };
        let removed = self.rules.remove(pos);
        self.save()?;
        Ok(Some(removed))
    }

    /// Edits the rule claiming `search_text` in place and persists.
    ///
    /// The match key cannot change through `edit`, so uniqueness holds.
    pub fn update(&mut self, search_text: &str, edit: impl FnOnce(&mut FavoriteRule)) -> Result<bool> {
        let Some(rule) = self
            .rules
            .iter_mut()
            .find(|r| r.search_text() == search_text)
        else {
            return Ok(false);
        };
        edit(rule);
        self.save()?;
        Ok(true)
    }

    /// First rule, in store order, that matches `window`.
    pub fn find_match(&self, window: &TrackedWindow) -> Option<&FavoriteRule> {
        self.rules.iter().find(|r| r.matches(window))
    }

    /// The matching rule, or a transient default keyed by binary name.
    /// The default is never stored.
    pub fn rule_for(&self, window: &TrackedWindow) -> FavoriteRule {
        self.find_match(window)
            .cloned()
            .unwrap_or_else(|| FavoriteRule::by_binary_name(window.binary_name.clone()))
    }

    /// True when the backing file exists but could not be loaded.
    pub fn is_unreadable(&self) -> bool {
        self.unreadable
    }

    /// Writes all rules to the backing file atomically.
    pub fn save(&mut self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if self.unreadable {
            return Err(Error::UnreadableFavorites { path: path.clone() });
        }
        let dir = path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;

        let json = serde_json::to_string_pretty(&self.rules).map_err(|e| Error::Json {
            path: path.clone(),
            source: e,
        })?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| Error::io(tmp.path(), e))?;
        tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
        self.loaded_mtime = std::fs::metadata(path).and_then(|m| m.modified()).ok();
        Ok(())
    }

    /// Re-reads the backing file if it changed since the last read.
    ///
    /// Returns true when the rule set was replaced. A file that fails to
    /// parse is logged and the current rules are kept.
    pub fn reload_if_changed(&mut self) -> bool {
        let Some(path) = &self.path else {
            return false;
        };
        let mtime = std::fs::metadata(path).and_then(|m| m.modified()).ok();
        if mtime.is_none() || mtime == self.loaded_mtime {
            return false;
        }
        match self.read_file() {
            Ok(rules) => {
                info!("favorites reloaded ({} rules)", rules.len());
                self.rules = rules;
                self.unreadable = false;
                true
            }
            Err(e) => {
                warn!("keeping previous favorites: {e}");
                self.loaded_mtime = mtime;
                false
            }
        }
    }

    fn read_file(&mut self) -> Result<Vec<FavoriteRule>> {
        let Some(path) = self.path.clone() else {
            return Ok(Vec::new());
        };
        let text = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        self.loaded_mtime = std::fs::metadata(&path).and_then(|m| m.modified()).ok();
        parse(&text).map_err(|source| Error::Json { path, source })
    }
}

/// Parses the rule list one record at a time.
///
/// Plain strings are legacy entries naming an executable and migrate
/// to binary-name rules. Records that cannot be repaired are logged and
/// skipped so the rest of the file still loads. Only a file that is not
/// a JSON array at all is an error.
pub(super) fn parse(text: &str) -> serde_json::Result<Vec<FavoriteRule>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    let entries: Vec<serde_json::Value> = serde_json::from_str(text)?;
    let mut legacy = 0;
    let mut rules = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match entry {
            serde_json::Value::String(name) if name.is_empty() => {
                warn!("skipping favorite #{index}: empty name");
            }
            serde_json::Value::String(name) => {
                legacy += 1;
                rules.push(FavoriteRule::by_binary_name(name));
            }
            value => match serde_json::from_value::<FavoriteRecord>(value) {
                Ok(record) => match FavoriteRule::try_from(record) {
                    Ok(rule) => rules.push(rule),
                    Err(e) => warn!("skipping favorite #{index}: {e}"),
                },
                Err(e) => warn!("skipping favorite #{index}: {e}"),
            },
        }
    }
    if legacy > 0 {
        info!("migrating {legacy} legacy favorites");
    }
    Ok(dedup(rules))
}

/// Drops later rules whose search text is already claimed.
fn dedup(rules: Vec<FavoriteRule>) -> Vec<FavoriteRule> {
    let mut kept: Vec<FavoriteRule> = Vec::with_capacity(rules.len());
    for rule in rules {
        if kept.iter().any(|k| k.search_text() == rule.search_text()) {
            warn!("dropping duplicate favorite {:?}", rule.search_text());
        } else {
            kept.push(rule);
        }
    }
    kept
}
