use std::fs;

use borderless_core::FavoriteStore;
use borderless_core::config::{ConfigPaths, template};

use super::fail;

/// Creates `config.toml` (with comments explaining every option) and an
/// empty `favorites.json` under the config directory.
///
/// An existing `config.toml` is only replaced with `--force`; existing
/// favorites are never touched.
pub fn execute(paths: &ConfigPaths, force: bool) {
    let dir = paths.root();
    if let Err(e) = fs::create_dir_all(dir) {
        fail(format!("could not create {}: {e}", dir.display()));
    }

    let config = paths.config_file();
    if config.exists() && !force {
        println!("Already exists: {}", config.display());
        println!("Use --force to overwrite it.");
    } else {
        match fs::write(&config, template::generate_config()) {
            Ok(()) => println!("Created {}", config.display()),
            Err(e) => fail(format!("could not write {}: {e}", config.display())),
        }
    }

    let favorites = paths.favorites_file();
    if !favorites.exists() {
        FavoriteStore::open(&favorites);
        println!("Created {}", favorites.display());
    }

    println!("\nEdit config.toml to change hotkeys and the scan interval.");
    println!("Add favorites with `borderless favorites add <process name>`.");
}
