use clap::{Args, ValueEnum};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};

use borderless_core::config::ConfigPaths;
use borderless_core::favorites::EdgeOffsets;
use borderless_core::{FavoriteRule, FavoriteStore, MatchKind, Rect, SizeMode};

use super::fail;

/// What a new favorite matches against.
#[derive(Clone, Copy, ValueEnum)]
pub enum MatchBy {
    /// Executable name without extension
    Binary,
    /// Exact window title
    Title,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum SizeModeArg {
    FullScreen,
    SpecificSize,
    NoChange,
}

impl From<SizeModeArg> for SizeMode {
    fn from(mode: SizeModeArg) -> Self {
        match mode {
            SizeModeArg::FullScreen => SizeMode::FullScreen,
            SizeModeArg::SpecificSize => SizeMode::SpecificSize,
            SizeModeArg::NoChange => SizeMode::NoChange,
        }
    }
}

/// Arguments for `favorites add`.
#[derive(Args)]
pub struct AddArgs {
    /// Match on the process name or the window title
    #[arg(long, value_enum, default_value_t = MatchBy::Binary)]
    by: MatchBy,
    /// Process name (e.g. `game` for game.exe) or exact window title
    text: String,
}

/// Arguments for `favorites set`. Omitted options keep their value.
#[derive(Args)]
pub struct SetArgs {
    /// The favorite's process name or window title
    text: String,
    #[arg(long, value_enum)]
    size_mode: Option<SizeModeArg>,
    /// Maximize after resizing (implies full-screen)
    #[arg(long, value_name = "BOOL")]
    maximize: Option<bool>,
    /// Pixel offsets applied to the full-screen frame
    #[arg(long, num_args = 4, value_names = ["L", "T", "R", "B"], allow_negative_numbers = true)]
    offsets: Option<Vec<i32>>,
    /// Explicit window rectangle (implies specific-size)
    #[arg(long, num_args = 4, value_names = ["X", "Y", "W", "H"], allow_negative_numbers = true)]
    position: Option<Vec<i32>>,
    #[arg(long, value_name = "BOOL")]
    remove_menus: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    topmost: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    hide_taskbar: Option<bool>,
    #[arg(long, value_name = "BOOL")]
    hide_cursor: Option<bool>,
}

impl SetArgs {
    /// Size mode first, so explicit geometry given alongside it wins.
    fn apply(&self, rule: &mut FavoriteRule) {
        if let Some(mode) = self.size_mode {
            rule.set_size_mode(mode.into());
        }
        if let Some(maximize) = self.maximize {
            rule.set_should_maximize(maximize);
        }
        if let Some([left, top, right, bottom]) = self.offsets.as_deref().and_then(four) {
            rule.set_edge_offsets(EdgeOffsets::new(left, top, right, bottom));
        }
        if let Some([x, y, w, h]) = self.position.as_deref().and_then(four) {
            rule.set_explicit_position(Rect::new(x, y, w, h));
        }
        let flags = [
            (self.remove_menus, &mut rule.remove_menus),
            (self.topmost, &mut rule.topmost),
            (self.hide_taskbar, &mut rule.hide_taskbar),
            (self.hide_cursor, &mut rule.hide_cursor),
        ];
        for (value, field) in flags {
            if let Some(value) = value {
                *field = value;
            }
        }
    }
}

fn four(values: &[i32]) -> Option<[i32; 4]> {
    values.try_into().ok()
}

fn open(paths: &ConfigPaths) -> FavoriteStore {
    super::init_quiet_logging(paths);
    FavoriteStore::open(paths.favorites_file())
}

pub fn list(paths: &ConfigPaths) {
    let store = open(paths);
    if store.is_unreadable() {
        fail(format!(
            "{} could not be loaded",
            paths.favorites_file().display()
        ));
    }
    if store.is_empty() {
        println!("No favorites yet. Add one with `borderless favorites add <name>`.");
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("Match"), Cell::new("Favorite")]);
    for rule in store.rules() {
        let kind = match rule.match_kind() {
            MatchKind::ByBinaryName(_) => "process",
            MatchKind::ByTitleText(_) => "title",
        };
        table.add_row(vec![Cell::new(kind), Cell::new(rule.summary())]);
    }

    println!("{table}");
    println!("\n{} favorites", store.len());
}

pub fn add(paths: &ConfigPaths, args: &AddArgs) {
    let mut store = open(paths);
    let rule = match args.by {
        MatchBy::Binary => FavoriteRule::by_binary_name(args.text.trim()),
        MatchBy::Title => FavoriteRule::by_title(args.text.trim()),
    };
    match store.add(rule) {
        Ok(true) => println!("Added {}", args.text.trim()),
        Ok(false) => fail(format!(
            "{:?} is empty or already a favorite",
            args.text.trim()
        )),
        Err(e) => fail(e),
    }
}

pub fn remove(paths: &ConfigPaths, text: &str) {
    let mut store = open(paths);
    match store.remove(text) {
        Ok(Some(_)) => println!("Removed {text}"),
        Ok(None) => fail(format!("no favorite named {text:?}")),
        Err(e) => fail(e),
    }
}

pub fn set(paths: &ConfigPaths, args: &SetArgs) {
    let mut store = open(paths);
    match store.update(&args.text, |rule| args.apply(rule)) {
        Ok(true) => {
            if let Some(rule) = store.get(&args.text) {
                println!("{}", rule.summary());
            }
        }
        Ok(false) => fail(format!("no favorite named {:?}", args.text)),
        Err(e) => fail(e),
    }
}
