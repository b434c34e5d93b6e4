use borderless_core::config::ConfigPaths;

#[cfg(windows)]
pub fn execute(paths: &ConfigPaths) {
    use borderless_core::taskbar::TaskbarHost;
    use borderless_core::{FavoriteStore, TrackedWindow, WindowHost, WindowSource};
    use borderless_windows::Win32Desktop;
    use comfy_table::presets::UTF8_FULL;
    use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};

    super::init_quiet_logging(paths);
    let desktop = Win32Desktop;
    let windows = desktop.enumerate().unwrap_or_else(|e| super::fail(e));
    let favorites = FavoriteStore::open(paths.favorites_file());

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("HWND"),
            Cell::new("PID").set_alignment(CellAlignment::Right),
            Cell::new("Process"),
            Cell::new("Title"),
            Cell::new("Width").set_alignment(CellAlignment::Right),
            Cell::new("Height").set_alignment(CellAlignment::Right),
            Cell::new("Favorite"),
        ]);

    let mut count = 0;
    for info in windows.into_iter().filter(|w| w.styles.is_manageable()) {
        let rect = desktop.bounds(info.handle).unwrap_or_default();
        let window = TrackedWindow::from_info(info);
        let favorite = favorites
            .find_match(&window)
            .map(|rule| rule.search_text().to_string())
            .unwrap_or_default();

        table.add_row(vec![
            Cell::new(format!("0x{:X}", window.handle)),
            Cell::new(window.pid).set_alignment(CellAlignment::Right),
            Cell::new(&window.binary_name),
            Cell::new(&window.title),
            Cell::new(rect.width).set_alignment(CellAlignment::Right),
            Cell::new(rect.height).set_alignment(CellAlignment::Right),
            Cell::new(favorite),
        ]);
        count += 1;
    }

    println!("{table}");
    println!("\n{count} windows found");

    // Names accepted by `apply --monitor`.
    if let Ok(monitors) = desktop.monitors() {
        for m in monitors {
            let b = m.bounds;
            println!("{}: {}x{} at {},{}", m.device, b.width, b.height, b.x, b.y);
        }
    }
}

#[cfg(not(windows))]
pub fn execute(_paths: &ConfigPaths) {
    super::requires_windows("list");
}
