use borderless_core::VisibilityRequest;
use borderless_core::config::ConfigPaths;

/// One-shot taskbar control.
///
/// A hide leaves the saved workareas in the journal, so a later `show`
/// from another process (or the daemon's startup) can put them back.
#[cfg(windows)]
pub fn execute(paths: &ConfigPaths, request: VisibilityRequest) {
    use borderless_core::taskbar::DisplayEnvironmentManager;
    use borderless_windows::Win32Desktop;

    super::init_quiet_logging(paths);
    if let Err(e) = std::fs::create_dir_all(paths.root()) {
        super::fail(format!("could not create {}: {e}", paths.root().display()));
    }
    let mut manager =
        DisplayEnvironmentManager::new(Win32Desktop).with_journal(paths.taskbar_journal());

    // A journal means the taskbar was hidden by us; showing it must
    // replay the saved workareas rather than just the window.
    let replay = request != VisibilityRequest::Hide && manager.recover();
    let visible = if replay { true } else { manager.toggle(request) };
    println!("Taskbar {}", if visible { "shown" } else { "hidden" });
}

#[cfg(not(windows))]
pub fn execute(_paths: &ConfigPaths, _request: VisibilityRequest) {
    super::requires_windows("taskbar");
}
