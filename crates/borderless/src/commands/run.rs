use borderless_core::config::ConfigPaths;

/// Runs the daemon until Ctrl+C or `borderless stop`.
#[cfg(windows)]
pub fn execute(paths: &ConfigPaths) {
    if borderless_windows::ipc::is_daemon_running() {
        super::fail("Borderless is already running.");
    }
    println!("Borderless running. Press Ctrl+C to stop.");
    if let Err(e) = borderless_windows::daemon::run(paths) {
        super::fail(e);
    }
}

#[cfg(not(windows))]
pub fn execute(_paths: &ConfigPaths) {
    super::requires_windows("run");
}
