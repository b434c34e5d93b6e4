use borderless_core::config::{self, ConfigPaths};

/// Adds a process to the config block list and, if the daemon is
/// running, drops its windows there too.
pub fn execute(paths: &ConfigPaths, process: &str) {
    super::init_quiet_logging(paths);
    let process = process.trim();
    if process.is_empty() {
        super::fail("process name is empty");
    }

    let path = paths.config_file();
    let mut config = match config::try_load(&path) {
        Ok(config) => config,
        Err(e) if e.is_not_found() => config::Config::default(),
        Err(e) => super::fail(format!("{e}; fix it before blocking processes")),
    };

    if config.engine.block(process) {
        if let Err(e) = config::save(&path, &config) {
            super::fail(e);
        }
        println!("Blocked {process}");
    } else {
        println!("{process} is already blocked");
    }

    notify_daemon(process);
}

#[cfg(windows)]
fn notify_daemon(process: &str) {
    use borderless_core::ipc::Command;

    if !borderless_windows::ipc::is_daemon_running() {
        return;
    }
    let command = Command::Block {
        process: process.to_string(),
    };
    match borderless_windows::ipc::send_command(&command) {
        Ok(response) => {
            if let Some(msg) = response.message {
                println!("{msg}");
            }
        }
        Err(e) => eprintln!("Daemon not updated, restart it to apply: {e}"),
    }
}

#[cfg(not(windows))]
fn notify_daemon(_process: &str) {}
