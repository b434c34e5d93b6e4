use borderless_core::ipc::Command;

/// Sends a command to the running daemon and prints its reply.
#[cfg(windows)]
pub fn execute(command: Command) {
    use borderless_core::ipc::ResponseStatus;

    if !borderless_windows::ipc::is_daemon_running() {
        super::fail("Borderless is not running. Start it with `borderless run`.");
    }

    match borderless_windows::ipc::send_command(&command) {
        Ok(response) if response.status == ResponseStatus::Ok => {
            if let Some(msg) = response.message {
                println!("{msg}");
            }
        }
        Ok(response) => super::fail(response.message.unwrap_or("unknown error".into())),
        Err(e) => super::fail(format!("could not reach the daemon: {e}")),
    }
}

#[cfg(not(windows))]
pub fn execute(command: Command) {
    let name = match command {
        Command::Stop => "stop",
        Command::Status => "status",
        Command::Pause => "pause",
        Command::Resume => "resume",
        Command::Restore { .. } => "restore",
        Command::Block { .. } => "block",
    };
    super::requires_windows(name);
}
