use serde::{Deserialize, Serialize};

use crate::TransformResult;
use crate::engine::{Engine, Platform};
use crate::window::WindowHandle;

/// The named pipe path used for IPC between CLI and daemon.
pub const PIPE_NAME: &str = r"\\.\pipe\borderless";

/// A command sent from the CLI to the daemon.
///
/// These are serialized as JSON and sent over the named pipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Request the daemon to stop.
    Stop,
    /// Request the daemon's current status.
    Status,
    /// Keep scanning but stop applying favorites.
    Pause,
    Resume,
    /// Undo borderless on a window the daemon transformed.
    Restore { handle: WindowHandle },
    /// Stop tracking a process for the rest of the run.
    Block { process: String },
}

/// A response sent from the daemon back to the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    /// Whether the command succeeded.
    pub status: ResponseStatus,
    /// Optional human-readable message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Status of a daemon response.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Ok,
    Error,
}

impl Response {
    /// Creates a successful response with a message.
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Ok,
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            message: Some(message.into()),
        }
    }
}

/// Runs `command` against the daemon's engine.
///
/// `Stop` only acknowledges; leaving the loop is up to the caller.
pub fn handle_command<D: Platform>(engine: &mut Engine<D>, command: &Command) -> Response {
    match command {
        Command::Stop => Response::ok_with_message("Borderless is stopping."),
        Command::Status => {
            let windows = engine.registry().windows();
            let borderless = windows.iter().filter(|w| w.is_transformed()).count();
            Response::ok_with_message(format!(
                "Borderless is running: {} windows tracked, {borderless} borderless, {} favorites, processing {}.",
                windows.len(),
                engine.favorites().len(),
                if engine.is_paused() { "paused" } else { "active" }
            ))
        }
        Command::Pause => {
            engine.set_paused(true);
            Response::ok_with_message("Automatic processing paused.")
        }
        Command::Resume => {
            engine.set_paused(false);
            Response::ok_with_message("Automatic processing resumed.")
        }
        Command::Restore { handle } => match engine.restore(*handle) {
            Some(TransformResult::Restored) => {
                Response::ok_with_message(format!("Window 0x{handle:X} restored."))
            }
            Some(TransformResult::Skipped(reason)) => {
                Response::error(format!("Window 0x{handle:X} left unchanged: {reason:?}"))
            }
            Some(other) => Response::error(format!("Window 0x{handle:X}: {other:?}")),
            None => Response::error(format!("Window 0x{handle:X} is not tracked.")),
        },
        Command::Block { process } => {
            let dropped = engine.block(process);
            Response::ok_with_message(format!(
                "{process} blocked, {dropped} windows no longer tracked."
            ))
        }
    }
}
