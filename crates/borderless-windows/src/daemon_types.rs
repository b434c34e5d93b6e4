use std::sync::mpsc;

use borderless_core::WindowHandle;
use borderless_core::hotkey::HotkeyCommand;
use borderless_core::ipc::{Command, Response};

/// Internal message type for the main daemon thread.
pub(crate) enum DaemonMsg {
    /// Time for a favorites pass.
    Tick,
    /// A hotkey press, with the window that had focus at the time.
    Hotkey(HotkeyCommand, WindowHandle),
    /// A CLI command with a callback to send the response.
    Command(Command, ResponseSender),
    /// Ctrl+C: leave the loop without finishing further passes.
    Stop,
}

/// Sends a response back to the IPC thread for the connected client.
pub(crate) type ResponseSender = mpsc::Sender<Response>;
