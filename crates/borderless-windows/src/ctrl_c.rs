//! Ctrl+C signal handler using `SetConsoleCtrlHandler`.

use std::sync::OnceLock;
use std::sync::mpsc::Sender;

use borderless_core::Result;
use windows::Win32::System::Console::{CTRL_BREAK_EVENT, CTRL_C_EVENT, SetConsoleCtrlHandler};

use crate::daemon::DaemonMsg;
use crate::error::native;

/// Global sender, written once by `set_handler` and read by the callback.
static SENDER: OnceLock<Sender<DaemonMsg>> = OnceLock::new();

/// Registers a handler that sends [`DaemonMsg::Stop`] on Ctrl+C or
/// Ctrl+Break instead of letting the console kill the process.
pub(crate) fn set_handler(tx: Sender<DaemonMsg>) -> Result<()> {
    if SENDER.set(tx).is_err() {
        return Err(borderless_core::Error::native(
            "SetConsoleCtrlHandler",
            "handler already registered",
        ));
    }

    // SAFETY: `handler` is a valid `extern "system"` function for the
    // lifetime of the process.
    unsafe { SetConsoleCtrlHandler(Some(handler), true) }.map_err(native("SetConsoleCtrlHandler"))
}

unsafe extern "system" fn handler(ctrl_type: u32) -> windows::core::BOOL {
    if (ctrl_type == CTRL_C_EVENT || ctrl_type == CTRL_BREAK_EVENT)
        && let Some(tx) = SENDER.get()
    {
        let _ = tx.send(DaemonMsg::Stop);
        return windows::core::BOOL(1);
    }
    windows::core::BOOL(0)
}
