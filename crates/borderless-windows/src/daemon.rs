use borderless_core::Result;
use borderless_core::config::ConfigPaths;
use windows::Win32::UI::HiDpi::{
    DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2, SetProcessDpiAwarenessContext,
};

#[path = "daemon_ipc.rs"]
mod daemon_ipc;
#[path = "daemon_loop.rs"]
mod daemon_loop;
#[path = "daemon_threads.rs"]
mod daemon_threads;
#[path = "daemon_types.rs"]
mod daemon_types;

pub(crate) use daemon_types::DaemonMsg;

/// Runs the Borderless daemon in the foreground until Ctrl+C or
/// `borderless stop`.
///
/// The main thread owns the engine. A ticker thread drives the periodic
/// favorites scan, a Win32 message-pump thread delivers hotkeys and an
/// IPC thread accepts CLI commands.
pub fn run(paths: &ConfigPaths) -> Result<()> {
    enable_dpi_awareness();
    daemon_loop::daemon_loop(paths)
}

/// Declares this process as per-monitor DPI aware (V2).
///
/// Without this, Windows scales coordinates based on the primary
/// monitor's DPI, which puts fullscreen windows in the wrong place on
/// mixed-DPI setups. Must run before any other Win32 call that depends
/// on DPI.
fn enable_dpi_awareness() {
    // SAFETY: safe to call once at startup. Failure (already set via a
    // manifest) is ignored.
    unsafe {
        let _ = SetProcessDpiAwarenessContext(DPI_AWARENESS_CONTEXT_PER_MONITOR_AWARE_V2);
    }
}
