//! Win32 implementation of the borderless engine's host traits, plus the
//! daemon that drives the engine on a real desktop.
//!
//! Everything here is compiled only on Windows. Other platforms get an
//! empty crate so the workspace still builds and the core tests run.

#[cfg(windows)]
mod ctrl_c;

/// Daemon main loop.
#[cfg(windows)]
pub mod daemon;

/// Cursor replacement through `SetSystemCursor`.
#[cfg(windows)]
mod cursor;

/// Win32 window enumeration.
#[cfg(windows)]
pub mod enumerate;

#[cfg(windows)]
mod error;

#[cfg(windows)]
mod event_loop;

#[cfg(windows)]
mod hotkey;

/// Named pipe transport between the CLI and the daemon.
#[cfg(windows)]
pub mod ipc;

/// Monitor geometry.
#[cfg(windows)]
pub mod monitor;

#[cfg(windows)]
mod pointer;

/// Process utilities (alive check, binary name).
#[cfg(windows)]
pub mod process;

/// Taskbar visibility and workarea control.
#[cfg(windows)]
mod taskbar;

/// The desktop handle implementing every host trait.
#[cfg(windows)]
pub mod window;

#[cfg(windows)]
pub use window::Win32Desktop;
