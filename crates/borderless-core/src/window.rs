use crate::style::WindowStyles;
use crate::{Rect, Result};

/// Opaque OS window reference, carried as a pointer-sized integer so
/// the core never depends on platform handle types.
pub type WindowHandle = usize;

/// A top-level window as reported by one enumeration pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowInfo {
    pub handle: WindowHandle,
    pub pid: u32,
    /// Executable file name without extension (e.g. `game` for `game.exe`).
    pub binary_name: String,
    pub title: String,
    pub styles: WindowStyles,
}

/// Native operations the transformer performs on a single window.
///
/// Every method maps to one OS call (or a tightly bound pair). Callers
/// treat failures as transient: they are logged and the operation moves
/// on to its next step.
pub trait WindowHost {
    /// Reads the standard and extended style bitmasks.
    fn styles(&self, handle: WindowHandle) -> Result<WindowStyles>;

    /// Writes both style bitmasks.
    fn set_styles(&self, handle: WindowHandle, styles: WindowStyles) -> Result<()>;

    /// Returns the window's outer bounding rectangle in screen space.
    fn bounds(&self, handle: WindowHandle) -> Result<Rect>;

    /// Moves and resizes the window and shows it, without touching Z-order.
    fn set_bounds(&self, handle: WindowHandle, rect: Rect) -> Result<()>;

    /// Issues a maximize command.
    fn maximize(&self, handle: WindowHandle) -> Result<()>;

    /// Places the window in or out of the topmost band without moving it.
    fn set_topmost(&self, handle: WindowHandle, topmost: bool) -> Result<()>;

    /// Removes every item from the window's menu bar and redraws it.
    fn strip_menu(&self, handle: WindowHandle) -> Result<()>;

    /// Bounds of the monitor the window is on (nearest if off-screen).
    fn monitor_bounds(&self, handle: WindowHandle) -> Result<Rect>;
}

/// Enumeration and liveness queries used by the window registry.
pub trait WindowSource {
    /// Lists the current top-level windows. Windows whose details could
    /// not be read are left out rather than failing the whole pass.
    fn enumerate(&self) -> Result<Vec<WindowInfo>>;

    /// Current title of a window, or `None` once it is gone or hidden.
    fn current_title(&self, handle: WindowHandle) -> Option<String>;

    /// Whether the process is still running.
    fn process_running(&self, pid: u32) -> bool;

    /// Describes a single window, used when a hotkey targets a window
    /// the registry has not scanned yet.
    fn describe(&self, handle: WindowHandle) -> Option<WindowInfo>;
}
