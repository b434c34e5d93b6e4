use crate::Rect;
use crate::style::WindowStyles;
use crate::window::{WindowHandle, WindowInfo};

/// Whether the transformer has touched a window, and what it saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransformState {
    #[default]
    NotTransformed,
    Transformed(TransformSnapshot),
}

/// Pre-transform state kept so the window can be restored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformSnapshot {
    pub original_styles: WindowStyles,
    pub original_bounds: Rect,
    /// Number of successful `apply` calls since the snapshot was taken.
    pub attempts: u32,
    /// A rule applied to this window asked for the taskbar hidden.
    pub hides_taskbar: bool,
    /// A rule applied to this window asked for the pointer hidden.
    pub hides_cursor: bool,
}

/// A manageable top-level window followed across registry scans.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedWindow {
    pub pid: u32,
    pub handle: WindowHandle,
    pub binary_name: String,
    /// Title as first observed. A later mismatch marks the entry stale.
    pub title: String,
    pub manageable: bool,
    /// Set by a scan that found the owning process gone.
    pub exited: bool,
    pub state: TransformState,
}

impl TrackedWindow {
    pub fn from_info(info: WindowInfo) -> Self {
        Self {
            pid: info.pid,
            handle: info.handle,
            manageable: info.styles.is_manageable(),
            binary_name: info.binary_name,
            title: info.title,
            exited: false,
            state: TransformState::NotTransformed,
        }
    }

    pub fn is_transformed(&self) -> bool {
        matches!(self.state, TransformState::Transformed(_))
    }

    /// Whether this window, while borderless, holds the taskbar hidden.
    pub fn hides_taskbar(&self) -> bool {
        matches!(self.state, TransformState::Transformed(s) if s.hides_taskbar)
    }

    /// Whether this window, while borderless, holds the pointer hidden.
    pub fn hides_cursor(&self) -> bool {
        matches!(self.state, TransformState::Transformed(s) if s.hides_cursor)
    }

    /// Attempt count of the current transform, zero when not transformed.
    pub fn attempts(&self) -> u32 {
        match self.state {
            TransformState::Transformed(snapshot) => snapshot.attempts,
            TransformState::NotTransformed => 0,
        }
    }
}
