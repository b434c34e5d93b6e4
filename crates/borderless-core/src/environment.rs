use crate::cursor::{CursorHost, CursorVisibilityManager};
use crate::taskbar::{DisplayEnvironmentManager, TaskbarHost};
use crate::transform::SideEffects;
use crate::visibility::VisibilityRequest;

/// The desktop-wide state a rule can change: taskbar and pointer.
pub struct DesktopEnvironment<T: TaskbarHost, C: CursorHost> {
    pub taskbar: DisplayEnvironmentManager<T>,
    pub cursor: CursorVisibilityManager<C>,
}

impl<T: TaskbarHost, C: CursorHost> DesktopEnvironment<T, C> {
    pub fn new(taskbar: DisplayEnvironmentManager<T>, cursor: CursorVisibilityManager<C>) -> Self {
        Self { taskbar, cursor }
    }

    /// Brings taskbar and pointer back.
    pub fn restore_all(&mut self) {
        self.taskbar.toggle(VisibilityRequest::Show);
        self.cursor.toggle(VisibilityRequest::Show);
    }
}

impl<T: TaskbarHost, C: CursorHost> SideEffects for DesktopEnvironment<T, C> {
    fn set_taskbar(&mut self, request: VisibilityRequest) {
        self.taskbar.toggle(request);
    }

    fn set_cursor(&mut self, request: VisibilityRequest) {
        self.cursor.toggle(request);
    }
}
