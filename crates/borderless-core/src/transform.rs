//! Decoration stripping, placement and restoration of single windows.

use tracing::{debug, warn};

use crate::Rect;
use crate::favorites::{FavoriteRule, Placement, SizeMode};
use crate::style::WindowStyles;
use crate::tracked::{TrackedWindow, TransformSnapshot, TransformState};
use crate::visibility::VisibilityRequest;
use crate::window::{WindowHandle, WindowHost};

/// A transformed window is re-applied at most this many times.
pub const MAX_TRANSFORM_ATTEMPTS: u32 = 3;

/// Decides whether an already transformed window is worth another pass.
pub type TargetablePredicate = Box<dyn Fn(&WindowStyles) -> bool>;

/// Global side effects a rule can request while it is applied.
pub trait SideEffects {
    fn set_taskbar(&mut self, request: VisibilityRequest);
    fn set_cursor(&mut self, request: VisibilityRequest);
}

/// Ignores every side-effect request.
pub struct NoSideEffects;

impl SideEffects for NoSideEffects {
    fn set_taskbar(&mut self, _: VisibilityRequest) {}
    fn set_cursor(&mut self, _: VisibilityRequest) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformResult {
    /// The rule was applied; `attempt` is the new attempt count.
    Applied { attempt: u32 },
    Restored,
    Skipped(SkipReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The window already used up its attempts.
    AttemptCeiling,
    /// The window is transformed and its styles no longer carry the
    /// decorations we strip.
    NotTargetable,
    /// Restore was asked for a window that was never transformed.
    NotTransformed,
    /// The saved snapshot has no usable style to write back.
    NoSnapshot,
}

/// Applies favorite rules to windows through a [`WindowHost`].
///
/// Native failures are logged and skipped; each step runs regardless
/// of the ones before it.
pub struct WindowTransformer<H> {
    host: H,
    targetable: TargetablePredicate,
}

impl<H: WindowHost> WindowTransformer<H> {
    pub fn new(host: H) -> Self {
        Self {
            host,
            targetable: Box::new(WindowStyles::has_decorations),
        }
    }

    /// Replaces the "still targetable" test used by the re-apply guard.
    pub fn with_targetable(mut self, predicate: impl Fn(&WindowStyles) -> bool + 'static) -> Self {
        self.targetable = Box::new(predicate);
        self
    }

    /// Makes `window` borderless according to `rule`.
    ///
    /// `target` is the frame a full-screen rule fills; `None` means the
    /// bounds of the monitor the window is on.
    pub fn apply(
        &self,
        window: &mut TrackedWindow,
        target: Option<Rect>,
        rule: &FavoriteRule,
        effects: &mut dyn SideEffects,
    ) -> TransformResult {
        let handle = window.handle;
        let current = self
            .host
            .styles(handle)
            .inspect_err(|e| warn!("{handle:#x}: {e}"))
            .ok();

        match window.state {
            TransformState::Transformed(snapshot) => {
                if snapshot.attempts >= MAX_TRANSFORM_ATTEMPTS {
                    return TransformResult::Skipped(SkipReason::AttemptCeiling);
                }
                if !current.is_some_and(|s| (self.targetable)(&s)) {
                    return TransformResult::Skipped(SkipReason::NotTargetable);
                }
            }
            TransformState::NotTransformed => {
                let original_bounds = self
                    .host
                    .bounds(handle)
                    .inspect_err(|e| warn!("{handle:#x}: {e}"))
                    .unwrap_or_default();
                window.state = TransformState::Transformed(TransformSnapshot {
                    original_styles: current.unwrap_or_default(),
                    original_bounds,
                    attempts: 0,
                    hides_taskbar: false,
                    hides_cursor: false,
                });
            }
        }

        if rule.remove_menus {
            self.step(self.host.strip_menu(handle), handle);
        }
        if rule.hide_taskbar {
            effects.set_taskbar(VisibilityRequest::Hide);
        }
        if rule.hide_cursor {
            effects.set_cursor(VisibilityRequest::Hide);
        }

        // An unread style would be written back as zero.
        if let Some(styles) = current.filter(|s| s.standard != 0) {
            self.step(self.host.set_styles(handle, styles.borderless()), handle);
        }

        self.place(handle, target, rule);

        if rule.topmost {
            self.step(self.host.set_topmost(handle, true), handle);
        }

        let attempt = match &mut window.state {
            TransformState::Transformed(snapshot) => {
                snapshot.attempts += 1;
                snapshot.hides_taskbar |= rule.hide_taskbar;
                snapshot.hides_cursor |= rule.hide_cursor;
                snapshot.attempts
            }
            TransformState::NotTransformed => 0,
        };
        debug!(
            "{} ({handle:#x}) borderless, attempt {attempt}",
            window.binary_name
        );
        TransformResult::Applied { attempt }
    }

    /// Writes the saved styles and bounds back and drops topmost.
    pub fn restore(&self, window: &mut TrackedWindow) -> TransformResult {
        let TransformState::Transformed(snapshot) = window.state else {
            return TransformResult::Skipped(SkipReason::NotTransformed);
        };
        if snapshot.original_styles.standard == 0 {
            return TransformResult::Skipped(SkipReason::NoSnapshot);
        }
        let handle = window.handle;
        self.step(self.host.set_styles(handle, snapshot.original_styles), handle);
        self.step(self.host.set_bounds(handle, snapshot.original_bounds), handle);
        self.step(self.host.set_topmost(handle, false), handle);

        window.state = TransformState::NotTransformed;
        debug!("{} ({handle:#x}) restored", window.binary_name);
        TransformResult::Restored
    }

    fn place(&self, handle: WindowHandle, target: Option<Rect>, rule: &FavoriteRule) {
        if rule.effective_size_mode() == SizeMode::NoChange {
            return;
        }
        let frame = match target {
            Some(frame) => frame,
            None => match self.host.monitor_bounds(handle) {
                Ok(frame) => frame,
                Err(e) => {
                    warn!("{handle:#x}: no target frame: {e}");
                    return;
                }
            },
        };
        match rule.placement(frame) {
            Placement::Unchanged => {}
            Placement::Fill { rect, maximize } => {
                self.step(self.host.set_bounds(handle, rect), handle);
                if maximize {
                    self.step(self.host.maximize(handle), handle);
                }
            }
            Placement::Exact(rect) => self.step(self.host.set_bounds(handle, rect), handle),
        }
    }

    fn step(&self, result: crate::Result<()>, handle: WindowHandle) {
        if let Err(e) = result {
            warn!("{handle:#x}: {e}");
        }
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
