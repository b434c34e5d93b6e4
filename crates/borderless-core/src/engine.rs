//! The periodic driver tying tracking, favorites and transforms together.

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::Rect;
use crate::config::EngineConfig;
use crate::cursor::{CursorHost, CursorVisibilityManager};
use crate::environment::DesktopEnvironment;
use crate::favorites::FavoriteStore;
use crate::hotkey::{PointerHost, mouse_lock_target};
use crate::registry::WindowRegistry;
use crate::taskbar::{DisplayEnvironmentManager, Monitor, TaskbarHost};
use crate::tracked::TrackedWindow;
use crate::transform::{TransformResult, WindowTransformer};
use crate::visibility::VisibilityRequest;
use crate::window::{WindowHandle, WindowHost, WindowSource};

/// Everything the engine needs from the OS.
pub trait Platform: WindowHost + WindowSource + TaskbarHost + CursorHost + PointerHost + Clone {}

impl<T> Platform for T where T: WindowHost + WindowSource + TaskbarHost + CursorHost + PointerHost + Clone {}

/// Counts from one [`Engine::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub tracked: usize,
    pub pruned: usize,
    pub applied: usize,
    pub skipped: usize,
}

/// Owns all borderless state for one desktop.
pub struct Engine<D: Platform> {
    desktop: D,
    registry: WindowRegistry,
    favorites: FavoriteStore,
    transformer: WindowTransformer<D>,
    environment: DesktopEnvironment<D, D>,
    paused: bool,
}

impl<D: Platform> Engine<D> {
    /// `journal` is where hidden-taskbar workareas are persisted.
    pub fn new(
        desktop: D,
        favorites: FavoriteStore,
        config: &EngineConfig,
        journal: Option<PathBuf>,
    ) -> Self {
        let mut taskbar = DisplayEnvironmentManager::new(desktop.clone());
        if let Some(path) = journal {
            taskbar = taskbar.with_journal(path);
        }
        let cursor = CursorVisibilityManager::new(desktop.clone());
        Self {
            registry: WindowRegistry::new(config.blocked_processes.clone()),
            transformer: WindowTransformer::new(desktop.clone()),
            environment: DesktopEnvironment::new(taskbar, cursor),
            favorites,
            paused: config.paused,
            desktop,
        }
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn favorites(&self) -> &FavoriteStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoriteStore {
        &mut self.favorites
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Undoes a taskbar hide left behind by a crashed run.
    pub fn recover(&mut self) -> bool {
        self.environment.taskbar.recover()
    }

    /// One worker iteration.
    pub fn tick(&mut self) -> TickReport {
        self.favorites.reload_if_changed();

        let mut pruned = Vec::new();
        self.registry.scan(&self.desktop, |w| pruned.push(w.clone()));
        self.release_dependents(&pruned);

        let mut report = TickReport {
            tracked: self.registry.windows().len(),
            pruned: pruned.len(),
            ..TickReport::default()
        };
        if self.paused {
            return report;
        }

        for window in self.registry.windows_mut() {
            if !window.manageable {
                continue;
            }
            let Some(rule) = self.favorites.find_match(window) else {
                continue;
            };
            match self
                .transformer
                .apply(window, None, rule, &mut self.environment)
            {
                TransformResult::Applied { .. } => report.applied += 1,
                _ => report.skipped += 1,
            }
        }
        if report.applied > 0 || report.pruned > 0 {
            debug!("{report:?}");
        }
        report
    }

    /// Restores `handle` if it is borderless, otherwise applies its
    /// favorite (or the default rule). `None` if the window is unknown.
    pub fn toggle_borderless(&mut self, handle: WindowHandle) -> Option<TransformResult> {
        let window = self.registry.track(handle, &self.desktop)?;
        if window.is_transformed() {
            return self.restore(handle);
        }
        let rule = self.favorites.rule_for(window);
        Some(
            self.transformer
                .apply(window, None, &rule, &mut self.environment),
        )
    }

    /// Puts a borderless window back the way it was found. `None` if
    /// the window is not tracked, since only tracked windows carry the
    /// saved styles and bounds.
    pub fn restore(&mut self, handle: WindowHandle) -> Option<TransformResult> {
        let window = self.registry.get_mut(handle)?;
        let before = window.clone();
        let result = self.transformer.restore(window);
        if result == TransformResult::Restored {
            self.release_dependents(&[before]);
        }
        Some(result)
    }

    /// Stops tracking `binary_name` for the rest of this run. Returns
    /// how many tracked windows were dropped.
    pub fn block(&mut self, binary_name: &str) -> usize {
        let dropped = self.registry.block(binary_name);
        info!("blocked {binary_name}, dropped {} windows", dropped.len());
        self.release_dependents(&dropped);
        dropped.len()
    }

    /// Applies the window's favorite (or the default rule), filling
    /// `target` instead of the window's monitor when given.
    pub fn apply(&mut self, handle: WindowHandle, target: Option<Rect>) -> Option<TransformResult> {
        let window = self.registry.track(handle, &self.desktop)?;
        let rule = self.favorites.rule_for(window);
        Some(
            self.transformer
                .apply(window, target, &rule, &mut self.environment),
        )
    }

    /// Attached monitors; empty if they could not be read.
    pub fn monitors(&self) -> Vec<Monitor> {
        self.desktop
            .monitors()
            .inspect_err(|e| warn!("{e}"))
            .unwrap_or_default()
    }

    /// The rectangle spanning every monitor.
    pub fn spanning_frame(&self) -> Option<Rect> {
        Rect::containing(self.monitors().iter().map(|m| &m.bounds))
    }

    /// Bounds of the monitor called `name`, see [`Monitor::is_named`].
    pub fn monitor_frame(&self, name: &str) -> Option<Rect> {
        self.monitors()
            .into_iter()
            .find(|m| m.is_named(name))
            .map(|m| m.bounds)
    }

    /// Returns whether the pointer is visible afterwards.
    pub fn toggle_cursor(&mut self) -> bool {
        self.environment.cursor.toggle(VisibilityRequest::Toggle)
    }

    /// Returns whether the taskbar is visible afterwards.
    pub fn set_taskbar(&mut self, request: VisibilityRequest) -> bool {
        self.environment.taskbar.toggle(request)
    }

    /// Clips the pointer to the client area of `handle`, or releases
    /// it if it is already clipped there. Returns true when locked.
    pub fn toggle_mouse_lock(&self, handle: WindowHandle) -> crate::Result<bool> {
        let client = self.desktop.client_rect(handle)?;
        let target = mouse_lock_target(self.desktop.clip()?, client);
        self.desktop.set_clip(target)?;
        Ok(target.is_some())
    }

    /// Leaves the desktop usable: taskbar and pointer shown, pointer
    /// unclipped. Borderless windows stay as they are.
    pub fn shutdown(&mut self) {
        self.environment.restore_all();
        if let Err(e) = self.desktop.set_clip(None) {
            warn!("{e}");
        }
        info!("engine stopped");
    }

    /// Shows taskbar or pointer again once no remaining borderless
    /// window holds them hidden. Goes by what each window recorded when
    /// it was transformed, so removing its favorite changes nothing.
    fn release_dependents(&mut self, released: &[TrackedWindow]) {
        let kept = self.registry.windows();
        let released_taskbar = released.iter().any(TrackedWindow::hides_taskbar);
        let released_cursor = released.iter().any(TrackedWindow::hides_cursor);
        let kept_taskbar = kept.iter().any(TrackedWindow::hides_taskbar);
        let kept_cursor = kept.iter().any(TrackedWindow::hides_cursor);

        if released_taskbar && !kept_taskbar {
            info!("showing taskbar, no borderless window needs it hidden");
            self.environment.taskbar.toggle(VisibilityRequest::Show);
        }
        if released_cursor && !kept_cursor {
            info!("showing cursor, no borderless window needs it hidden");
            self.environment.cursor.toggle(VisibilityRequest::Show);
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
