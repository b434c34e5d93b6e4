//! The persistent set of tracked top-level windows.

use tracing::{debug, warn};

use crate::tracked::TrackedWindow;
use crate::window::{WindowHandle, WindowSource};

/// Tracked windows in first-seen order.
///
/// Entries are updated in place across scans so their transform state
/// survives; stale entries are pruned before new ones are added.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Vec<TrackedWindow>,
    blocked: Vec<String>,
}

impl WindowRegistry {
    /// Creates a registry that never tracks the named binaries
    /// (case-insensitive).
    pub fn new(blocked: Vec<String>) -> Self {
        Self {
            windows: Vec::new(),
            blocked,
        }
    }

    /// Never tracks `binary_name` again and drops its current entries,
    /// returning them so the caller can release what they hold.
    pub fn block(&mut self, binary_name: &str) -> Vec<TrackedWindow> {
        if !self.is_blocked(binary_name) {
            self.blocked.push(binary_name.to_string());
        }
        let (dropped, kept) = std::mem::take(&mut self.windows)
            .into_iter()
            .partition(|w| w.binary_name.eq_ignore_ascii_case(binary_name));
        self.windows = kept;
        dropped
    }

    pub fn windows(&self) -> &[TrackedWindow] {
        &self.windows
    }

    pub fn windows_mut(&mut self) -> &mut [TrackedWindow] {
        &mut self.windows
    }

    pub fn get(&self, handle: WindowHandle) -> Option<&TrackedWindow> {
        self.windows.iter().find(|w| w.handle == handle)
    }

    pub fn get_mut(&mut self, handle: WindowHandle) -> Option<&mut TrackedWindow> {
        self.windows.iter_mut().find(|w| w.handle == handle)
    }

    /// Refreshes the tracked set against the OS.
    ///
    /// Each pruned entry is passed to `on_prune` before removal so the
    /// caller can release whatever it holds for that window.
    pub fn scan(
        &mut self,
        source: &impl WindowSource,
        mut on_prune: impl FnMut(&TrackedWindow),
    ) -> &[TrackedWindow] {
        self.windows.retain_mut(|window| {
            let stale = match source.current_title(window.handle) {
                None => true,
                Some(title) => title != window.title,
            };
            window.exited = !source.process_running(window.pid);
            if stale || window.exited {
                debug!(
                    "pruning {} ({:#x}){}",
                    window.binary_name,
                    window.handle,
                    if window.exited { ", process exited" } else { "" }
                );
                on_prune(window);
                return false;
            }
            true
        });

        let found = match source.enumerate() {
            Ok(found) => found,
            Err(e) => {
                warn!("window enumeration failed: {e}");
                return &self.windows;
            }
        };
        for info in found {
            if info.pid == 0 || self.is_blocked(&info.binary_name) {
                continue;
            }
            let known = self
                .windows
                .iter()
                .any(|w| w.pid == info.pid && w.binary_name == info.binary_name);
            if !known {
                self.windows.push(TrackedWindow::from_info(info));
            }
        }
        &self.windows
    }

    /// Returns the entry for `handle`, describing and adding it first
    /// if no scan has seen it yet.
    pub fn track(
        &mut self,
        handle: WindowHandle,
        source: &impl WindowSource,
    ) -> Option<&mut TrackedWindow> {
        if let Some(pos) = self.windows.iter().position(|w| w.handle == handle) {
            return self.windows.get_mut(pos);
        }
        let info = source.describe(handle)?;
        if info.pid == 0 {
            return None;
        }
        self.windows.push(TrackedWindow::from_info(info));
        self.windows.last_mut()
    }

    fn is_blocked(&self, binary_name: &str) -> bool {
        self.blocked
            .iter()
            .any(|b| b.eq_ignore_ascii_case(binary_name))
    }
}
