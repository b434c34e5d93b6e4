//! Taskbar visibility with per-monitor workarea bookkeeping.
//!
//! Hiding the taskbar does not give its space back to maximized
//! windows, so every monitor's workarea is widened to its full bounds
//! while hidden and put back on show. The saved workareas are also
//! journaled to disk so a crash while hidden can be undone on the next
//! start.

use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::Rect;
use crate::error::{Error, Result};
use crate::visibility::VisibilityRequest;

/// Pixel stride of the notification-area repaint sweep.
pub const SWEEP_STRIDE: i32 = 5;

/// A display as seen by the taskbar manager.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Monitor {
    /// OS device name, e.g. `\\.\DISPLAY1`.
    pub device: String,
    pub bounds: Rect,
    pub work_area: Rect,
}

impl Monitor {
    /// Matches the full device name or its short form (`DISPLAY2`),
    /// ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        let short = self.device.strip_prefix(r"\\.\").unwrap_or(&self.device);
        self.device.eq_ignore_ascii_case(name) || short.eq_ignore_ascii_case(name)
    }
}

/// One monitor's usable area, saved while the taskbar is hidden.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkareaSnapshot {
    pub device: String,
    pub work_area: Rect,
}

/// Native operations behind taskbar hiding.
pub trait TaskbarHost {
    /// Whether the primary taskbar window is currently visible.
    fn taskbar_visible(&self) -> Result<bool>;

    fn set_taskbar_visible(&self, visible: bool) -> Result<()>;

    fn monitors(&self) -> Result<Vec<Monitor>>;

    /// Sets the workarea of the monitor containing `area`.
    fn set_work_area(&self, area: Rect) -> Result<()>;

    /// Client rectangle of the notification area, if it can be found.
    fn notification_area(&self) -> Option<Rect>;

    /// Posts a synthetic pointer move to the notification area at each
    /// client coordinate in `points`.
    fn nudge_notification_area(&self, points: &[(i32, i32)]);
}

/// Owns the taskbar state and the single outstanding snapshot set.
pub struct DisplayEnvironmentManager<T> {
    host: T,
    snapshots: Vec<WorkareaSnapshot>,
    journal: Option<PathBuf>,
}

impl<T: TaskbarHost> DisplayEnvironmentManager<T> {
    pub fn new(host: T) -> Self {
        Self {
            host,
            snapshots: Vec::new(),
            journal: None,
        }
    }

    /// Persists snapshots to `path` while the taskbar is hidden.
    pub fn with_journal(mut self, path: impl Into<PathBuf>) -> Self {
        self.journal = Some(path.into());
        self
    }

    /// Snapshots held since the taskbar was hidden. Empty while shown.
    pub fn snapshots(&self) -> &[WorkareaSnapshot] {
        &self.snapshots
    }

    /// Applies `request` and returns whether the taskbar is visible
    /// afterwards. Requests matching the current state do nothing.
    pub fn toggle(&mut self, request: VisibilityRequest) -> bool {
        let visible = match self.host.taskbar_visible() {
            Ok(visible) => visible,
            Err(e) => {
                warn!("taskbar state unknown: {e}");
                return true;
            }
        };
        let desired = request.resolve(visible);
        if desired == visible {
            return visible;
        }
        if desired { self.show() } else { self.hide() }
    }

    /// Undoes a hide left behind by a previous process.
    ///
    /// Returns true when a journal was found and replayed.
    pub fn recover(&mut self) -> bool {
        let Some(path) = self.journal.clone() else {
            return false;
        };
        let saved = match read_journal(&path) {
            Ok(Some(saved)) => saved,
            Ok(None) => return false,
            Err(e) => {
                warn!("discarding taskbar journal: {e}");
                remove_journal(&path);
                return false;
            }
        };
        info!("restoring {} workareas from a previous run", saved.len());
        self.snapshots = saved;
        self.show();
        true
    }

    fn hide(&mut self) -> bool {
        let monitors = match self.host.monitors() {
            Ok(monitors) => monitors,
            Err(e) => {
                warn!("not hiding taskbar: {e}");
                return true;
            }
        };
        self.snapshots = monitors
            .iter()
            .map(|m| WorkareaSnapshot {
                device: m.device.clone(),
                work_area: m.work_area,
            })
            .collect();
        self.write_journal();

        if let Err(e) = self.host.set_taskbar_visible(false) {
            warn!("{e}");
            self.snapshots.clear();
            self.clear_journal();
            return true;
        }
        for monitor in &monitors {
            if let Err(e) = self.host.set_work_area(monitor.bounds) {
                warn!("{}: {e}", monitor.device);
            }
        }
        debug!("taskbar hidden, {} workareas saved", self.snapshots.len());
        false
    }

    fn show(&mut self) -> bool {
        if let Err(e) = self.host.set_taskbar_visible(true) {
            warn!("{e}");
        }
        for snapshot in &self.snapshots {
            if let Err(e) = self.host.set_work_area(snapshot.work_area) {
                warn!("{}: {e}", snapshot.device);
            }
        }
        self.snapshots.clear();
        self.clear_journal();
        self.repaint_notification_area();
        debug!("taskbar shown");
        true
    }

    /// Tray icons of exited processes linger until the pointer passes
    /// over them.
    fn repaint_notification_area(&self) {
        let Some(area) = self.host.notification_area() else {
            return;
        };
        let points: Vec<(i32, i32)> = sweep_points(area, SWEEP_STRIDE).collect();
        self.host.nudge_notification_area(&points);
    }

    fn write_journal(&self) {
        let Some(path) = &self.journal else {
            return;
        };
        if let Err(e) = write_journal(path, &self.snapshots) {
            warn!("taskbar journal not written: {e}");
        }
    }

    fn clear_journal(&self) {
        if let Some(path) = &self.journal {
            remove_journal(path);
        }
    }
}

/// Grid of client coordinates covering `area` at `stride` pixels.
pub fn sweep_points(area: Rect, stride: i32) -> impl Iterator<Item = (i32, i32)> {
    let stride = stride.max(1) as usize;
    (0..area.width.max(0))
        .step_by(stride)
        .flat_map(move |x| (0..area.height.max(0)).step_by(stride).map(move |y| (x, y)))
}

fn read_journal(path: &Path) -> Result<Option<Vec<WorkareaSnapshot>>> {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(Error::io(path, e)),
    };
    let saved = serde_json::from_str(&text).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(saved))
}

/// Replaces the journal in one rename, so a crash mid-write leaves the
/// previous journal (or none) rather than a truncated one.
fn write_journal(path: &Path, snapshots: &[WorkareaSnapshot]) -> Result<()> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))?;
    let json = serde_json::to_string_pretty(snapshots).map_err(|source| Error::Json {
        path: path.to_path_buf(),
        source,
    })?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    tmp.write_all(json.as_bytes())
        .map_err(|e| Error::io(tmp.path(), e))?;
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    Ok(())
}

fn remove_journal(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("{}: {e}", path.display()),
    }
}

#[cfg(test)]
#[path = "taskbar_tests.rs"]
mod tests;
