//! In-memory desktop used by the unit tests.
//!
//! One `FakeDesktop` implements every host trait. Clones share state,
//! so a test keeps a handle for inspection while the component under
//! test owns another.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::rc::Rc;

use crate::cursor::{CursorHandle, CursorHost};
use crate::hotkey::PointerHost;
use crate::style::{WindowStyles, extended, standard};
use crate::taskbar::{Monitor, TaskbarHost};
use crate::transform::SideEffects;
use crate::visibility::VisibilityRequest;
use crate::window::{WindowHandle, WindowHost, WindowInfo, WindowSource};
use crate::{Error, Rect, Result};

/// Image id of the stock arrow cursor.
pub const ARROW: u32 = 1;
/// Image id of any cursor loaded from a file.
pub const FROM_FILE: u32 = 2;

#[derive(Debug, Clone)]
pub struct FakeWindow {
    pub pid: u32,
    pub binary_name: String,
    pub title: String,
    pub styles: WindowStyles,
    pub bounds: Rect,
    pub monitor: Rect,
    pub maximized: bool,
    pub topmost: bool,
    pub menu_items: u32,
    pub hidden: bool,
}

#[derive(Debug)]
struct State {
    windows: HashMap<WindowHandle, FakeWindow>,
    order: Vec<WindowHandle>,
    dead_pids: HashSet<u32>,
    failing: HashSet<&'static str>,
    calls: Vec<String>,
    taskbar_visible: bool,
    monitors: Vec<Monitor>,
    notification_area: Option<Rect>,
    nudges: usize,
    sweeps: usize,
    next_cursor: CursorHandle,
    live_cursors: HashMap<CursorHandle, u32>,
    installed_cursor: u32,
    cursor_copies: usize,
    cursor_loads: usize,
    clip: Option<Rect>,
}

#[derive(Debug, Clone)]
pub struct FakeDesktop {
    state: Rc<RefCell<State>>,
}

pub fn decorated_styles() -> WindowStyles {
    WindowStyles::new(
        standard::VISIBLE
            | standard::CAPTION
            | standard::THICK_FRAME
            | standard::SYSTEM_MENU
            | standard::MINIMIZE_BOX
            | standard::MAXIMIZE_BOX,
        extended::WINDOW_EDGE | extended::APP_WINDOW | 0x0010_0000,
    )
}

pub fn primary_monitor() -> Monitor {
    Monitor {
        device: r"\\.\DISPLAY1".into(),
        bounds: Rect::new(0, 0, 1920, 1080),
        work_area: Rect::new(0, 0, 1920, 1040),
    }
}

pub fn secondary_monitor() -> Monitor {
    Monitor {
        device: r"\\.\DISPLAY2".into(),
        bounds: Rect::new(1920, 0, 2560, 1440),
        work_area: Rect::new(1920, 0, 2560, 1400),
    }
}

impl FakeDesktop {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                windows: HashMap::new(),
                order: Vec::new(),
                dead_pids: HashSet::new(),
                failing: HashSet::new(),
                calls: Vec::new(),
                taskbar_visible: true,
                monitors: vec![primary_monitor(), secondary_monitor()],
                notification_area: Some(Rect::new(0, 0, 20, 10)),
                nudges: 0,
                sweeps: 0,
                next_cursor: 100,
                live_cursors: HashMap::new(),
                installed_cursor: ARROW,
                cursor_copies: 0,
                cursor_loads: 0,
                clip: None,
            })),
        }
    }

    pub fn add_window(&self, handle: WindowHandle, pid: u32, binary_name: &str, title: &str) {
        let mut state = self.state.borrow_mut();
        let monitor = state.monitors[0].bounds;
        state.windows.insert(
            handle,
            FakeWindow {
                pid,
                binary_name: binary_name.into(),
                title: title.into(),
                styles: decorated_styles(),
                bounds: Rect::new(100, 100, 800, 600),
                monitor,
                maximized: false,
                topmost: false,
                menu_items: 3,
                hidden: false,
            },
        );
        state.order.push(handle);
    }

    pub fn window(&self, handle: WindowHandle) -> FakeWindow {
        self.state.borrow().windows[&handle].clone()
    }

    pub fn edit_window(&self, handle: WindowHandle, edit: impl FnOnce(&mut FakeWindow)) {
        if let Some(window) = self.state.borrow_mut().windows.get_mut(&handle) {
            edit(window);
        }
    }

    pub fn set_title(&self, handle: WindowHandle, title: &str) {
        self.edit_window(handle, |w| w.title = title.into());
    }

    /// Puts the decorations back, as a game resetting its window would.
    pub fn redecorate(&self, handle: WindowHandle) {
        self.edit_window(handle, |w| w.styles = decorated_styles());
    }

    /// Hides the window without destroying it.
    pub fn hide_window(&self, handle: WindowHandle) {
        self.edit_window(handle, |w| w.hidden = true);
    }

    pub fn close_window(&self, handle: WindowHandle) {
        let mut state = self.state.borrow_mut();
        state.windows.remove(&handle);
        state.order.retain(|h| *h != handle);
    }

    pub fn kill_process(&self, pid: u32) {
        self.state.borrow_mut().dead_pids.insert(pid);
    }

    /// Makes every later call named `call` fail.
    pub fn fail_call(&self, call: &'static str) {
        self.state.borrow_mut().failing.insert(call);
    }

    /// Mutating calls in the order they happened.
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn set_monitors(&self, monitors: Vec<Monitor>) {
        self.state.borrow_mut().monitors = monitors;
    }

    pub fn current_monitors(&self) -> Vec<Monitor> {
        self.state.borrow().monitors.clone()
    }

    pub fn is_taskbar_visible(&self) -> bool {
        self.state.borrow().taskbar_visible
    }

    pub fn nudges(&self) -> usize {
        self.state.borrow().nudges
    }

    /// Host calls made to repaint the notification area.
    pub fn sweeps(&self) -> usize {
        self.state.borrow().sweeps
    }

    pub fn installed_cursor(&self) -> u32 {
        self.state.borrow().installed_cursor
    }

    pub fn cursor_copies(&self) -> usize {
        self.state.borrow().cursor_copies
    }

    pub fn cursor_loads(&self) -> usize {
        self.state.borrow().cursor_loads
    }

    /// Cursor handles that are neither installed nor released.
    pub fn live_cursors(&self) -> usize {
        self.state.borrow().live_cursors.len()
    }

    pub fn current_clip(&self) -> Option<Rect> {
        self.state.borrow().clip
    }

    fn check(&self, call: &'static str) -> Result<()> {
        if self.state.borrow().failing.contains(call) {
            return Err(Error::native(call, "injected failure"));
        }
        Ok(())
    }

    fn record(&self, call: String) {
        self.state.borrow_mut().calls.push(call);
    }

    fn with_window<T>(
        &self,
        call: &'static str,
        handle: WindowHandle,
        f: impl FnOnce(&mut FakeWindow) -> T,
    ) -> Result<T> {
        self.check(call)?;
        let mut state = self.state.borrow_mut();
        let window = state
            .windows
            .get_mut(&handle)
            .ok_or_else(|| Error::native(call, "invalid window handle"))?;
        Ok(f(window))
    }

    fn new_cursor(&self, image: u32) -> CursorHandle {
        let mut state = self.state.borrow_mut();
        state.next_cursor += 1;
        let handle = state.next_cursor;
        state.live_cursors.insert(handle, image);
        handle
    }
}

impl WindowHost for FakeDesktop {
    fn styles(&self, handle: WindowHandle) -> Result<WindowStyles> {
        self.with_window("styles", handle, |w| w.styles)
    }

    fn set_styles(&self, handle: WindowHandle, styles: WindowStyles) -> Result<()> {
        self.with_window("set_styles", handle, |w| w.styles = styles)?;
        self.record(format!("set_styles {handle}"));
        Ok(())
    }

    fn bounds(&self, handle: WindowHandle) -> Result<Rect> {
        self.with_window("bounds", handle, |w| w.bounds)
    }

    fn set_bounds(&self, handle: WindowHandle, rect: Rect) -> Result<()> {
        self.with_window("set_bounds", handle, |w| {
            w.bounds = rect;
            w.maximized = false;
        })?;
        self.record(format!("set_bounds {handle}"));
        Ok(())
    }

    fn maximize(&self, handle: WindowHandle) -> Result<()> {
        self.with_window("maximize", handle, |w| w.maximized = true)?;
        self.record(format!("maximize {handle}"));
        Ok(())
    }

    fn set_topmost(&self, handle: WindowHandle, topmost: bool) -> Result<()> {
        self.with_window("set_topmost", handle, |w| w.topmost = topmost)?;
        self.record(format!("set_topmost {handle} {topmost}"));
        Ok(())
    }

    fn strip_menu(&self, handle: WindowHandle) -> Result<()> {
        self.with_window("strip_menu", handle, |w| w.menu_items = 0)?;
        self.record(format!("strip_menu {handle}"));
        Ok(())
    }

    fn monitor_bounds(&self, handle: WindowHandle) -> Result<Rect> {
        self.with_window("monitor_bounds", handle, |w| w.monitor)
    }
}

impl WindowSource for FakeDesktop {
    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        self.check("enumerate")?;
        let state = self.state.borrow();
        Ok(state
            .order
            .iter()
            .filter_map(|h| state.windows.get(h).map(|w| (*h, w)))
            .filter(|(_, w)| !w.hidden && !state.dead_pids.contains(&w.pid))
            .map(|(handle, w)| WindowInfo {
                handle,
                pid: w.pid,
                binary_name: w.binary_name.clone(),
                title: w.title.clone(),
                styles: w.styles,
            })
            .collect())
    }

    fn current_title(&self, handle: WindowHandle) -> Option<String> {
        self.state
            .borrow()
            .windows
            .get(&handle)
            .filter(|w| !w.hidden)
            .map(|w| w.title.clone())
    }

    fn process_running(&self, pid: u32) -> bool {
        !self.state.borrow().dead_pids.contains(&pid)
    }

    fn describe(&self, handle: WindowHandle) -> Option<WindowInfo> {
        self.enumerate()
            .ok()?
            .into_iter()
            .find(|info| info.handle == handle)
    }
}

impl TaskbarHost for FakeDesktop {
    fn taskbar_visible(&self) -> Result<bool> {
        self.check("taskbar_visible")?;
        Ok(self.state.borrow().taskbar_visible)
    }

    fn set_taskbar_visible(&self, visible: bool) -> Result<()> {
        self.check("set_taskbar_visible")?;
        self.state.borrow_mut().taskbar_visible = visible;
        self.record(format!("taskbar {visible}"));
        Ok(())
    }

    fn monitors(&self) -> Result<Vec<Monitor>> {
        self.check("monitors")?;
        Ok(self.current_monitors())
    }

    fn set_work_area(&self, area: Rect) -> Result<()> {
        self.check("set_work_area")?;
        let mut state = self.state.borrow_mut();
        let monitor = state
            .monitors
            .iter_mut()
            .find(|m| m.bounds.x == area.x && m.bounds.y == area.y)
            .ok_or_else(|| Error::native("set_work_area", "no monitor at origin"))?;
        monitor.work_area = area;
        state.calls.push(format!("work_area {},{}", area.x, area.y));
        Ok(())
    }

    fn notification_area(&self) -> Option<Rect> {
        self.state.borrow().notification_area
    }

    fn nudge_notification_area(&self, points: &[(i32, i32)]) {
        let mut state = self.state.borrow_mut();
        state.sweeps += 1;
        state.nudges += points.len();
    }
}

impl CursorHost for FakeDesktop {
    fn copy_current(&self) -> Result<CursorHandle> {
        self.check("copy_current")?;
        self.state.borrow_mut().cursor_copies += 1;
        Ok(self.new_cursor(self.installed_cursor()))
    }

    fn load_from_file(&self, path: &Path) -> Result<CursorHandle> {
        self.check("load_from_file")?;
        std::fs::read(path).map_err(|e| Error::io(path, e))?;
        self.state.borrow_mut().cursor_loads += 1;
        Ok(self.new_cursor(FROM_FILE))
    }

    fn duplicate(&self, cursor: CursorHandle) -> Result<CursorHandle> {
        self.check("duplicate")?;
        let image = self.state.borrow().live_cursors.get(&cursor).copied();
        let image = image.ok_or_else(|| Error::native("duplicate", "invalid cursor"))?;
        Ok(self.new_cursor(image))
    }

    fn install(&self, cursor: CursorHandle) -> Result<()> {
        self.check("install")?;
        let mut state = self.state.borrow_mut();
        let image = state
            .live_cursors
            .remove(&cursor)
            .ok_or_else(|| Error::native("install", "invalid cursor"))?;
        state.installed_cursor = image;
        state.calls.push(format!("install {image}"));
        Ok(())
    }

    fn release(&self, cursor: CursorHandle) {
        self.state.borrow_mut().live_cursors.remove(&cursor);
    }
}

impl PointerHost for FakeDesktop {
    fn clip(&self) -> Result<Rect> {
        self.check("clip")?;
        let state = self.state.borrow();
        let desktop = Rect::containing(state.monitors.iter().map(|m| &m.bounds));
        Ok(state.clip.or(desktop).unwrap_or_default())
    }

    fn set_clip(&self, rect: Option<Rect>) -> Result<()> {
        self.check("set_clip")?;
        self.state.borrow_mut().clip = rect;
        Ok(())
    }

    fn client_rect(&self, handle: WindowHandle) -> Result<Rect> {
        self.with_window("client_rect", handle, |w| {
            Rect::new(w.bounds.x + 8, w.bounds.y + 31, w.bounds.width - 16, w.bounds.height - 39)
        })
    }
}

impl SideEffects for FakeDesktop {
    fn set_taskbar(&mut self, request: VisibilityRequest) {
        self.record(format!("effect taskbar {request:?}"));
    }

    fn set_cursor(&mut self, request: VisibilityRequest) {
        self.record(format!("effect cursor {request:?}"));
    }
}
