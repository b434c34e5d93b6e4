use borderless_core::{Result, WindowHandle, WindowHost, WindowInfo, WindowSource};

use windows::Win32::Foundation::{HWND, LPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GetWindowTextLengthW, GetWindowTextW, GetWindowThreadProcessId, IsWindow,
    IsWindowVisible,
};
use windows::core::BOOL;

use crate::error::native;
use crate::process;
use crate::window::{Win32Desktop, hwnd};

/// Returns the handles of all visible top-level windows.
///
/// Filtering by title, process and style happens later, in
/// [`Win32Desktop::describe`] and the core registry.
pub fn visible_windows() -> Result<Vec<WindowHandle>> {
    let mut handles: Vec<WindowHandle> = Vec::new();

    // SAFETY: EnumWindows calls our callback for each top-level window.
    // The Vec outlives the call because EnumWindows runs synchronously.
    unsafe {
        EnumWindows(
            Some(enum_window_callback),
            LPARAM(&mut handles as *mut _ as isize),
        )
        .map_err(native("EnumWindows"))?;
    }

    Ok(handles)
}

unsafe extern "system" fn enum_window_callback(hwnd: HWND, lparam: LPARAM) -> BOOL {
    // SAFETY: lparam is a pointer to our Vec, cast from visible_windows().
    let handles = unsafe { &mut *(lparam.0 as *mut Vec<WindowHandle>) };

    // SAFETY: IsWindowVisible is a simple query.
    if unsafe { IsWindowVisible(hwnd) }.as_bool() {
        handles.push(hwnd.0 as WindowHandle);
    }

    BOOL(1) // TRUE, continue enumerating
}

/// Reads a window's caption text. Empty for untitled windows.
fn window_title(hwnd: HWND) -> String {
    // SAFETY: GetWindowTextLengthW and GetWindowTextW read window text
    // into a buffer we own.
    unsafe {
        let length = GetWindowTextLengthW(hwnd);
        if length == 0 {
            return String::new();
        }

        // +1 for the null terminator that Windows requires
        let mut buffer = vec![0u16; (length + 1) as usize];
        let copied = GetWindowTextW(hwnd, &mut buffer);
        String::from_utf16_lossy(&buffer[..copied as usize])
    }
}

fn window_pid(hwnd: HWND) -> u32 {
    let mut pid = 0u32;
    // SAFETY: GetWindowThreadProcessId writes the owning PID into `pid`.
    unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid)) };
    pid
}

impl WindowSource for Win32Desktop {
    fn enumerate(&self) -> Result<Vec<WindowInfo>> {
        let windows: Vec<WindowInfo> = visible_windows()?
            .into_iter()
            .filter_map(|handle| self.describe(handle))
            .collect();
        tracing::trace!("enumerated {} candidate windows", windows.len());
        Ok(windows)
    }

    fn current_title(&self, handle: WindowHandle) -> Option<String> {
        let hwnd = hwnd(handle);
        // SAFETY: IsWindow and IsWindowVisible accept any value, valid
        // handle or not.
        let shown = unsafe { IsWindow(Some(hwnd)).as_bool() && IsWindowVisible(hwnd).as_bool() };
        if !shown {
            return None;
        }
        Some(window_title(hwnd))
    }

    fn process_running(&self, pid: u32) -> bool {
        process::is_process_alive(pid)
    }

    /// Untitled windows and processes we cannot open are not candidates.
    fn describe(&self, handle: WindowHandle) -> Option<WindowInfo> {
        let hwnd = hwnd(handle);
        let title = window_title(hwnd);
        if title.is_empty() {
            return None;
        }
        let pid = window_pid(hwnd);
        if pid == 0 {
            return None;
        }
        let binary_name = process::binary_name(pid)?;
        let styles = self.styles(handle).ok()?;
        Some(WindowInfo {
            handle,
            pid,
            binary_name,
            title,
            styles,
        })
    }
}
