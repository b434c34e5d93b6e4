use borderless_core::taskbar::{Monitor, TaskbarHost};
use borderless_core::{Error, Rect, Result};

use windows::Win32::Foundation::{HWND, LPARAM, RECT, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    FindWindowExW, FindWindowW, GetClientRect, IsWindowVisible, PostMessageW, SPI_SETWORKAREA,
    SPIF_SENDCHANGE, SW_HIDE, SW_SHOWNOACTIVATE, ShowWindow, SystemParametersInfoW, WM_MOUSEMOVE,
};
use windows::core::{PCWSTR, w};

use crate::error::native;
use crate::monitor;
use crate::window::Win32Desktop;

/// The primary taskbar window, if the shell is running.
fn taskbar_window() -> Option<HWND> {
    // SAFETY: FindWindowW only reads the window list.
    unsafe { FindWindowW(w!("Shell_TrayWnd"), PCWSTR::null()) }.ok()
}

/// Walks Shell_TrayWnd > TrayNotifyWnd > SysPager to the toolbar that
/// hosts the tray icons. Its caption changed across Windows releases.
fn notification_toolbar() -> Option<HWND> {
    let child = |parent: HWND, class: PCWSTR| {
        // SAFETY: FindWindowExW only reads the window list.
        unsafe { FindWindowExW(Some(parent), None, class, PCWSTR::null()) }.ok()
    };

    let tray = taskbar_window()?;
    let notify = child(tray, w!("TrayNotifyWnd"))?;
    let pager = child(notify, w!("SysPager"))?;

    [w!("Notification Area"), w!("User Promoted Notification Area")]
        .into_iter()
        .find_map(|caption| {
            // SAFETY: as above.
            unsafe { FindWindowExW(Some(pager), None, w!("ToolbarWindow32"), caption) }.ok()
        })
}

impl TaskbarHost for Win32Desktop {
    fn taskbar_visible(&self) -> Result<bool> {
        let taskbar =
            taskbar_window().ok_or_else(|| Error::native("FindWindowW", "no Shell_TrayWnd"))?;
        // SAFETY: IsWindowVisible is a simple query.
        Ok(unsafe { IsWindowVisible(taskbar) }.as_bool())
    }

    fn set_taskbar_visible(&self, visible: bool) -> Result<()> {
        let taskbar =
            taskbar_window().ok_or_else(|| Error::native("FindWindowW", "no Shell_TrayWnd"))?;
        let command = if visible { SW_SHOWNOACTIVATE } else { SW_HIDE };
        // ShowWindow reports the previous visibility, not success.
        // SAFETY: ShowWindow is safe to call with any HWND.
        unsafe {
            let _ = ShowWindow(taskbar, command);
        }
        Ok(())
    }

    fn monitors(&self) -> Result<Vec<Monitor>> {
        monitor::enumerate_monitors()
    }

    /// The OS picks the monitor from the rectangle itself.
    fn set_work_area(&self, area: Rect) -> Result<()> {
        let mut rc = RECT {
            left: area.x,
            top: area.y,
            right: area.right(),
            bottom: area.bottom(),
        };
        // SAFETY: SPI_SETWORKAREA reads a RECT we own for the call's duration.
        unsafe {
            SystemParametersInfoW(
                SPI_SETWORKAREA,
                0,
                Some(&mut rc as *mut RECT as *mut _),
                SPIF_SENDCHANGE,
            )
        }
        .map_err(native("SystemParametersInfoW"))
    }

    fn notification_area(&self) -> Option<Rect> {
        let toolbar = notification_toolbar()?;
        let mut rc = RECT::default();
        // SAFETY: GetClientRect fills a caller-owned RECT.
        unsafe { GetClientRect(toolbar, &mut rc) }.ok()?;
        Some(Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom))
    }

    /// Posts synthetic mouse moves; the real cursor does not move.
    ///
    /// Never blocks on the shell, so a hung explorer cannot stall us.
    fn nudge_notification_area(&self, points: &[(i32, i32)]) {
        let Some(toolbar) = notification_toolbar() else {
            return;
        };
        for &(x, y) in points {
            let position = ((y as isize) << 16) | (x as isize & 0xFFFF);
            // SAFETY: PostMessageW queues a message and never dereferences lparam.
            unsafe {
                let _ = PostMessageW(Some(toolbar), WM_MOUSEMOVE, WPARAM(0), LPARAM(position));
            }
        }
    }
}
