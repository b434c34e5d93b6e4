use borderless_core::{Rect, Result, WindowHandle, WindowHost, WindowStyles};

use windows::Win32::Foundation::{ERROR_SUCCESS, GetLastError, HWND, SetLastError};
use windows::Win32::UI::WindowsAndMessaging::{
    DrawMenuBar, GWL_EXSTYLE, GWL_STYLE, GetMenu, GetMenuItemCount, GetWindowLongPtrW,
    HWND_NOTOPMOST, HWND_TOPMOST, MF_BYPOSITION, MF_REMOVE, RemoveMenu, SW_MAXIMIZE,
    SWP_FRAMECHANGED, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE, SWP_NOZORDER, SWP_SHOWWINDOW,
    SetWindowLongPtrW, SetWindowPos, ShowWindow, WINDOW_LONG_PTR_INDEX,
};

use crate::error::{last_error, native};
use crate::monitor;

/// The live Windows desktop.
///
/// Holds no state of its own: every call goes straight to Win32, so the
/// engine can clone it freely into each component that needs a host.
#[derive(Debug, Clone, Copy, Default)]
pub struct Win32Desktop;

/// Converts an engine handle back into an `HWND`.
pub(crate) fn hwnd(handle: WindowHandle) -> HWND {
    HWND(handle as *mut _)
}

impl Win32Desktop {
    fn read_long(handle: WindowHandle, index: WINDOW_LONG_PTR_INDEX) -> Result<u32> {
        // A zero return is only an error if the last-error code says so.
        // SAFETY: GetWindowLongPtrW reads window data and tolerates stale handles.
        unsafe {
            SetLastError(ERROR_SUCCESS);
            let value = GetWindowLongPtrW(hwnd(handle), index);
            if value == 0 && GetLastError() != ERROR_SUCCESS {
                return Err(last_error("GetWindowLongPtrW"));
            }
            Ok(value as u32)
        }
    }

    fn write_long(handle: WindowHandle, index: WINDOW_LONG_PTR_INDEX, value: u32) -> Result<()> {
        // SAFETY: as above; SetWindowLongPtrW returns the previous value.
        unsafe {
            SetLastError(ERROR_SUCCESS);
            let previous = SetWindowLongPtrW(hwnd(handle), index, value as isize);
            if previous == 0 && GetLastError() != ERROR_SUCCESS {
                return Err(last_error("SetWindowLongPtrW"));
            }
        }
        Ok(())
    }
}

impl WindowHost for Win32Desktop {
    fn styles(&self, handle: WindowHandle) -> Result<WindowStyles> {
        Ok(WindowStyles::new(
            Self::read_long(handle, GWL_STYLE)?,
            Self::read_long(handle, GWL_EXSTYLE)?,
        ))
    }

    fn set_styles(&self, handle: WindowHandle, styles: WindowStyles) -> Result<()> {
        Self::write_long(handle, GWL_STYLE, styles.standard)?;
        Self::write_long(handle, GWL_EXSTYLE, styles.extended)?;

        // Style changes only take effect on the frame after a
        // SWP_FRAMECHANGED repositioning.
        // SAFETY: SetWindowPos with a valid HWND is safe.
        unsafe {
            SetWindowPos(
                hwnd(handle),
                None,
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOZORDER | SWP_NOACTIVATE | SWP_FRAMECHANGED,
            )
        }
        .map_err(native("SetWindowPos"))
    }

    fn bounds(&self, handle: WindowHandle) -> Result<Rect> {
        use windows::Win32::Foundation::RECT;
        use windows::Win32::UI::WindowsAndMessaging::GetWindowRect;

        let mut rc = RECT::default();
        // SAFETY: GetWindowRect fills a caller-owned RECT.
        unsafe { GetWindowRect(hwnd(handle), &mut rc) }.map_err(native("GetWindowRect"))?;
        Ok(Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom))
    }

    fn set_bounds(&self, handle: WindowHandle, rect: Rect) -> Result<()> {
        tracing::debug!(
            "set_bounds 0x{handle:X}: ({},{} {}x{})",
            rect.x,
            rect.y,
            rect.width,
            rect.height
        );

        // SAFETY: SetWindowPos with a valid HWND is safe.
        unsafe {
            SetWindowPos(
                hwnd(handle),
                None,
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                SWP_NOZORDER | SWP_NOACTIVATE | SWP_SHOWWINDOW | SWP_FRAMECHANGED,
            )
        }
        .map_err(native("SetWindowPos"))
    }

    fn maximize(&self, handle: WindowHandle) -> Result<()> {
        // ShowWindow reports the previous visibility, not success.
        // SAFETY: ShowWindow is safe to call with any HWND.
        unsafe {
            let _ = ShowWindow(hwnd(handle), SW_MAXIMIZE);
        }
        Ok(())
    }

    fn set_topmost(&self, handle: WindowHandle, topmost: bool) -> Result<()> {
        let after = if topmost { HWND_TOPMOST } else { HWND_NOTOPMOST };

        // SAFETY: SetWindowPos with a valid HWND is safe.
        unsafe {
            SetWindowPos(
                hwnd(handle),
                Some(after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
        }
        .map_err(native("SetWindowPos"))
    }

    fn strip_menu(&self, handle: WindowHandle) -> Result<()> {
        let hwnd = hwnd(handle);

        // SAFETY: the menu handle belongs to `hwnd`; removing items by
        // position from the front empties it without destroying submenus.
        unsafe {
            let menu = GetMenu(hwnd);
            if menu.is_invalid() {
                return Ok(());
            }
            let count = GetMenuItemCount(Some(menu));
            for _ in 0..count.max(0) {
                RemoveMenu(menu, 0, MF_BYPOSITION | MF_REMOVE).map_err(native("RemoveMenu"))?;
            }
            DrawMenuBar(hwnd).map_err(native("DrawMenuBar"))
        }
    }

    fn monitor_bounds(&self, handle: WindowHandle) -> Result<Rect> {
        monitor::bounds_for_window(hwnd(handle))
    }
}
