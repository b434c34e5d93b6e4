use std::os::windows::ffi::OsStrExt;
use std::path::Path;

use borderless_core::Result;
use borderless_core::cursor::{CursorHandle, CursorHost};

use windows::Win32::UI::WindowsAndMessaging::{
    CopyIcon, DestroyCursor, HCURSOR, HICON, IDC_ARROW, LoadCursorFromFileW, LoadCursorW,
    OCR_NORMAL, SetSystemCursor,
};
use windows::core::PCWSTR;

use crate::error::native;
use crate::window::Win32Desktop;

fn hcursor(cursor: CursorHandle) -> HCURSOR {
    HCURSOR(cursor as *mut _)
}

impl CursorHost for Win32Desktop {
    fn copy_current(&self) -> Result<CursorHandle> {
        // SAFETY: the shared arrow cursor is only read; CopyIcon returns
        // a new handle we own.
        unsafe {
            let arrow = LoadCursorW(None, IDC_ARROW).map_err(native("LoadCursorW"))?;
            let copy = CopyIcon(HICON(arrow.0)).map_err(native("CopyIcon"))?;
            Ok(copy.0 as CursorHandle)
        }
    }

    fn load_from_file(&self, path: &Path) -> Result<CursorHandle> {
        let wide: Vec<u16> = path.as_os_str().encode_wide().chain(Some(0)).collect();
        // SAFETY: `wide` is NUL-terminated and outlives the call.
        let cursor = unsafe { LoadCursorFromFileW(PCWSTR(wide.as_ptr())) }
            .map_err(native("LoadCursorFromFileW"))?;
        Ok(cursor.0 as CursorHandle)
    }

    fn duplicate(&self, cursor: CursorHandle) -> Result<CursorHandle> {
        // SAFETY: CopyIcon reads `cursor` and returns a new owned handle.
        let copy = unsafe { CopyIcon(HICON(cursor as *mut _)) }.map_err(native("CopyIcon"))?;
        Ok(copy.0 as CursorHandle)
    }

    /// The system destroys `cursor` once it is installed.
    fn install(&self, cursor: CursorHandle) -> Result<()> {
        // SAFETY: SetSystemCursor takes ownership of a handle we own.
        unsafe { SetSystemCursor(hcursor(cursor), OCR_NORMAL) }.map_err(native("SetSystemCursor"))
    }

    fn release(&self, cursor: CursorHandle) {
        // SAFETY: only handles this host created are released.
        unsafe {
            let _ = DestroyCursor(hcursor(cursor));
        }
    }
}
