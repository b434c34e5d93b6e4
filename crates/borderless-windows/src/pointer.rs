use borderless_core::hotkey::PointerHost;
use borderless_core::{Rect, Result, WindowHandle};

use windows::Win32::Foundation::{POINT, RECT};
use windows::Win32::Graphics::Gdi::ClientToScreen;
use windows::Win32::UI::WindowsAndMessaging::{ClipCursor, GetClientRect, GetClipCursor};

use crate::error::native;
use crate::window::{Win32Desktop, hwnd};

impl PointerHost for Win32Desktop {
    fn clip(&self) -> Result<Rect> {
        let mut rc = RECT::default();
        // SAFETY: GetClipCursor fills a caller-owned RECT.
        unsafe { GetClipCursor(&mut rc) }.map_err(native("GetClipCursor"))?;
        Ok(Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom))
    }

    fn set_clip(&self, rect: Option<Rect>) -> Result<()> {
        let rc = rect.map(|r| RECT {
            left: r.x,
            top: r.y,
            right: r.right(),
            bottom: r.bottom(),
        });
        // SAFETY: the RECT, when present, lives until the call returns.
        unsafe { ClipCursor(rc.as_ref().map(|r| r as *const RECT)) }.map_err(native("ClipCursor"))
    }

    /// The client area in screen coordinates.
    fn client_rect(&self, handle: WindowHandle) -> Result<Rect> {
        let hwnd = hwnd(handle);
        let mut rc = RECT::default();
        // SAFETY: both calls write into caller-owned structs.
        unsafe {
            GetClientRect(hwnd, &mut rc).map_err(native("GetClientRect"))?;
            let mut origin = POINT::default();
            if !ClientToScreen(hwnd, &mut origin).as_bool() {
                return Err(borderless_core::Error::native("ClientToScreen", "failed"));
            }
            Ok(Rect::new(origin.x, origin.y, rc.right - rc.left, rc.bottom - rc.top))
        }
    }
}
