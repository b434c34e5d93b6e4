use std::mem;

use borderless_core::taskbar::Monitor;
use borderless_core::{Error, Rect, Result};
use windows::Win32::Foundation::{HWND, LPARAM, RECT};
use windows::Win32::Graphics::Gdi::{
    EnumDisplayMonitors, GetMonitorInfoW, HDC, HMONITOR, MONITOR_DEFAULTTONEAREST, MONITORINFO,
    MONITORINFOEXW, MonitorFromWindow,
};
use windows::core::BOOL;

fn to_rect(rc: RECT) -> Rect {
    Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom)
}

/// Returns the full bounds of the monitor nearest to the given window.
///
/// This is the whole display, taskbar included, which is what a
/// fullscreen window should cover.
pub fn bounds_for_window(hwnd: HWND) -> Result<Rect> {
    // SAFETY: MonitorFromWindow always returns a monitor with DEFAULTTONEAREST.
    let monitor = unsafe { MonitorFromWindow(hwnd, MONITOR_DEFAULTTONEAREST) };

    let mut info = MONITORINFO {
        cbSize: mem::size_of::<MONITORINFO>() as u32,
        ..Default::default()
    };

    // SAFETY: GetMonitorInfoW fills the MONITORINFO struct; cbSize is set
    // as the API requires.
    if !unsafe { GetMonitorInfoW(monitor, &mut info) }.as_bool() {
        return Err(Error::native("GetMonitorInfoW", "no monitor info"));
    }
    Ok(to_rect(info.rcMonitor))
}

/// Lists every attached display with its device name, bounds and work area.
pub fn enumerate_monitors() -> Result<Vec<Monitor>> {
    let mut monitors: Vec<Monitor> = Vec::new();

    // SAFETY: EnumDisplayMonitors runs synchronously, so the Vec passed
    // through LPARAM outlives every callback invocation.
    let ok = unsafe {
        EnumDisplayMonitors(
            None,
            None,
            Some(enum_monitor_callback),
            LPARAM(&mut monitors as *mut Vec<Monitor> as isize),
        )
    };

    if !ok.as_bool() {
        return Err(Error::native("EnumDisplayMonitors", "enumeration failed"));
    }
    tracing::debug!("enumerated {} monitors", monitors.len());
    Ok(monitors)
}

unsafe extern "system" fn enum_monitor_callback(
    hmonitor: HMONITOR,
    _hdc: HDC,
    _clip: *mut RECT,
    lparam: LPARAM,
) -> BOOL {
    // SAFETY: lparam is the Vec pointer from enumerate_monitors().
    let monitors = unsafe { &mut *(lparam.0 as *mut Vec<Monitor>) };

    let mut info = MONITORINFOEXW::default();
    info.monitorInfo.cbSize = mem::size_of::<MONITORINFOEXW>() as u32;

    // SAFETY: MONITORINFOEXW starts with a MONITORINFO, and cbSize tells
    // the API it may write the trailing device name.
    let ok = unsafe { GetMonitorInfoW(hmonitor, &mut info as *mut MONITORINFOEXW as *mut _) };
    if ok.as_bool() {
        let len = info
            .szDevice
            .iter()
            .position(|&c| c == 0)
            .unwrap_or(info.szDevice.len());
        monitors.push(Monitor {
            device: String::from_utf16_lossy(&info.szDevice[..len]),
            bounds: to_rect(info.monitorInfo.rcMonitor),
            work_area: to_rect(info.monitorInfo.rcWork),
        });
    }

    BOOL(1) // continue
}
