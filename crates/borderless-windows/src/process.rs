use std::path::Path;

use windows::Win32::Foundation::{CloseHandle, HANDLE, STILL_ACTIVE};
use windows::Win32::System::ProcessStatus::K32GetModuleFileNameExW;
use windows::Win32::System::Threading::{
    GetExitCodeProcess, OpenProcess, PROCESS_QUERY_INFORMATION, PROCESS_QUERY_LIMITED_INFORMATION,
    PROCESS_VM_READ,
};

/// Closes the wrapped process handle on drop.
struct ProcessHandle(HANDLE);

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        // SAFETY: the handle came from a successful OpenProcess.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Checks whether a process with the given PID is still running.
///
/// Opening the process is not enough: a handle can outlive the process
/// while someone else still holds it. The exit code stays `STILL_ACTIVE`
/// only until the process actually terminates.
pub fn is_process_alive(pid: u32) -> bool {
    // SAFETY: OpenProcess with least-privilege query access.
    let Ok(handle) = (unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, false, pid) }) else {
        return false;
    };
    let handle = ProcessHandle(handle);

    let mut code = 0u32;
    // SAFETY: the handle is open and `code` is a valid out pointer.
    match unsafe { GetExitCodeProcess(handle.0, &mut code) } {
        Ok(()) => code == STILL_ACTIVE.0 as u32,
        Err(_) => false,
    }
}

/// Returns the executable file name without its extension, e.g. `game`
/// for `C:\Games\game.exe`.
///
/// Protected and elevated processes cannot be opened from a normal
/// session; those yield `None`.
pub fn binary_name(pid: u32) -> Option<String> {
    let path = exe_path(pid)?;
    Path::new(&path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

/// Returns the executable path for a process ID.
fn exe_path(pid: u32) -> Option<String> {
    // SAFETY: the handle is closed by ProcessHandle; the buffer is owned.
    unsafe {
        let handle = ProcessHandle(
            OpenProcess(PROCESS_QUERY_INFORMATION | PROCESS_VM_READ, false, pid).ok()?,
        );
        let mut buf = [0u16; 1024];
        let len = K32GetModuleFileNameExW(Some(handle.0), None, &mut buf);
        if len == 0 {
            return None;
        }
        String::from_utf16(&buf[..len as usize]).ok()
    }
}
