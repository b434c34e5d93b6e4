use borderless_core::Error;
use windows::Win32::Foundation::{GetLastError, WIN32_ERROR};

/// Tags a `windows` crate error with the API call that produced it.
pub(crate) fn native(call: &'static str) -> impl FnOnce(windows::core::Error) -> Error {
    move |e| Error::native(call, e.message())
}

/// Builds an error from the calling thread's last-error code.
pub(crate) fn last_error(call: &'static str) -> Error {
    // SAFETY: GetLastError only reads thread-local state.
    let code = unsafe { GetLastError() };
    from_code(call, code)
}

pub(crate) fn from_code(call: &'static str, code: WIN32_ERROR) -> Error {
    Error::native(call, windows::core::Error::from(code.to_hresult()).message())
}
