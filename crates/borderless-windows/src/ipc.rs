use std::io::{BufRead, BufReader, Write};
use std::os::windows::io::FromRawHandle;

use borderless_core::ipc::{Command, PIPE_NAME, Response};
use borderless_core::{Error, Result};
use windows::Win32::Foundation::{
    CloseHandle, DUPLICATE_SAME_ACCESS, DuplicateHandle, HANDLE, INVALID_HANDLE_VALUE,
};
use windows::Win32::Storage::FileSystem::{
    CreateFileW, FILE_SHARE_NONE, FlushFileBuffers, OPEN_EXISTING, PIPE_ACCESS_DUPLEX,
};
use windows::Win32::System::Pipes::{
    ConnectNamedPipe, CreateNamedPipeW, DisconnectNamedPipe, PIPE_READMODE_BYTE, PIPE_TYPE_BYTE,
    PIPE_UNLIMITED_INSTANCES, PIPE_WAIT, WaitNamedPipeW,
};
use windows::Win32::System::Threading::GetCurrentProcess;
use windows::core::HSTRING;

use crate::error::native;

const GENERIC_READ_WRITE: u32 = 0x80000000 | 0x40000000;

fn io_error(e: std::io::Error) -> Error {
    Error::io(PIPE_NAME, e)
}

fn json_error(source: serde_json::Error) -> Error {
    Error::Json {
        path: PIPE_NAME.into(),
        source,
    }
}

/// A Named Pipe server that the daemon uses to accept CLI connections.
///
/// Each connection carries one JSON command line and gets one JSON
/// response line back.
pub struct PipeServer {
    handle: HANDLE,
}

impl PipeServer {
    /// Creates the pipe without waiting for a client.
    pub fn create() -> Result<Self> {
        let pipe_name = HSTRING::from(PIPE_NAME);

        // SAFETY: CreateNamedPipeW creates a new named pipe instance.
        // We pass valid parameters and check for INVALID_HANDLE_VALUE.
        let handle = unsafe {
            CreateNamedPipeW(
                &pipe_name,
                PIPE_ACCESS_DUPLEX,
                PIPE_TYPE_BYTE | PIPE_READMODE_BYTE | PIPE_WAIT,
                PIPE_UNLIMITED_INSTANCES,
                512, // output buffer size
                512, // input buffer size
                0,   // default timeout
                None,
            )
        };

        if handle == INVALID_HANDLE_VALUE {
            return Err(Error::native("CreateNamedPipeW", "could not create pipe"));
        }

        Ok(Self { handle })
    }

    /// Blocks until a client connects, reads a command, and returns it.
    pub fn accept_command(&self) -> Result<Command> {
        // SAFETY: ConnectNamedPipe blocks until a client connects.
        unsafe { ConnectNamedPipe(self.handle, None) }.map_err(native("ConnectNamedPipe"))?;

        let reader = duplicate_handle_as_file(self.handle)?;
        let mut line = String::new();
        BufReader::new(reader)
            .read_line(&mut line)
            .map_err(io_error)?;

        serde_json::from_str(line.trim()).map_err(json_error)
    }

    /// Sends a response back to the connected client and disconnects.
    pub fn send_response(&self, response: &Response) -> Result<()> {
        let mut writer = duplicate_handle_as_file(self.handle)?;
        let json = serde_json::to_string(response).map_err(json_error)?;
        writeln!(writer, "{json}").map_err(io_error)?;
        writer.flush().map_err(io_error)?;

        // SAFETY: FlushFileBuffers waits until the client has read
        // everything; disconnecting earlier would discard unread data.
        unsafe {
            let _ = FlushFileBuffers(self.handle);
        }

        // SAFETY: DisconnectNamedPipe frees this instance for the next client.
        unsafe { DisconnectNamedPipe(self.handle) }.map_err(native("DisconnectNamedPipe"))
    }
}

impl Drop for PipeServer {
    fn drop(&mut self) {
        // SAFETY: the server owns the pipe handle exclusively.
        unsafe {
            let _ = CloseHandle(self.handle);
        }
    }
}

/// Closes a HANDLE on drop.
struct HandleGuard(HANDLE);

impl Drop for HandleGuard {
    fn drop(&mut self) {
        // SAFETY: the guard owns this handle exclusively.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

/// Sends a command to the daemon and returns its response.
pub fn send_command(command: &Command) -> Result<Response> {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: CreateFileW opens an existing named pipe as a client.
    let handle = unsafe {
        CreateFileW(
            &pipe_name,
            GENERIC_READ_WRITE,
            FILE_SHARE_NONE,
            None,
            OPEN_EXISTING,
            Default::default(),
            None,
        )
    }
    .map_err(native("CreateFileW"))?;

    let _guard = HandleGuard(handle);

    let json = serde_json::to_string(command).map_err(json_error)?;
    let mut writer = duplicate_handle_as_file(handle)?;
    writeln!(writer, "{json}").map_err(io_error)?;
    writer.flush().map_err(io_error)?;

    let reader = duplicate_handle_as_file(handle)?;
    let mut line = String::new();
    BufReader::new(reader)
        .read_line(&mut line)
        .map_err(io_error)?;

    serde_json::from_str(line.trim()).map_err(json_error)
}

/// Whether the daemon's pipe exists.
///
/// `WaitNamedPipeW` with a 1 ms timeout checks for a free instance
/// without consuming a connection.
pub fn is_daemon_running() -> bool {
    let pipe_name = HSTRING::from(PIPE_NAME);

    // SAFETY: WaitNamedPipeW only queries the pipe namespace.
    unsafe { WaitNamedPipeW(&pipe_name, 1).as_bool() }
}

/// Duplicates a HANDLE and wraps it as a `std::fs::File`, so the File
/// and the original can be closed independently.
fn duplicate_handle_as_file(handle: HANDLE) -> Result<std::fs::File> {
    let mut dup = HANDLE::default();

    // SAFETY: DuplicateHandle writes a new handle into `dup`, which the
    // returned File then owns and closes on drop.
    unsafe {
        DuplicateHandle(
            GetCurrentProcess(),
            handle,
            GetCurrentProcess(),
            &mut dup,
            0,
            false,
            DUPLICATE_SAME_ACCESS,
        )
        .map_err(native("DuplicateHandle"))?;

        Ok(std::fs::File::from_raw_handle(dup.0))
    }
}
