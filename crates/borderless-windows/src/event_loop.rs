use std::sync::mpsc::{self, Sender};
use std::thread;

use borderless_core::hotkey::{HotkeyCommand, HotkeyDispatcher};
use borderless_core::{Error, Result, WindowHandle};
use windows::Win32::Foundation::{LPARAM, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, MSG, PostThreadMessageW, TranslateMessage, WM_HOTKEY, WM_QUIT,
};

use crate::hotkey::HotkeyManager;

/// Starts the Win32 message pump on a new thread.
///
/// Hotkeys must be registered on the thread that pumps their messages,
/// so registration happens on the new thread before it reports ready.
pub(crate) fn start(
    dispatcher: HotkeyDispatcher,
    hotkey_tx: Sender<(HotkeyCommand, WindowHandle)>,
) -> Result<EventLoopHandle> {
    let (ready_tx, ready_rx) = mpsc::channel::<u32>();

    let handle = thread::spawn(move || {
        // SAFETY: GetCurrentThreadId has no preconditions.
        let thread_id = unsafe { GetCurrentThreadId() };

        let hotkeys = HotkeyManager::register(dispatcher, hotkey_tx);
        let _ = ready_tx.send(thread_id);

        run_message_pump(&hotkeys);
        // Hotkeys are unregistered when `hotkeys` drops here.
    });

    let thread_id = ready_rx
        .recv()
        .map_err(|_| Error::native("event loop", "thread exited unexpectedly"))?;

    Ok(EventLoopHandle { thread_id, handle })
}

/// Handle for controlling the event loop from the daemon.
pub(crate) struct EventLoopHandle {
    thread_id: u32,
    handle: thread::JoinHandle<()>,
}

impl EventLoopHandle {
    /// Signals the event loop to stop and waits for the thread to finish.
    pub(crate) fn stop(self) {
        // SAFETY: PostThreadMessageW only queues a message.
        unsafe {
            let _ = PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0));
        }
        let _ = self.handle.join();
    }
}

/// Dispatches hotkey messages and blocks until WM_QUIT is received.
fn run_message_pump(hotkeys: &HotkeyManager) {
    let mut msg = MSG::default();

    while unsafe { GetMessageW(&mut msg, None, 0, 0).as_bool() } {
        if msg.message == WM_HOTKEY {
            hotkeys.dispatch(msg.wParam.0 as i32, msg.lParam.0);
            continue;
        }

        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
