use std::sync::mpsc::Sender;

use borderless_core::WindowHandle;
use borderless_core::hotkey::{HotkeyCommand, HotkeyDispatcher, modifiers};
use tracing::{debug, warn};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    HOT_KEY_MODIFIERS, RegisterHotKey, UnregisterHotKey,
};
use windows::Win32::UI::WindowsAndMessaging::GetForegroundWindow;

/// Manages global hotkey registrations.
///
/// Hotkeys are registered on the current thread's message queue.
/// `WM_HOTKEY` messages arrive via the Win32 message pump running
/// on the same thread.
pub(crate) struct HotkeyManager {
    dispatcher: HotkeyDispatcher,
    registered: Vec<i32>,
    sender: Sender<(HotkeyCommand, WindowHandle)>,
}

impl HotkeyManager {
    /// Registers every binding in `dispatcher`. A binding another program
    /// already owns is logged and skipped.
    pub(crate) fn register(
        dispatcher: HotkeyDispatcher,
        sender: Sender<(HotkeyCommand, WindowHandle)>,
    ) -> Self {
        let mut registered = Vec::new();
        for hotkey in dispatcher.hotkeys() {
            let id = hotkey.command.id();
            let flags = HOT_KEY_MODIFIERS(hotkey.modifiers | modifiers::NO_REPEAT);

            // SAFETY: RegisterHotKey registers a system-wide hotkey on the
            // current thread's message queue under a unique id.
            match unsafe { RegisterHotKey(None, id, flags, hotkey.vk) } {
                Ok(()) => {
                    debug!("registered {:?} (vk=0x{:02X})", hotkey.command, hotkey.vk);
                    registered.push(id);
                }
                Err(e) => warn!(
                    "failed to register {:?} (vk=0x{:02X}): {}",
                    hotkey.command,
                    hotkey.vk,
                    e.message()
                ),
            }
        }
        Self {
            dispatcher,
            registered,
            sender,
        }
    }

    /// Dispatches a `WM_HOTKEY` message, pairing the command with the
    /// window that had focus when the key was pressed.
    pub(crate) fn dispatch(&self, id: i32, lparam: isize) {
        let Some(command) = self.dispatcher.resolve(id, lparam) else {
            return;
        };
        // SAFETY: GetForegroundWindow is a simple query.
        let foreground = unsafe { GetForegroundWindow() };
        let _ = self.sender.send((command, foreground.0 as WindowHandle));
    }
}

impl Drop for HotkeyManager {
    fn drop(&mut self) {
        for &id in &self.registered {
            // SAFETY: UnregisterHotKey removes the hotkey registration.
            unsafe {
                let _ = UnregisterHotKey(None, id);
            }
        }
    }
}
