//! Global hotkeys: binding resolution, `WM_HOTKEY` decoding and the
//! stateless mouse-lock decision.

pub mod keys;

use tracing::warn;

use crate::config::{HotkeyBinding, HotkeysConfig, Modifier};
use crate::window::WindowHandle;
use crate::{Rect, Result};

/// Win32 hotkey modifier bits.
pub mod modifiers {
    pub const ALT: u32 = 0x0001;
    pub const CONTROL: u32 = 0x0002;
    pub const SHIFT: u32 = 0x0004;
    pub const WIN: u32 = 0x0008;
    /// Suppresses auto-repeat. Never reported back in `WM_HOTKEY`.
    pub const NO_REPEAT: u32 = 0x4000;

    pub(super) const MASK: u32 = ALT | CONTROL | SHIFT | WIN;
}

impl Modifier {
    pub fn bits(&self) -> u32 {
        match self {
            Self::Alt => modifiers::ALT,
            Self::Ctrl => modifiers::CONTROL,
            Self::Shift => modifiers::SHIFT,
            Self::Win => modifiers::WIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeyCommand {
    /// Make the foreground window borderless, or restore it.
    ToggleBorderless,
    ToggleCursor,
    /// Clip the pointer to the foreground window's client area.
    ToggleMouseLock,
}

impl HotkeyCommand {
    pub const ALL: [Self; 3] = [
        Self::ToggleBorderless,
        Self::ToggleCursor,
        Self::ToggleMouseLock,
    ];

    /// Registration id passed to the OS.
    pub fn id(self) -> i32 {
        match self {
            Self::ToggleBorderless => 1,
            Self::ToggleCursor => 2,
            Self::ToggleMouseLock => 3,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }
}

/// A resolved binding ready for registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hotkey {
    pub command: HotkeyCommand,
    /// Modifier bits, without [`modifiers::NO_REPEAT`].
    pub modifiers: u32,
    pub vk: u32,
}

/// Maps incoming hotkey events to commands.
#[derive(Debug, Clone, Default)]
pub struct HotkeyDispatcher {
    hotkeys: Vec<Hotkey>,
}

impl HotkeyDispatcher {
    pub fn new(hotkeys: Vec<Hotkey>) -> Self {
        Self { hotkeys }
    }

    /// Resolves the enabled bindings. Unknown key names are logged and
    /// left out.
    pub fn from_config(config: &HotkeysConfig) -> Self {
        let bound = [
            (HotkeyCommand::ToggleBorderless, &config.borderless),
            (HotkeyCommand::ToggleCursor, &config.cursor),
            (HotkeyCommand::ToggleMouseLock, &config.mouse_lock),
        ];
        let hotkeys = bound
            .into_iter()
            .filter(|(_, binding)| binding.enabled)
            .filter_map(|(command, binding)| resolve_binding(command, binding))
            .collect();
        Self { hotkeys }
    }

    pub fn hotkeys(&self) -> &[Hotkey] {
        &self.hotkeys
    }

    /// Splits a `WM_HOTKEY` lparam into `(modifiers, vk)`.
    pub fn decode(lparam: isize) -> (u32, u32) {
        let bits = lparam as u32;
        (bits & 0xFFFF, (bits >> 16) & 0xFFFF)
    }

    /// The command for a `WM_HOTKEY` with registration `id`, if the
    /// payload matches what was registered under it.
    pub fn resolve(&self, id: i32, lparam: isize) -> Option<HotkeyCommand> {
        let (mods, vk) = Self::decode(lparam);
        self.hotkeys
            .iter()
            .find(|h| {
                h.command.id() == id
                    && h.vk == vk
                    && h.modifiers & modifiers::MASK == mods & modifiers::MASK
            })
            .map(|h| h.command)
    }
}

fn resolve_binding(command: HotkeyCommand, binding: &HotkeyBinding) -> Option<Hotkey> {
    let Some(vk) = keys::vk_from_name(&binding.key) else {
        warn!("unknown key name {:?} for {command:?}", binding.key);
        return None;
    };
    let modifiers = binding.modifiers.iter().fold(0, |acc, m| acc | m.bits());
    Some(Hotkey {
        command,
        modifiers,
        vk,
    })
}

/// Pointer clipping operations used by the mouse lock.
pub trait PointerHost {
    /// The current clip rectangle; the whole desktop when unclipped.
    fn clip(&self) -> Result<Rect>;

    /// Clips the pointer to `rect`, or releases the clip on `None`.
    fn set_clip(&self, rect: Option<Rect>) -> Result<()>;

    /// The window's client area in screen coordinates.
    fn client_rect(&self, handle: WindowHandle) -> Result<Rect>;
}

/// What the mouse lock should clip to: nothing if the pointer is
/// already held to exactly `client`, otherwise `client`.
pub fn mouse_lock_target(current_clip: Rect, client: Rect) -> Option<Rect> {
    (current_clip != client).then_some(client)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binding(enabled: bool, key: &str, modifiers: &[Modifier]) -> HotkeyBinding {
        HotkeyBinding {
            enabled,
            key: key.into(),
            modifiers: modifiers.to_vec(),
        }
    }

    fn lparam(modifiers: u32, vk: u32) -> isize {
        ((vk << 16) | modifiers) as isize
    }

    #[test]
    fn decode_splits_words() {
        let (mods, vk) = HotkeyDispatcher::decode(lparam(modifiers::WIN, 0x75));

        assert_eq!(mods, modifiers::WIN);
        assert_eq!(vk, 0x75);
    }

    #[test]
    fn default_config_binds_only_borderless() {
        // Act
        let dispatcher = HotkeyDispatcher::from_config(&HotkeysConfig::default());

        // Assert
        assert_eq!(
            dispatcher.hotkeys(),
            &[Hotkey {
                command: HotkeyCommand::ToggleBorderless,
                modifiers: modifiers::WIN,
                vk: 0x75,
            }]
        );
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let config = HotkeysConfig {
            borderless: binding(true, "Hyper", &[]),
            cursor: binding(true, "ScrollLock", &[Modifier::Win, Modifier::Shift]),
            mouse_lock: binding(false, "ScrollLock", &[]),
        };

        let dispatcher = HotkeyDispatcher::from_config(&config);

        assert_eq!(dispatcher.hotkeys().len(), 1);
        assert_eq!(dispatcher.hotkeys()[0].command, HotkeyCommand::ToggleCursor);
        assert_eq!(
            dispatcher.hotkeys()[0].modifiers,
            modifiers::WIN | modifiers::SHIFT
        );
    }

    #[test]
    fn resolve_matches_id_and_payload() {
        // Arrange
        let dispatcher = HotkeyDispatcher::new(vec![Hotkey {
            command: HotkeyCommand::ToggleMouseLock,
            modifiers: 0,
            vk: 0x91,
        }]);

        // Act / Assert
        assert_eq!(
            dispatcher.resolve(3, lparam(0, 0x91)),
            Some(HotkeyCommand::ToggleMouseLock)
        );
        assert_eq!(dispatcher.resolve(3, lparam(modifiers::ALT, 0x91)), None);
        assert_eq!(dispatcher.resolve(1, lparam(0, 0x91)), None);
    }

    #[test]
    fn command_ids_round_trip() {
        for command in HotkeyCommand::ALL {
            assert_eq!(HotkeyCommand::from_id(command.id()), Some(command));
        }
        assert_eq!(HotkeyCommand::from_id(0), None);
    }

    #[test]
    fn mouse_lock_toggles_on_exact_match() {
        let client = Rect::new(100, 100, 800, 600);
        let desktop = Rect::new(0, 0, 1920, 1080);

        assert_eq!(mouse_lock_target(desktop, client), Some(client));
        assert_eq!(mouse_lock_target(client, client), None);
    }
}
