//! Window style bitmasks.
//!
//! Bit positions match the Win32 `WS_*` / `WS_EX_*` definitions exactly.
//! They are duplicated here so the transform logic can be computed and
//! tested without the platform crate; restore depends on writing back
//! the exact values that were read.

/// Standard (`GWL_STYLE`) bits.
pub mod standard {
    pub const BORDER: u32 = 0x0080_0000;
    pub const DLG_FRAME: u32 = 0x0040_0000;
    /// Composite of [`BORDER`] and [`DLG_FRAME`].
    pub const CAPTION: u32 = BORDER | DLG_FRAME;
    pub const THICK_FRAME: u32 = 0x0004_0000;
    pub const SYSTEM_MENU: u32 = 0x0008_0000;
    /// Shares its bit with `WS_TABSTOP`.
    pub const MAXIMIZE_BOX: u32 = 0x0001_0000;
    /// Shares its bit with `WS_GROUP`.
    pub const MINIMIZE_BOX: u32 = 0x0002_0000;
    pub const DISABLED: u32 = 0x0800_0000;
    pub const VISIBLE: u32 = 0x1000_0000;
}

/// Extended (`GWL_EXSTYLE`) bits.
pub mod extended {
    pub const DLG_MODAL_FRAME: u32 = 0x0000_0001;
    pub const TOPMOST: u32 = 0x0000_0008;
    pub const TOOL_WINDOW: u32 = 0x0000_0080;
    pub const WINDOW_EDGE: u32 = 0x0000_0100;
    pub const CLIENT_EDGE: u32 = 0x0000_0200;
    pub const STATIC_EDGE: u32 = 0x0002_0000;
    pub const APP_WINDOW: u32 = 0x0004_0000;
    pub const LAYERED: u32 = 0x0008_0000;
    pub const COMPOSITED: u32 = 0x0200_0000;
}

/// Standard bits cleared to strip decorations.
pub const STANDARD_DECORATIONS: u32 = standard::CAPTION
    | standard::THICK_FRAME
    | standard::SYSTEM_MENU
    | standard::MAXIMIZE_BOX
    | standard::MINIMIZE_BOX;

/// Extended bits cleared to strip decorations.
pub const EXTENDED_DECORATIONS: u32 = extended::DLG_MODAL_FRAME
    | extended::COMPOSITED
    | extended::WINDOW_EDGE
    | extended::CLIENT_EDGE
    | extended::LAYERED
    | extended::STATIC_EDGE
    | extended::TOOL_WINDOW
    | extended::APP_WINDOW;

/// The pair of style bitmasks the window manager reads for one window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct WindowStyles {
    pub standard: u32,
    pub extended: u32,
}

impl WindowStyles {
    pub fn new(standard: u32, extended: u32) -> Self {
        Self { standard, extended }
    }

    /// Returns these styles with every decoration bit cleared.
    ///
    /// All other bits are carried through untouched.
    pub fn borderless(&self) -> Self {
        Self {
            standard: self.standard & !STANDARD_DECORATIONS,
            extended: self.extended & !EXTENDED_DECORATIONS,
        }
    }

    /// True if any standard decoration bit we would strip is still set.
    ///
    /// This is the default "targetable" test: a transformed window that
    /// regained a caption or frame was re-decorated by someone else and
    /// is worth another attempt.
    pub fn has_decorations(&self) -> bool {
        self.standard & STANDARD_DECORATIONS != 0
    }

    /// True for windows a user could sensibly make borderless.
    ///
    /// The window must have a border or caption, or at least not be a
    /// tool window, and it must not be disabled.
    pub fn is_manageable(&self) -> bool {
        let framed = self.standard & standard::CAPTION != 0;
        let tool = self.extended & extended::TOOL_WINDOW != 0;
        let disabled = self.standard & standard::DISABLED != 0;
        (framed || !tool) && !disabled
    }
}
