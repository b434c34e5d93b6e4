//! Favorite rules: persisted per-application borderless profiles.
//!
//! A rule claims one window either by executable name or by exact
//! title, and carries the geometry and behavior flags applied when a
//! matching window is made borderless.

mod record;
mod store;


use crate::Rect;
use crate::tracked::TrackedWindow;

pub use store::FavoriteStore;

/// What a rule matches against. Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchKind {
    /// Executable name without extension.
    ByBinaryName(String),
    /// Full window title.
    ByTitleText(String),
}

impl MatchKind {
    pub fn text(&self) -> &str {
        match self {
            Self::ByBinaryName(text) | Self::ByTitleText(text) => text,
        }
    }

    pub fn matches(&self, window: &TrackedWindow) -> bool {
        match self {
            Self::ByBinaryName(name) => window.binary_name == *name,
            Self::ByTitleText(title) => window.title == *title,
        }
    }
}

/// How a matched window is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeMode {
    /// Fill the target frame, adjusted by the edge offsets.
    #[default]
    FullScreen,
    /// Use the rule's explicit position rectangle.
    SpecificSize,
    /// Strip decorations only.
    NoChange,
}

/// Pixel adjustments applied to a full-screen target frame.
///
/// Left/top shift the origin; right/bottom move the far edge, so a
/// negative right offset pulls the right edge inwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeOffsets {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl EdgeOffsets {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }

    /// Applies the offsets to `frame`.
    pub fn apply(&self, frame: Rect) -> Rect {
        Rect::new(
            frame.x + self.left,
            frame.y + self.top,
            frame.width - self.left + self.right,
            frame.height - self.top + self.bottom,
        )
    }
}

/// Where a matched window ends up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Leave position and size alone.
    Unchanged,
    /// Fill the given rectangle, then maximize if asked.
    Fill { rect: Rect, maximize: bool },
    /// Move to exactly this rectangle; never maximized.
    Exact(Rect),
}

/// A persisted borderless profile for one application.
///
/// Geometry fields are private so their mutual invariants hold:
/// `NoChange` never carries maximize, offsets or a position, and
/// `SpecificSize` never maximizes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteRule {
    match_kind: MatchKind,
    size_mode: SizeMode,
    edge_offsets: EdgeOffsets,
    explicit_position: Rect,
    should_maximize: bool,
    pub remove_menus: bool,
    pub topmost: bool,
    pub hide_taskbar: bool,
    pub hide_cursor: bool,
}

impl FavoriteRule {
    /// Creates a rule with default settings: full screen, maximized.
    pub fn new(match_kind: MatchKind) -> Self {
        Self {
            match_kind,
            size_mode: SizeMode::FullScreen,
            edge_offsets: EdgeOffsets::default(),
            explicit_position: Rect::default(),
            should_maximize: true,
            remove_menus: false,
            topmost: false,
            hide_taskbar: false,
            hide_cursor: false,
        }
    }

    pub fn by_binary_name(name: impl Into<String>) -> Self {
        Self::new(MatchKind::ByBinaryName(name.into()))
    }

    pub fn by_title(title: impl Into<String>) -> Self {
        Self::new(MatchKind::ByTitleText(title.into()))
    }

    pub fn match_kind(&self) -> &MatchKind {
        &self.match_kind
    }

    pub fn search_text(&self) -> &str {
        self.match_kind.text()
    }

    pub fn matches(&self, window: &TrackedWindow) -> bool {
        self.match_kind.matches(window)
    }

    pub fn size_mode(&self) -> SizeMode {
        self.size_mode
    }

    pub fn should_maximize(&self) -> bool {
        self.should_maximize
    }

    pub fn edge_offsets(&self) -> EdgeOffsets {
        self.edge_offsets
    }

    pub fn explicit_position(&self) -> Rect {
        self.explicit_position
    }

    /// Size mode as applied: `SpecificSize` without a usable size
    /// falls back to `FullScreen`.
    pub fn effective_size_mode(&self) -> SizeMode {
        match self.size_mode {
            SizeMode::SpecificSize
                if self.explicit_position.width == 0 || self.explicit_position.height == 0 =>
            {
                SizeMode::FullScreen
            }
            mode => mode,
        }
    }

    /// Computes where a matched window goes given the target frame.
    pub fn placement(&self, target_frame: Rect) -> Placement {
        match self.effective_size_mode() {
            SizeMode::NoChange => Placement::Unchanged,
            SizeMode::FullScreen => Placement::Fill {
                rect: self.edge_offsets.apply(target_frame),
                maximize: self.should_maximize,
            },
            SizeMode::SpecificSize => Placement::Exact(self.explicit_position),
        }
    }

    /// Switches size mode, clearing whatever the new mode cannot carry.
    pub fn set_size_mode(&mut self, mode: SizeMode) {
        self.size_mode = mode;
        match mode {
            SizeMode::NoChange => {
                self.should_maximize = false;
                self.edge_offsets = EdgeOffsets::default();
                self.explicit_position = Rect::default();
            }
            SizeMode::FullScreen => self.explicit_position = Rect::default(),
            SizeMode::SpecificSize => self.should_maximize = false,
        }
    }

    /// Enabling maximize forces full-screen mode.
    pub fn set_should_maximize(&mut self, maximize: bool) {
        if maximize {
            self.set_size_mode(SizeMode::FullScreen);
        }
        self.should_maximize = maximize;
    }

    /// Sets an explicit rectangle. A zero width or height leaves the
    /// rule in full-screen mode instead.
    pub fn set_explicit_position(&mut self, rect: Rect) {
        if rect.width == 0 || rect.height == 0 {
            self.set_size_mode(SizeMode::FullScreen);
        } else {
            self.set_size_mode(SizeMode::SpecificSize);
            self.explicit_position = rect;
        }
    }

    /// Sets edge offsets. Ignored unless the rule is full screen.
    pub fn set_edge_offsets(&mut self, offsets: EdgeOffsets) {
        if self.size_mode == SizeMode::FullScreen {
            self.edge_offsets = offsets;
        }
    }

    /// One-line description for list views. Title rules carry no kind
    /// tag.
    pub fn summary(&self) -> String {
        let mut out = self.search_text().to_string();
        if let MatchKind::ByBinaryName(_) = self.match_kind {
            out.push_str(" [Process]");
        }
        let flags = [
            (self.should_maximize, " [Max]"),
            (self.size_mode == SizeMode::NoChange, " [NoSize]"),
            (self.topmost, " [Top]"),
            (self.remove_menus, " [NoMenu]"),
            (self.hide_taskbar, " [NoTaskbar]"),
            (self.hide_cursor, " [NoMouse]"),
        ];
        for (set, label) in flags {
            if set {
                out.push_str(label);
            }
        }
        let o = self.edge_offsets;
        if !o.is_zero() {
            out.push_str(&format!(
                " [{}L,{}R,{}T,{}B]",
                o.left, o.right, o.top, o.bottom
            ));
        }
        let p = self.explicit_position;
        if p != Rect::default() {
            out.push_str(&format!(
                " [{}x{}-{}x{}]",
                p.x,
                p.y,
                p.right(),
                p.bottom()
            ));
        }
        out
    }

    /// Repairs combinations the invariants forbid. Used on load.
    fn normalized(mut self) -> Self {
        match self.size_mode {
            SizeMode::NoChange => self.set_size_mode(SizeMode::NoChange),
            SizeMode::SpecificSize => self.should_maximize = false,
            SizeMode::FullScreen => {}
        }
        self
    }
}
