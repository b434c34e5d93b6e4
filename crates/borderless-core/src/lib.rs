pub mod config;
pub mod cursor;
pub mod engine;
pub mod environment;
pub mod error;
pub mod favorites;
pub mod hotkey;
pub mod ipc;
pub mod log;
pub mod rect;
pub mod registry;
pub mod style;
pub mod taskbar;
pub mod tracked;
pub mod transform;
pub mod visibility;
pub mod window;

#[cfg(test)]
mod fake;

pub use engine::{Engine, Platform, TickReport};
pub use error::{Error, Result};
pub use favorites::{FavoriteRule, FavoriteStore, MatchKind, SizeMode};
pub use rect::Rect;
pub use style::WindowStyles;
pub use tracked::TrackedWindow;
pub use transform::TransformResult;
pub use visibility::VisibilityRequest;
pub use window::{WindowHandle, WindowHost, WindowInfo, WindowSource};
