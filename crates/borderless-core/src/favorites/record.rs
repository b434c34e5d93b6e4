use serde::{Deserialize, Serialize};
use tracing::warn;

use super::{EdgeOffsets, FavoriteRule, MatchKind, SizeMode};
use crate::Rect;
use crate::error::Error;

/// On-disk shape of a favorite. Field names and numeric codes are kept
/// stable so existing favorites files keep loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(super) struct FavoriteRecord {
    kind: u8,
    size_mode: u8,
    search_text: String,
    offset_l: i32,
    offset_t: i32,
    offset_r: i32,
    offset_b: i32,
    should_maximize: bool,
    position_x: i32,
    position_y: i32,
    position_w: i32,
    position_h: i32,
    remove_menus: bool,
    top_most: bool,
    hide_windows_taskbar: bool,
    hide_mouse_cursor: bool,
}

impl Default for FavoriteRecord {
    fn default() -> Self {
        FavoriteRule::by_binary_name(String::new()).into()
    }
}

const KIND_BINARY: u8 = 0;
const KIND_TITLE: u8 = 1;

const SIZE_FULL_SCREEN: u8 = 0;
const SIZE_SPECIFIC: u8 = 1;
const SIZE_NO_CHANGE: u8 = 2;

impl From<FavoriteRule> for FavoriteRecord {
    fn from(rule: FavoriteRule) -> Self {
        let (kind, search_text) = match rule.match_kind {
            MatchKind::ByBinaryName(text) => (KIND_BINARY, text),
            MatchKind::ByTitleText(text) => (KIND_TITLE, text),
        };
        let size_mode = match rule.size_mode {
            SizeMode::FullScreen => SIZE_FULL_SCREEN,
            SizeMode::SpecificSize => SIZE_SPECIFIC,
            SizeMode::NoChange => SIZE_NO_CHANGE,
        };
        let o = rule.edge_offsets;
        let p = rule.explicit_position;
        Self {
            kind,
            size_mode,
            search_text,
            offset_l: o.left,
            offset_t: o.top,
            offset_r: o.right,
            offset_b: o.bottom,
            should_maximize: rule.should_maximize,
            position_x: p.x,
            position_y: p.y,
            position_w: p.width,
            position_h: p.height,
            remove_menus: rule.remove_menus,
            top_most: rule.topmost,
            hide_windows_taskbar: rule.hide_taskbar,
            hide_mouse_cursor: rule.hide_cursor,
        }
    }
}

impl TryFrom<FavoriteRecord> for FavoriteRule {
    type Error = Error;

    fn try_from(record: FavoriteRecord) -> Result<Self, Self::Error> {
        if record.search_text.is_empty() {
            return Err(Error::InvalidFavorite("empty search text".into()));
        }
        let match_kind = match record.kind {
            KIND_BINARY => MatchKind::ByBinaryName(record.search_text),
            KIND_TITLE => MatchKind::ByTitleText(record.search_text),
            other => return Err(Error::InvalidFavorite(format!("unknown kind {other}"))),
        };
        let size_mode = match record.size_mode {
            SIZE_FULL_SCREEN => SizeMode::FullScreen,
            SIZE_SPECIFIC => SizeMode::SpecificSize,
            SIZE_NO_CHANGE => SizeMode::NoChange,
            other => {
                warn!(
                    "favorite {:?} has unknown size mode {other}, using full screen",
                    match_kind.text()
                );
                SizeMode::FullScreen
            }
        };
        let rule = FavoriteRule {
            match_kind,
            size_mode,
            edge_offsets: EdgeOffsets::new(
                record.offset_l,
                record.offset_t,
                record.offset_r,
                record.offset_b,
            ),
            explicit_position: Rect::new(
                record.position_x,
                record.position_y,
                record.position_w,
                record.position_h,
            ),
            should_maximize: record.should_maximize,
            remove_menus: record.remove_menus,
            topmost: record.top_most,
            hide_taskbar: record.hide_windows_taskbar,
            hide_cursor: record.hide_mouse_cursor,
        };
        Ok(rule.normalized())
    }
}

impl Serialize for FavoriteRule {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        FavoriteRecord::from(self.clone()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FavoriteRule {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let record = FavoriteRecord::deserialize(deserializer)?;
        FavoriteRule::try_from(record).map_err(serde::de::Error::custom)
    }
}
