//! Hiding the system pointer by installing a transparent cursor.

use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::visibility::VisibilityRequest;

/// Opaque OS cursor reference.
pub type CursorHandle = usize;

/// Native cursor operations.
///
/// `install` hands ownership of the cursor to the system on success;
/// every other handle returned here must eventually go to `install` or
/// `release`.
pub trait CursorHost {
    /// A private copy of the current normal pointer.
    fn copy_current(&self) -> Result<CursorHandle>;

    fn load_from_file(&self, path: &Path) -> Result<CursorHandle>;

    fn duplicate(&self, cursor: CursorHandle) -> Result<CursorHandle>;

    /// Makes `cursor` the system's normal pointer.
    fn install(&self, cursor: CursorHandle) -> Result<()>;

    fn release(&self, cursor: CursorHandle);
}

/// Tracks whether the pointer is hidden and owns the handle that
/// brings it back.
pub struct CursorVisibilityManager<C: CursorHost> {
    host: C,
    blank: Option<CursorHandle>,
    original: Option<CursorHandle>,
}

impl<C: CursorHost> CursorVisibilityManager<C> {
    pub fn new(host: C) -> Self {
        Self {
            host,
            blank: None,
            original: None,
        }
    }

    pub fn is_hidden(&self) -> bool {
        self.original.is_some()
    }

    /// Applies `request` and returns whether the pointer is visible
    /// afterwards. A failed hide leaves it visible.
    pub fn toggle(&mut self, request: VisibilityRequest) -> bool {
        let visible = !self.is_hidden();
        let desired = request.resolve(visible);
        if desired == visible {
            return visible;
        }
        if desired {
            self.show();
            return true;
        }
        match self.hide() {
            Ok(()) => {
                debug!("cursor hidden");
                false
            }
            Err(e) => {
                warn!("cursor not hidden: {e}");
                true
            }
        }
    }

    fn hide(&mut self) -> Result<()> {
        let original = self.host.copy_current()?;
        let installed = self
            .blank()
            .and_then(|blank| self.host.duplicate(blank))
            .and_then(|copy| {
                self.host.install(copy).inspect_err(|_| self.host.release(copy))
            });
        match installed {
            Ok(()) => {
                self.original = Some(original);
                Ok(())
            }
            Err(e) => {
                self.host.release(original);
                Err(e)
            }
        }
    }

    fn show(&mut self) {
        let Some(original) = self.original.take() else {
            return;
        };
        match self.host.install(original) {
            Ok(()) => debug!("cursor restored"),
            Err(e) => {
                warn!("cursor not restored: {e}");
                self.host.release(original);
            }
        }
    }

    /// The transparent cursor, loaded on first use.
    fn blank(&mut self) -> Result<CursorHandle> {
        if let Some(blank) = self.blank {
            return Ok(blank);
        }
        // The loader only reads cursor files, so the image goes through
        // a temp file that is deleted when `file` drops.
        let mut file = tempfile::Builder::new()
            .prefix("borderless-blank")
            .suffix(".cur")
            .tempfile()
            .map_err(|e| Error::io(std::env::temp_dir(), e))?;
        file.write_all(&blank_cursor_image())
            .and_then(|()| file.flush())
            .map_err(|e| Error::io(file.path(), e))?;
        let blank = self.host.load_from_file(file.path())?;
        self.blank = Some(blank);
        Ok(blank)
    }
}

impl<C: CursorHost> Drop for CursorVisibilityManager<C> {
    fn drop(&mut self) {
        self.show();
        if let Some(blank) = self.blank.take() {
            self.host.release(blank);
        }
    }
}

const CURSOR_SIZE: usize = 32;
const MASK_BYTES: usize = CURSOR_SIZE * CURSOR_SIZE / 8;

/// A 32x32 monochrome `.cur` file whose every pixel is transparent.
pub fn blank_cursor_image() -> Vec<u8> {
    const HEADER: u32 = 40;
    const PALETTE: u32 = 8;
    let image_len = HEADER + PALETTE + 2 * MASK_BYTES as u32;

    let mut out = Vec::with_capacity(22 + image_len as usize);
    // Directory: reserved, type 2 (cursor), one entry.
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    // Entry: size, colors, reserved, hotspot, length, offset.
    out.extend_from_slice(&[CURSOR_SIZE as u8, CURSOR_SIZE as u8, 2, 0]);
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&image_len.to_le_bytes());
    out.extend_from_slice(&22u32.to_le_bytes());
    // BITMAPINFOHEADER; height covers both masks.
    out.extend_from_slice(&HEADER.to_le_bytes());
    out.extend_from_slice(&(CURSOR_SIZE as i32).to_le_bytes());
    out.extend_from_slice(&(2 * CURSOR_SIZE as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&((2 * MASK_BYTES) as u32).to_le_bytes());
    out.extend_from_slice(&[0; 16]);
    // Palette: black, white.
    out.extend_from_slice(&[0, 0, 0, 0, 0xFF, 0xFF, 0xFF, 0]);
    // XOR mask clear, AND mask set: screen shows through.
    out.extend(std::iter::repeat_n(0x00, MASK_BYTES));
    out.extend(std::iter::repeat_n(0xFF, MASK_BYTES));
    out
}
