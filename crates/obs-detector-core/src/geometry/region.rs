use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Pixel rectangle on the desktop, in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenRegion {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

impl ScreenRegion {
    pub fn new(left: i32, top: i32, width: u32, height: u32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Like [`ScreenRegion::new`], but rejects rectangles with no pixels.
    pub fn try_new(left: i32, top: i32, width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("Region {}x{} at {},{} has no pixels", width, height, left, top);
        }
        Ok(Self::new(left, top, width, height))
    }

    pub fn right(&self) -> i64 {
        self.left as i64 + self.width as i64
    }

    pub fn bottom(&self) -> i64 {
        self.top as i64 + self.height as i64
    }

    /// Overlap of two regions, `None` when they do not share a pixel.
    pub fn intersect(&self, other: &ScreenRegion) -> Option<ScreenRegion> {
        let left = self.left.max(other.left);
        let top = self.top.max(other.top);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left as i64 || bottom <= top as i64 {
            return None;
        }

        Some(ScreenRegion::new(
            left,
            top,
            (right - left as i64) as u32,
            (bottom - top as i64) as u32,
        ))
    }
}

impl fmt::Display for ScreenRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.left, self.top, self.width, self.height)
    }
}
