//! Bounding boxes for detection overlays
//!
//! Detectors report the rectangles behind each count so the monitor can draw them
//! without the detectors knowing anything about display.

use opencv::core::{Rect, Scalar};

/// Rectangle to outline on the debug overlay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
    /// Overlay colour (RGB)
    pub color: (u8, u8, u8),
}

impl BBox {
    pub fn new(x: i32, y: i32, width: i32, height: i32, color: (u8, u8, u8)) -> Self {
        Self {
            x,
            y,
            width,
            height,
            color,
        }
    }

    /// Create from OpenCV Rect
    pub fn from_rect(rect: Rect, color: (u8, u8, u8)) -> Self {
        Self::new(rect.x, rect.y, rect.width, rect.height, color)
    }

    /// Convert to OpenCV Rect
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Get OpenCV color scalar (BGR format)
    pub fn get_bgr_scalar(&self) -> Scalar {
        Scalar::new(
            self.color.2 as f64, // B
            self.color.1 as f64, // G
            self.color.0 as f64, // R
            255.0,
        )
    }
}

/// Boxes reported by one detector for one frame
#[derive(Debug, Clone, Default)]
pub struct BBoxCollection {
    boxes: Vec<BBox>,
}

impl BBoxCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, bbox: BBox) {
        self.boxes.push(bbox);
    }

    pub fn len(&self) -> usize {
        self.boxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boxes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BBox> {
        self.boxes.iter()
    }
}
