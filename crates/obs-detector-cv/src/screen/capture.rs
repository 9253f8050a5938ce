//! Region capture from the monitor holding the target window

use crate::error::VisionError;
use crate::frame::Frame;
use crate::traits::FrameSource;
use crate::Result;
use image::imageops;
use obs_detector_core::ScreenRegion;
use tracing::trace;
use xcap::Monitor;

/// Grabs the pixels of a screen region on every call.
#[derive(Debug, Default)]
pub struct ScreenCapturer;

impl ScreenCapturer {
    pub fn new() -> Self {
        Self
    }
}

impl FrameSource for ScreenCapturer {
    fn capture(&mut self, region: &ScreenRegion) -> Result<Frame> {
        // Window origins can sit slightly off-screen, so pick the monitor by centre
        let center_x = region.left + (region.width / 2) as i32;
        let center_y = region.top + (region.height / 2) as i32;
        let monitor = Monitor::from_point(center_x, center_y)?;

        let bounds = ScreenRegion::new(
            monitor.x()?,
            monitor.y()?,
            monitor.width()?,
            monitor.height()?,
        );
        let visible = bounds
            .intersect(region)
            .ok_or(VisionError::RegionOutOfBounds {
                region: *region,
                monitor: bounds,
            })?;

        let screenshot = monitor.capture_image().map_err(VisionError::Capture)?;

        // Monitor geometry may be in logical points while the screenshot is physical pixels
        let scale = screenshot.width() as f64 / bounds.width.max(1) as f64;
        let to_pixels = |value: i64| (value as f64 * scale).round() as u32;

        let cropped = imageops::crop_imm(
            &screenshot,
            to_pixels(visible.left as i64 - bounds.left as i64),
            to_pixels(visible.top as i64 - bounds.top as i64),
            to_pixels(visible.width as i64),
            to_pixels(visible.height as i64),
        )
        .to_image();

        trace!("Captured {}x{} from {}", cropped.width(), cropped.height(), visible);
        Frame::from_rgba(&cropped)
    }
}
