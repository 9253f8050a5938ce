//! Debug overlay rendering and the "Debug View" window

use crate::bbox::BBoxCollection;
use crate::frame::Frame;
use crate::Result;
use anyhow::Context;
use opencv::{core::Mat, highgui, imgproc, prelude::*};
use tracing::debug;

pub const DEBUG_WINDOW: &str = "Debug View";

const OVERLAY_THICKNESS: i32 = 2;

/// Copy of the frame with every box outlined in its class colour
pub fn draw_overlay<'a, I>(frame: &Frame, layers: I) -> Result<Mat>
where
    I: IntoIterator<Item = &'a BBoxCollection>,
{
    let mut output = frame.mat().try_clone()?;

    for bbox in layers.into_iter().flat_map(BBoxCollection::iter) {
        imgproc::rectangle(
            &mut output,
            bbox.to_rect(),
            bbox.get_bgr_scalar(),
            OVERLAY_THICKNESS,
            imgproc::LINE_8,
            0,
        )?;
    }

    Ok(output)
}

/// HighGUI window refreshed once per cycle; destroyed on close or drop.
pub struct DebugView {
    name: String,
    open: bool,
}

impl DebugView {
    pub fn new() -> Self {
        Self {
            name: DEBUG_WINDOW.to_string(),
            open: false,
        }
    }

    pub fn show(&mut self, image: &Mat) -> Result<()> {
        if !self.open {
            highgui::named_window(&self.name, highgui::WINDOW_AUTOSIZE)
                .context("Failed to create debug window")?;
            self.open = true;
        }

        highgui::imshow(&self.name, image)?;
        // Pumps the GUI event loop so the window repaints
        highgui::wait_key(1)?;
        Ok(())
    }

    pub fn close(&mut self) -> Result<()> {
        if self.open {
            self.open = false;
            highgui::destroy_window(&self.name)?;
            debug!("Closed {}", self.name);
        }
        Ok(())
    }
}

impl Default for DebugView {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for DebugView {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
