//! Orange blob detection by HSV thresholding and outer contours

use crate::bbox::{BBox, BBoxCollection};
use crate::frame::Frame;
use crate::Result;
use anyhow::Context;
use obs_detector_core::OrangeConfig;
use opencv::{
    core::{self, Mat, Point, Scalar, Vector},
    imgproc,
    prelude::*,
};

/// Overlay colour for accepted orange regions (RGB)
pub const ORANGE_OVERLAY: (u8, u8, u8) = (0, 255, 0);

/// Regions found in one frame
#[derive(Debug, Clone, Default)]
pub struct ColorDetection {
    pub count: usize,
    /// Bounding rectangles of the counted regions, for the debug overlay
    pub boxes: BBoxCollection,
}

/// Counts orange regions whose area lies inside the configured band.
pub struct OrangeDetector {
    config: OrangeConfig,
}

impl OrangeDetector {
    pub fn new(config: OrangeConfig) -> Self {
        Self { config }
    }

    pub fn detect(&self, frame: &Frame) -> Result<ColorDetection> {
        let mask = self.mask(frame)?;

        let mut contours: Vector<Vector<Point>> = Vector::new();
        imgproc::find_contours(
            &mask,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            Point::new(0, 0),
        )
        .context("Contour extraction failed")?;

        let mut boxes = BBoxCollection::new();
        for contour in contours.iter() {
            let area = imgproc::contour_area(&contour, false)?;
            if !self.config.accepts_area(area) {
                continue;
            }

            let rect = imgproc::bounding_rect(&contour)?;
            boxes.push(BBox::from_rect(rect, ORANGE_OVERLAY));
        }

        Ok(ColorDetection {
            count: boxes.len(),
            boxes,
        })
    }

    /// Binary mask of pixels inside the HSV band; hue uses the full 0-255 range
    pub fn mask(&self, frame: &Frame) -> Result<Mat> {
        let mut hsv = Mat::default();
        imgproc::cvt_color(frame.mat(), &mut hsv, imgproc::COLOR_BGR2HSV_FULL, 0)
            .context("HSV conversion failed")?;

        let mut mask = Mat::default();
        core::in_range(
            &hsv,
            &Self::scalar(self.config.hsv_lower),
            &Self::scalar(self.config.hsv_upper),
            &mut mask,
        )
        .context("HSV thresholding failed")?;

        Ok(mask)
    }

    fn scalar(hsv: [u8; 3]) -> Scalar {
        Scalar::new(hsv[0] as f64, hsv[1] as f64, hsv[2] as f64, 0.0)
    }
}

impl Default for OrangeDetector {
    fn default() -> Self {
        Self::new(OrangeConfig::default())
    }
}
