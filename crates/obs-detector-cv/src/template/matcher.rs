//! Template matching using OpenCV normalized correlation coefficients

use super::ReferenceTemplate;
use crate::bbox::{BBox, BBoxCollection};
use crate::frame::Frame;
use crate::Result;
use anyhow::Context;
use obs_detector_core::PaylineConfig;
use opencv::{
    core::{self, Mat},
    imgproc,
    prelude::*,
};
use tracing::trace;

/// Overlay colour for matched PAYLINE offsets (RGB)
pub const PAYLINE_OVERLAY: (u8, u8, u8) = (0, 0, 255);

/// Offsets scoring at or above the threshold in one frame
#[derive(Debug, Clone, Default)]
pub struct TemplateDetection {
    pub count: usize,
    pub boxes: BBoxCollection,
}

/// Counts every offset whose TM_CCOEFF_NORMED score reaches the threshold.
///
/// Neighbouring offsets around one visual match each score highly and are each
/// counted; no suppression is applied.
pub struct TemplateMatcher {
    config: PaylineConfig,
}

impl TemplateMatcher {
    pub fn new(config: PaylineConfig) -> Self {
        Self { config }
    }

    /// Without a template nothing is computed and the count is zero.
    pub fn detect(
        &self,
        frame: &Frame,
        template: Option<&ReferenceTemplate>,
    ) -> Result<TemplateDetection> {
        let Some(template) = template else {
            return Ok(TemplateDetection::default());
        };

        let size = template.size()?;
        if size.width > frame.width() || size.height > frame.height() {
            trace!(
                "Template {}x{} larger than frame {}x{}",
                size.width,
                size.height,
                frame.width(),
                frame.height()
            );
            return Ok(TemplateDetection::default());
        }

        let gray = frame.to_grayscale()?;
        let scores = self.score_map(&gray, &template.image)?;

        let cols = scores.cols();
        let mut boxes = BBoxCollection::new();
        for (idx, score) in scores.data_typed::<f32>()?.iter().enumerate() {
            if f64::from(*score) < self.config.threshold {
                continue;
            }
            let (x, y) = (idx as i32 % cols, idx as i32 / cols);
            boxes.push(BBox::new(x, y, size.width, size.height, PAYLINE_OVERLAY));
        }

        Ok(TemplateDetection {
            count: boxes.len(),
            boxes,
        })
    }

    /// Similarity at every offset where the template lies fully inside the image
    fn score_map(&self, image: &Mat, template: &Mat) -> Result<Mat> {
        let mut result = Mat::default();
        imgproc::match_template(
            image,
            template,
            &mut result,
            imgproc::TM_CCOEFF_NORMED,
            &core::no_array(),
        )
        .context("Template matching failed")?;
        Ok(result)
    }
}

impl Default for TemplateMatcher {
    fn default() -> Self {
        Self::new(PaylineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, Luma, Rgb, RgbImage};

    /// 8px checkerboard with a bright diagonal so no two offsets look alike
    fn payline_pattern() -> GrayImage {
        GrayImage::from_fn(32, 24, |x, y| {
            if x == y {
                Luma([255])
            } else if (x / 8 + y / 8) % 2 == 0 {
                Luma([40])
            } else {
                Luma([200])
            }
        })
    }

    fn to_rgb(gray: &GrayImage) -> RgbImage {
        RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
            let v = gray.get_pixel(x, y)[0];
            Rgb([v, v, v])
        })
    }

    #[test]
    fn test_identical_frame_matches() -> Result<()> {
        let pattern = payline_pattern();
        let template = ReferenceTemplate::from_gray("payline", &pattern)?;
        let frame = Frame::from_rgb(&to_rgb(&pattern))?;

        let detection = TemplateMatcher::default().detect(&frame, Some(&template))?;
        assert_eq!(detection.count, 1);
        let only = detection.boxes.iter().next().copied();
        assert_eq!(only, Some(BBox::new(0, 0, 32, 24, PAYLINE_OVERLAY)));
        Ok(())
    }

    #[test]
    fn test_embedded_template_found_at_offset() -> Result<()> {
        let pattern = payline_pattern();
        let template = ReferenceTemplate::from_gray("payline", &pattern)?;

        let mut scene = RgbImage::from_fn(120, 90, |x, y| {
            let v = ((x * 7 + y * 13) % 251) as u8;
            Rgb([v, v, v])
        });
        for (x, y, pixel) in to_rgb(&pattern).enumerate_pixels() {
            scene.put_pixel(x + 50, y + 30, *pixel);
        }

        let frame = Frame::from_rgb(&scene)?;
        let detection = TemplateMatcher::default().detect(&frame, Some(&template))?;
        assert!(detection.count >= 1);
        assert!(detection
            .boxes
            .iter()
            .any(|b| (b.x, b.y, b.width, b.height) == (50, 30, 32, 24)));
        Ok(())
    }

    #[test]
    fn test_no_template_yields_zero() -> Result<()> {
        let frame = Frame::from_rgb(&to_rgb(&payline_pattern()))?;

        let detection = TemplateMatcher::default().detect(&frame, None)?;
        assert_eq!(detection.count, 0);
        assert!(detection.boxes.is_empty());
        Ok(())
    }

    #[test]
    fn test_template_larger_than_frame() -> Result<()> {
        let template = ReferenceTemplate::from_gray("payline", &payline_pattern())?;
        let frame = Frame::from_rgb(&RgbImage::new(16, 16))?;

        assert_eq!(TemplateMatcher::default().detect(&frame, Some(&template))?.count, 0);
        Ok(())
    }

    #[test]
    fn test_overlapping_offsets_are_not_suppressed() -> Result<()> {
        let pattern = payline_pattern();
        let template = ReferenceTemplate::from_gray("payline", &pattern)?;

        let mut scene = RgbImage::from_pixel(80, 60, Rgb([120, 120, 120]));
        for (x, y, pixel) in to_rgb(&pattern).enumerate_pixels() {
            scene.put_pixel(x + 20, y + 20, *pixel);
        }

        let matcher = TemplateMatcher::new(PaylineConfig {
            threshold: 0.3,
            ..PaylineConfig::default()
        });
        let detection = matcher.detect(&Frame::from_rgb(&scene)?, Some(&template))?;
        assert!(detection.count > 1);
        Ok(())
    }

    #[test]
    fn test_smooth_template_counts_neighbouring_offsets_at_default_threshold() -> Result<()> {
        let blob = GrayImage::from_fn(21, 21, |x, y| {
            let (dx, dy) = (x as f64 - 10.0, y as f64 - 10.0);
            Luma([(255.0 * (-(dx * dx + dy * dy) / 32.0).exp()).round() as u8])
        });
        let template = ReferenceTemplate::from_gray("payline", &blob)?;

        let mut scene = RgbImage::new(80, 60);
        for (x, y, pixel) in to_rgb(&blob).enumerate_pixels() {
            scene.put_pixel(x + 30, y + 20, *pixel);
        }

        let frame = Frame::from_rgb(&scene)?;
        let detection = TemplateMatcher::default().detect(&frame, Some(&template))?;
        assert!(detection.count > 1);
        assert_eq!(detection.count, detection.boxes.len());
        assert!(detection.boxes.iter().any(|b| (b.x, b.y) == (30, 20)));
        assert!(detection.boxes.iter().any(|b| (b.x, b.y) == (31, 20)));
        Ok(())
    }
}
