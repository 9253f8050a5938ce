//! Captured frames as OpenCV matrices

use crate::error::VisionError;
use crate::utils::ImageUtils;
use crate::Result;
use image::{RgbImage, RgbaImage};
use opencv::{core::Mat, prelude::*};

/// One captured screen region in BGR pixel order.
#[derive(Debug)]
pub struct Frame {
    mat: Mat,
}

impl Frame {
    /// Wrap an existing 3-channel BGR matrix
    pub fn from_mat(mat: Mat) -> Result<Self> {
        if mat.empty() {
            return Err(VisionError::EmptyFrame.into());
        }
        if mat.channels() != 3 {
            return Err(VisionError::UnexpectedChannels(mat.channels()).into());
        }
        Ok(Self { mat })
    }

    /// Convert a screenshot buffer, dropping alpha and swapping to BGR
    pub fn from_rgba(image: &RgbaImage) -> Result<Self> {
        Self::from_mat(ImageUtils::rgba_to_bgr_mat(image)?)
    }

    pub fn from_rgb(image: &RgbImage) -> Result<Self> {
        Self::from_mat(ImageUtils::rgb_to_bgr_mat(image)?)
    }

    pub fn mat(&self) -> &Mat {
        &self.mat
    }

    pub fn width(&self) -> i32 {
        self.mat.cols()
    }

    pub fn height(&self) -> i32 {
        self.mat.rows()
    }

    /// Single-channel copy used for template matching
    pub fn to_grayscale(&self) -> Result<Mat> {
        ImageUtils::bgr_to_grayscale(&self.mat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, Rgba};
    use opencv::core::Vec3b;

    #[test]
    fn test_rgba_frame_is_bgr() -> Result<()> {
        let mut image = RgbaImage::new(4, 3);
        image.put_pixel(2, 1, Rgba([10, 20, 30, 255]));

        let frame = Frame::from_rgba(&image)?;
        assert_eq!((frame.width(), frame.height()), (4, 3));

        let pixel: Vec3b = *frame.mat().at_2d(1, 2)?;
        assert_eq!(pixel.0, [30, 20, 10]);
        Ok(())
    }

    #[test]
    fn test_grayscale_of_neutral_pixels_is_unchanged() -> Result<()> {
        let image = RgbImage::from_pixel(5, 5, Rgb([77, 77, 77]));
        let gray = Frame::from_rgb(&image)?.to_grayscale()?;

        assert_eq!(gray.channels(), 1);
        assert_eq!(*gray.at_2d::<u8>(2, 2)?, 77);
        Ok(())
    }

    #[test]
    fn test_empty_capture_is_rejected() {
        let image = RgbaImage::new(0, 0);
        assert!(Frame::from_rgba(&image).is_err());
    }
}
