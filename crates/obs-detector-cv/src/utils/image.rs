//! Conversions between `image` buffers and OpenCV matrices

use crate::error::VisionError;
use crate::Result;
use anyhow::Context;
use opencv::{
    core::Mat,
    imgcodecs::{self, IMREAD_GRAYSCALE},
    imgproc,
    prelude::*,
};
use std::path::Path;

/// Image utility functions
pub struct ImageUtils;

impl ImageUtils {
    /// Convert image::RgbaImage to a BGR Mat, discarding alpha
    pub fn rgba_to_bgr_mat(rgba_image: &image::RgbaImage) -> Result<Mat> {
        let (width, height) = rgba_image.dimensions();
        Self::convert(rgba_image.as_raw(), width, height, 4, imgproc::COLOR_RGBA2BGR)
    }

    /// Convert image::RgbImage to a BGR Mat
    pub fn rgb_to_bgr_mat(rgb_image: &image::RgbImage) -> Result<Mat> {
        let (width, height) = rgb_image.dimensions();
        Self::convert(rgb_image.as_raw(), width, height, 3, imgproc::COLOR_RGB2BGR)
    }

    /// Convert image::GrayImage to a single-channel Mat
    pub fn gray_to_mat(gray_image: &image::GrayImage) -> Result<Mat> {
        let (width, height) = gray_image.dimensions();
        Self::ensure_not_empty(width, height)?;

        let row = Mat::from_slice(gray_image.as_raw()).context("Failed to wrap image buffer")?;
        let view = row.reshape(1, height as i32).context("Failed to reshape image buffer")?;
        view.try_clone().context("Failed to copy grayscale buffer")
    }

    pub fn bgr_to_grayscale(bgr: &Mat) -> Result<Mat> {
        let mut gray = Mat::default();
        imgproc::cvt_color(bgr, &mut gray, imgproc::COLOR_BGR2GRAY, 0)
            .context("Grayscale conversion failed")?;
        Ok(gray)
    }

    /// Load image from path as a grayscale Mat
    pub fn load_mat_grayscale<P: AsRef<Path>>(path: P) -> Result<Mat> {
        let path_str = path.as_ref().to_string_lossy();

        let mat = imgcodecs::imread(&path_str, IMREAD_GRAYSCALE)
            .with_context(|| format!("Failed to load grayscale image: {}", path_str))?;

        // imread signals undecodable files with an empty matrix
        if mat.empty() {
            return Err(VisionError::TemplateUnreadable(path.as_ref().to_path_buf()).into());
        }

        Ok(mat)
    }

    /// Runs `code` over a packed 8-bit buffer with `channels` bytes per pixel
    fn convert(bytes: &[u8], width: u32, height: u32, channels: i32, code: i32) -> Result<Mat> {
        Self::ensure_not_empty(width, height)?;

        let row = Mat::from_slice(bytes).context("Failed to wrap image buffer")?;
        let src = row
            .reshape(channels, height as i32)
            .context("Failed to reshape image buffer")?;

        let mut dst = Mat::default();
        imgproc::cvt_color(&*src, &mut dst, code, 0).context("Color conversion failed")?;
        Ok(dst)
    }

    fn ensure_not_empty(width: u32, height: u32) -> Result<()> {
        if width == 0 || height == 0 {
            return Err(VisionError::EmptyFrame.into());
        }
        Ok(())
    }
}
