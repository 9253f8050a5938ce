//! PAYLINE template loading and matching

pub mod loader;
pub mod matcher;

pub use loader::TemplateLoader;
pub use matcher::{TemplateDetection, TemplateMatcher};

use crate::utils::ImageUtils;
use crate::Result;
use opencv::{
    core::{Mat, Size},
    prelude::*,
};

/// Grayscale reference image, loaded once and shared read-only by every cycle.
#[derive(Debug, Clone)]
pub struct ReferenceTemplate {
    pub name: String,
    pub image: Mat,
}

impl ReferenceTemplate {
    pub fn new(name: String, image: Mat) -> Self {
        Self { name, image }
    }

    pub fn from_gray(name: &str, image: &image::GrayImage) -> Result<Self> {
        Ok(Self::new(name.to_string(), ImageUtils::gray_to_mat(image)?))
    }

    pub fn size(&self) -> Result<Size> {
        Ok(self.image.size()?)
    }

    /// (width, height) in pixels
    pub fn dimensions(&self) -> (i32, i32) {
        (self.image.cols(), self.image.rows())
    }
}
