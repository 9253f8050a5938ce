//! Template loading utilities

use super::ReferenceTemplate;
use crate::utils::image::ImageUtils;
use crate::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};

/// Loads the reference template from a fixed path
pub struct TemplateLoader {
    path: PathBuf,
}

impl TemplateLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// `Ok(None)` when the file does not exist, an error when it exists but
    /// cannot be decoded as a grayscale image.
    pub fn load(&self) -> Result<Option<ReferenceTemplate>> {
        if !self.exists() {
            return Ok(None);
        }

        let image = ImageUtils::load_mat_grayscale(&self.path)
            .with_context(|| format!("Failed to load template: {:?}", self.path))?;

        let name = self
            .path
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| "template".to_string());

        Ok(Some(ReferenceTemplate::new(name, image)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::prelude::*;
    use std::fs;

    fn scratch_dir(name: &str) -> PathBuf {
        let unique = format!("obs-detector-{}-{}", name, std::process::id());
        let dir = std::env::temp_dir().join(unique);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_template_is_none() -> Result<()> {
        let loader = TemplateLoader::new(scratch_dir("missing").join("payline_template.png"));
        assert!(loader.load()?.is_none());
        Ok(())
    }

    #[test]
    fn test_unreadable_template_is_error() {
        let path = scratch_dir("garbage").join("payline_template.png");
        fs::write(&path, b"not an image").unwrap();

        let loader = TemplateLoader::new(&path);
        assert!(loader.exists());
        assert!(loader.load().is_err());
    }

    #[test]
    fn test_png_template_loads_as_grayscale() -> Result<()> {
        let path = scratch_dir("png").join("payline_template.png");
        let image = image::RgbImage::from_fn(12, 5, |x, _| image::Rgb([x as u8 * 20, 0, 90]));
        image.save(&path)?;

        let template = TemplateLoader::new(&path).load()?.expect("template should load");
        assert_eq!(template.name, "payline_template");
        assert_eq!(template.image.channels(), 1);
        assert_eq!((template.image.cols(), template.image.rows()), (12, 5));
        Ok(())
    }
}
