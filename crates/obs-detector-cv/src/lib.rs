//! OBS Detector Computer Vision Library
//!
//! Window lookup, screen capture, orange blob counting and PAYLINE template
//! matching on top of OpenCV.

pub mod bbox;
pub mod detection;
pub mod error;
pub mod frame;
pub mod screen;
pub mod template;
pub mod utils;
pub mod visualization;

// Re-export commonly used types
pub use bbox::{BBox, BBoxCollection};
pub use detection::{ColorDetection, OrangeDetector};
pub use error::VisionError;
pub use frame::Frame;
pub use screen::{ScreenCapturer, XcapWindowLocator};
pub use template::{ReferenceTemplate, TemplateDetection, TemplateLoader, TemplateMatcher};
pub use visualization::DebugView;

// Error handling
pub type Result<T> = anyhow::Result<T>;

/// Seams between the monitor loop and the desktop
pub mod traits {
    use super::*;
    use obs_detector_core::ScreenRegion;

    /// Trait for locating the target window on the desktop
    pub trait WindowLocator {
        /// `Ok(None)` when no window title contains `title`
        fn locate(&mut self, title: &str) -> Result<Option<ScreenRegion>>;
    }

    /// Trait for anything that can produce a frame of a screen region
    pub trait FrameSource {
        fn capture(&mut self, region: &ScreenRegion) -> Result<Frame>;
    }
}
