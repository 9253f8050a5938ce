use obs_detector_core::ScreenRegion;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by window lookup, screen capture and template loading.
#[derive(Error, Debug)]
pub enum VisionError {
    #[error("Failed to enumerate windows")]
    WindowQuery(#[source] xcap::XCapError),

    #[error("Failed to bring window '{title}' to the foreground")]
    Activation { title: String },

    #[error("Failed to capture screen")]
    Capture(#[from] xcap::XCapError),

    #[error("Region {region} does not overlap monitor {monitor}")]
    RegionOutOfBounds {
        region: ScreenRegion,
        monitor: ScreenRegion,
    },

    #[error("Captured frame has no pixels")]
    EmptyFrame,

    #[error("Frame has {0} channels, expected 3")]
    UnexpectedChannels(i32),

    #[error("Could not read template file {0:?}")]
    TemplateUnreadable(PathBuf),
}
