//! Plain data types shared by the vision crate and the monitor binary.

pub mod config;
pub mod detection;
pub mod geometry;

pub use config::{MonitorConfig, OrangeConfig, PaylineConfig};
pub use detection::DetectionCounts;
pub use geometry::ScreenRegion;
