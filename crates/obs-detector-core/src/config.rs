//! Monitor configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Immutable settings built once at startup and handed to every component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Case-sensitive substring of the target window title
    pub window_title: String,
    /// Wait between the end of one cycle and the start of the next
    pub scan_interval: Duration,
    /// Pause after raising the window so the window manager can finish activation
    pub activation_delay: Duration,
    /// Show the "Debug View" window with detection overlays
    pub debug: bool,
    pub orange: OrangeConfig,
    pub payline: PaylineConfig,
}

/// Orange blob detection configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrangeConfig {
    /// Inclusive HSV lower bound, hue on a 0-255 axis
    pub hsv_lower: [u8; 3],
    /// Inclusive HSV upper bound, hue on a 0-255 axis
    pub hsv_upper: [u8; 3],
    /// Regions must be strictly larger than this
    pub min_size: f64,
    /// Regions must be strictly smaller than this
    pub max_size: f64,
}

/// PAYLINE template matching configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaylineConfig {
    pub template_path: PathBuf,
    /// Minimum normalized correlation coefficient for an offset to count
    pub threshold: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            window_title: "OBS".to_string(),
            scan_interval: Duration::from_secs(1),
            activation_delay: Duration::from_millis(500),
            debug: false,
            orange: OrangeConfig::default(),
            payline: PaylineConfig::default(),
        }
    }
}

impl Default for OrangeConfig {
    fn default() -> Self {
        Self {
            hsv_lower: [5, 100, 100],
            hsv_upper: [20, 255, 255],
            min_size: 50.0,
            max_size: 5000.0,
        }
    }
}

impl Default for PaylineConfig {
    fn default() -> Self {
        Self {
            template_path: "payline_template.png".into(),
            threshold: 0.8,
        }
    }
}

impl MonitorConfig {
    /// Default configuration with the debug overlay switched on or off
    pub fn with_debug(debug: bool) -> Self {
        Self {
            debug,
            ..Default::default()
        }
    }
}

impl OrangeConfig {
    /// Whether a region of the given area falls inside the open size band
    pub fn accepts_area(&self, area: f64) -> bool {
        self.min_size < area && area < self.max_size
    }
}
