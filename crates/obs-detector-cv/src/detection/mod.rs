//! Colour-based detection

pub mod color;

pub use color::{ColorDetection, OrangeDetector};
