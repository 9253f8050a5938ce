//! Desktop access through xcap: window lookup and region capture

pub mod capture;
pub mod window;

pub use capture::ScreenCapturer;
pub use window::XcapWindowLocator;
