//! Watches the OBS window and reports orange blob and PAYLINE counts.

pub mod monitor;

pub use monitor::{Monitor, MonitorState, RunSummary};
