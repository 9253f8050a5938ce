use anyhow::{Context, Result};
use obs_detector::Monitor;
use obs_detector_core::MonitorConfig;
use obs_detector_cv::{ScreenCapturer, XcapWindowLocator};
use std::io;
use tracing::{debug, info};

fn main() -> Result<()> {
    initialize_tracing();

    let config = MonitorConfig::with_debug(cfg!(feature = "debug-view"));
    debug!("Effective config: {}", serde_json::to_string(&config)?);

    // The handler only signals; the loop notices while waiting between cycles
    let (interrupt_tx, interrupt_rx) = crossbeam_channel::bounded(1);
    ctrlc::set_handler(move || {
        let _ = interrupt_tx.try_send(());
    })
    .context("Error setting Ctrl-C handler")?;

    let locator = XcapWindowLocator::new(config.activation_delay);
    let capturer = ScreenCapturer::new();
    let stdout = io::stdout();
    let mut monitor = Monitor::new(config, locator, capturer, stdout.lock(), interrupt_rx);

    let summary = monitor.run()?;
    info!("Run summary: {}", serde_json::to_string(&summary)?);

    Ok(())
}

/// Diagnostics go to stderr so the status line on stdout stays on one line.
fn initialize_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    // Configure filter (info level by default)
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .init();
}
