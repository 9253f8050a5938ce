//! Monitor loop: find the window once, then capture and count every interval

use anyhow::Result;
use crossbeam_channel::{Receiver, RecvTimeoutError};
use obs_detector_core::{DetectionCounts, MonitorConfig, ScreenRegion};
use obs_detector_cv::{
    traits::{FrameSource, WindowLocator},
    visualization, ColorDetection, DebugView, Frame, OrangeDetector, ReferenceTemplate,
    TemplateDetection, TemplateLoader, TemplateMatcher,
};
use serde::Serialize;
use std::io::Write;
use std::thread;
use tracing::{debug, info, warn};

/// Lifecycle of a monitor run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Starting,
    WindowSearch,
    Running,
    Stopped,
}

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Window region the run monitored, `None` when the window was never found
    pub region: Option<ScreenRegion>,
    pub cycles: u64,
    pub failed_captures: u64,
    pub template_loaded: bool,
}

/// Sequential capture-and-count loop.
///
/// The only way out of `Running` is a message on the interrupt channel, which is
/// checked while waiting between cycles.
pub struct Monitor<L, S, O> {
    config: MonitorConfig,
    locator: L,
    source: S,
    out: O,
    interrupt: Receiver<()>,
    state: MonitorState,
    orange: OrangeDetector,
    matcher: TemplateMatcher,
    template: Option<ReferenceTemplate>,
    view: Option<DebugView>,
}

impl<L, S, O> Monitor<L, S, O>
where
    L: WindowLocator,
    S: FrameSource,
    O: Write,
{
    pub fn new(
        config: MonitorConfig,
        locator: L,
        source: S,
        out: O,
        interrupt: Receiver<()>,
    ) -> Self {
        let orange = OrangeDetector::new(config.orange.clone());
        let matcher = TemplateMatcher::new(config.payline.clone());

        Self {
            config,
            locator,
            source,
            out,
            interrupt,
            state: MonitorState::Starting,
            orange,
            matcher,
            template: None,
            view: None,
        }
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Runs until interrupted, or returns at once when the window cannot be found.
    ///
    /// Detection and capture failures never end the run; only console write
    /// failures are returned as errors.
    pub fn run(&mut self) -> Result<RunSummary> {
        self.transition(MonitorState::Starting);
        writeln!(self.out, "OBS Detector - Press Ctrl+C to stop")?;
        self.template = self.load_template();

        let mut summary = RunSummary {
            region: None,
            cycles: 0,
            failed_captures: 0,
            template_loaded: self.template.is_some(),
        };

        self.transition(MonitorState::WindowSearch);
        let Some(region) = self.find_window() else {
            writeln!(self.out, "{} window not found!", self.config.window_title)?;
            self.out.flush()?;
            self.transition(MonitorState::Stopped);
            return Ok(summary);
        };
        summary.region = Some(region);

        self.transition(MonitorState::Running);
        loop {
            let counts = match self.source.capture(&region) {
                Ok(frame) => self.analyze(&frame),
                Err(e) => {
                    warn!("Detection error: {:#}", e);
                    summary.failed_captures += 1;
                    DetectionCounts::zero()
                }
            };
            summary.cycles += 1;
            debug!("Cycle {}: {:?}", summary.cycles, counts);

            write!(self.out, "\r{}", counts)?;
            self.out.flush()?;

            if self.wait_for_interrupt() {
                break;
            }
        }

        self.stop()?;
        Ok(summary)
    }

    fn transition(&mut self, next: MonitorState) {
        debug!("Monitor state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn load_template(&self) -> Option<ReferenceTemplate> {
        let loader = TemplateLoader::new(&self.config.payline.template_path);

        match loader.load() {
            Ok(Some(template)) => {
                let (width, height) = template.dimensions();
                info!("Loaded template {} ({}x{})", loader.path().display(), width, height);
                Some(template)
            }
            Ok(None) => {
                warn!(
                    "{} not found. Only orange detection will work.",
                    loader.path().display()
                );
                None
            }
            Err(e) => {
                warn!(
                    "Could not load template file {}: {:#}",
                    loader.path().display(),
                    e
                );
                None
            }
        }
    }

    fn find_window(&mut self) -> Option<ScreenRegion> {
        match self.locator.locate(&self.config.window_title) {
            Ok(region) => region,
            Err(e) => {
                warn!("Window error: {:#}", e);
                None
            }
        }
    }

    /// Runs both detectors; a failing detector contributes zero to the cycle.
    fn analyze(&mut self, frame: &Frame) -> DetectionCounts {
        let orange = self.orange.detect(frame).unwrap_or_else(|e| {
            warn!("Orange detection error: {:#}", e);
            ColorDetection::default()
        });

        let payline = self
            .matcher
            .detect(frame, self.template.as_ref())
            .unwrap_or_else(|e| {
                warn!("Template matching error: {:#}", e);
                TemplateDetection::default()
            });

        if self.config.debug {
            self.refresh_view(frame, &orange, &payline);
        }

        DetectionCounts::new(orange.count, payline.count)
    }

    fn refresh_view(
        &mut self,
        frame: &Frame,
        orange: &ColorDetection,
        payline: &TemplateDetection,
    ) {
        let view = self.view.get_or_insert_with(DebugView::new);

        let shown = visualization::draw_overlay(frame, [&orange.boxes, &payline.boxes])
            .and_then(|annotated| view.show(&annotated));
        if let Err(e) = shown {
            warn!("Debug view error: {:#}", e);
        }
    }

    /// `true` once an interrupt has been received
    fn wait_for_interrupt(&self) -> bool {
        match self.interrupt.recv_timeout(self.config.scan_interval) {
            Ok(()) => true,
            Err(RecvTimeoutError::Timeout) => false,
            Err(RecvTimeoutError::Disconnected) => {
                // Nothing can interrupt any more; keep the cadence
                thread::sleep(self.config.scan_interval);
                false
            }
        }
    }

    fn stop(&mut self) -> Result<()> {
        writeln!(self.out, "\nStopped")?;
        self.out.flush()?;

        if let Some(mut view) = self.view.take() {
            if let Err(e) = view.close() {
                warn!("Failed to close debug view: {:#}", e);
            }
        }

        self.transition(MonitorState::Stopped);
        Ok(())
    }
}
