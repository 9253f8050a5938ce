//! Window lookup by title substring

use crate::error::VisionError;
use crate::traits::WindowLocator;
use crate::Result;
use obs_detector_core::ScreenRegion;
use std::thread;
use std::time::Duration;
use tracing::{debug, info};
use xcap::Window;

/// Finds the first window whose title contains a substring and raises it.
pub struct XcapWindowLocator {
    activation_delay: Duration,
}

impl XcapWindowLocator {
    pub fn new(activation_delay: Duration) -> Self {
        Self { activation_delay }
    }
}

impl WindowLocator for XcapWindowLocator {
    fn locate(&mut self, title: &str) -> Result<Option<ScreenRegion>> {
        let windows = Window::all().map_err(VisionError::WindowQuery)?;

        // Titles that cannot be read are skipped rather than failing the search
        let Some(window) = windows
            .into_iter()
            .find(|window| window.title().is_ok_and(|t| t.contains(title)))
        else {
            info!("No window found with title containing: {}", title);
            return Ok(None);
        };

        activate(&window, title)?;
        thread::sleep(self.activation_delay);

        let region = ScreenRegion::try_new(
            window.x()?,
            window.y()?,
            window.width()?,
            window.height()?,
        )?;

        info!("Found {} window at: {}", title, region);
        Ok(Some(region))
    }
}

#[cfg(target_os = "windows")]
fn activate(window: &Window, title: &str) -> Result<()> {
    use winapi::shared::windef::HWND;
    use winapi::um::winuser::{SetForegroundWindow, ShowWindow, SW_RESTORE};

    let hwnd = window.id()? as usize as HWND;
    let minimized = window.is_minimized()?;

    // SAFETY: hwnd comes from a live window enumerated just above
    let raised = unsafe {
        if minimized {
            ShowWindow(hwnd, SW_RESTORE);
        }
        SetForegroundWindow(hwnd)
    };

    if raised == 0 {
        return Err(VisionError::Activation {
            title: title.to_string(),
        }
        .into());
    }

    debug!("Raised window {:?}", hwnd);
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn activate(window: &Window, title: &str) -> Result<()> {
    if window.is_minimized()? {
        debug!("Window '{}' is minimized; captures may be blank", title);
    }
    debug!("Foreground activation is not supported on this platform");
    Ok(())
}
