use std::sync::Arc;

use log::{info, warn};
use winit::dpi::LogicalSize;
use winit::window::{CursorGrabMode, Window as WinitWindow, WindowAttributes};

use crate::config::WindowConfig;
use crate::core::CursorSource;

/// Wrapper around the winit window with the viewer's cursor handling
pub struct Window {
    inner: Arc<WinitWindow>,
}

impl Window {
    pub fn new(window: Arc<WinitWindow>) -> Self {
        Self { inner: window }
    }

    /// Attributes for the main window
    pub fn attributes(config: &WindowConfig) -> WindowAttributes {
        WinitWindow::default_attributes()
            .with_title(config.title.clone())
            .with_inner_size(LogicalSize::new(config.width, config.height))
    }

    pub fn inner(&self) -> &Arc<WinitWindow> {
        &self.inner
    }

    pub fn request_redraw(&self) {
        self.inner.request_redraw();
    }

    pub fn inner_size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.inner.inner_size()
    }

    /// Centre of the client area in physical pixels
    pub fn center(&self) -> (f64, f64) {
        let size = self.inner_size();
        (size.width as f64 / 2.0, size.height as f64 / 2.0)
    }

    /// Hide the cursor and grab it for mouse-look. Tries a lock first and
    /// falls back to confining it; reports where mouse motion must be read
    /// from afterwards.
    pub fn capture_cursor(&self) -> CursorSource {
        let grab = match self.inner.set_cursor_grab(CursorGrabMode::Locked) {
            Ok(()) => Some(CursorGrabMode::Locked),
            Err(locked_err) => match self.inner.set_cursor_grab(CursorGrabMode::Confined) {
                Ok(()) => Some(CursorGrabMode::Confined),
                Err(confined_err) => {
                    warn!("Cursor grab unavailable (locked: {locked_err}, confined: {confined_err})");
                    None
                }
            },
        };
        let source = CursorSource::for_grab(grab);
        self.inner.set_cursor_visible(false);
        info!("Cursor grab {:?}, reading motion from {:?}", grab, source);
        source
    }
}
