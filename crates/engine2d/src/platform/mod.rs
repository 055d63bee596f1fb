//! Platform window wrapper
//!
//! Thin layer over `minifb`: window creation, framebuffer present, and
//! keyboard polling. The window starts unopened; `initialize` actually
//! creates it, and `close` (or drop) releases it. `close` is safe to call
//! even when `initialize` was never called or failed.

use minifb::{Key, WindowOptions};
use thiserror::Error;

use crate::input::{InputState, KeyCode};

/// Platform-layer errors
#[derive(Debug, Error)]
pub enum PlatformError {
    /// Window creation failed
    #[error("window creation failed: {0}")]
    WindowCreation(String),

    /// Presenting the framebuffer failed
    #[error("framebuffer present failed: {0}")]
    Present(String),

    /// A surface dimension was zero
    #[error("invalid surface size {width}x{height}")]
    InvalidSurface {
        /// Requested width
        width: usize,
        /// Requested height
        height: usize,
    },
}

/// Keys the engine polls every frame, with their engine-side codes.
const POLLED_KEYS: [(Key, KeyCode); 11] = [
    (Key::A, KeyCode::A),
    (Key::D, KeyCode::D),
    (Key::S, KeyCode::S),
    (Key::W, KeyCode::W),
    (Key::Space, KeyCode::Space),
    (Key::Enter, KeyCode::Enter),
    (Key::Escape, KeyCode::Escape),
    (Key::Up, KeyCode::Up),
    (Key::Down, KeyCode::Down),
    (Key::Left, KeyCode::Left),
    (Key::Right, KeyCode::Right),
];

/// Native window, created lazily by `initialize`
pub struct Window {
    title: String,
    width: usize,
    height: usize,
    native: Option<minifb::Window>,
}

impl Window {
    /// Describe a window without opening it
    pub fn new(title: &str, width: usize, height: usize) -> Self {
        Self {
            title: title.to_string(),
            width,
            height,
            native: None,
        }
    }

    /// Open the native window
    pub fn initialize(&mut self) -> Result<(), PlatformError> {
        if self.width == 0 || self.height == 0 {
            return Err(PlatformError::InvalidSurface {
                width: self.width,
                height: self.height,
            });
        }
        let native = minifb::Window::new(
            &self.title,
            self.width,
            self.height,
            WindowOptions::default(),
        )
        .map_err(|e| PlatformError::WindowCreation(e.to_string()))?;
        log::info!("Opened window '{}' ({}x{})", self.title, self.width, self.height);
        self.native = Some(native);
        Ok(())
    }

    /// Whether `initialize` has succeeded and the window is still open
    pub fn is_open(&self) -> bool {
        self.native.as_ref().is_some_and(minifb::Window::is_open)
    }

    /// Surface width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Fill `input` with the current quit and keyboard state
    pub fn poll_input(&self, input: &mut InputState) {
        input.begin_frame();
        let Some(native) = &self.native else {
            return;
        };
        if !native.is_open() {
            input.request_quit();
        }
        for (native_key, code) in POLLED_KEYS {
            input.set_key(code, native.is_key_down(native_key));
        }
    }

    /// Present a packed ARGB framebuffer and pump the event queue
    pub fn present(&mut self, pixels: &[u32], width: usize, height: usize) -> Result<(), PlatformError> {
        let Some(native) = &mut self.native else {
            // Headless: nothing to present to.
            return Ok(());
        };
        native
            .update_with_buffer(pixels, width, height)
            .map_err(|e| PlatformError::Present(e.to_string()))
    }

    /// Release the native window; safe when never opened
    pub fn close(&mut self) {
        if self.native.take().is_some() {
            log::info!("Closed window '{}'", self.title);
        }
    }
}
