//! Window and OpenGL context lifecycle on top of GLFW
//!
//! [`WindowSystem`] owns the process-wide GLFW state; [`Display`] owns the
//! single live window+context pair, including its debug hook, and knows how
//! to replace itself for the windowed/fullscreen switch without ever leaving
//! the demo window-less.

use thiserror::Error;

mod display;
mod system;

pub use display::{Display, DisplayMode, WINDOWED_SIZE};
pub use system::WindowSystem;

/// Window and context lifecycle errors.
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialized at startup.
    #[error("GLFW initialization failed: {0:?}")]
    InitFailed(glfw::InitError),

    /// GLFW declined to create a window or its context.
    #[error("window creation failed in {mode:?} mode")]
    CreationFailed {
        /// Mode the window was requested in.
        mode: DisplayMode,
    },

    /// No primary monitor (or video mode) was available for a fullscreen
    /// request.
    #[error("no primary monitor available")]
    NoPrimaryMonitor,
}
