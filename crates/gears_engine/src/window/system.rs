//! Process-wide GLFW state

use glfw::{Glfw, OpenGlProfileHint, WindowHint};

use super::WindowError;

/// Handle to the process-wide GLFW library state.
///
/// GLFW is initialized once when this is constructed, and the library
/// terminates when the handle and every window created through it have been
/// dropped. Holding at most one of these per process keeps init and teardown
/// strictly paired.
pub struct WindowSystem {
    glfw: Glfw,
}

impl WindowSystem {
    /// Initialize GLFW and apply the window-creation hints used by the demo.
    ///
    /// GLFW errors are routed into the log. Windows start hidden so they can
    /// be positioned and configured before their first frame, and a debug
    /// context is requested so the driver can report through the debug hook.
    pub fn init() -> Result<Self, WindowError> {
        let mut glfw = glfw::init(glfw::log_errors).map_err(WindowError::InitFailed)?;

        glfw.window_hint(WindowHint::Visible(false));
        glfw.window_hint(WindowHint::Resizable(true));
        glfw.window_hint(WindowHint::OpenGlDebugContext(true));
        glfw.window_hint(WindowHint::ContextVersion(3, 3));
        glfw.window_hint(WindowHint::OpenGlProfile(OpenGlProfileHint::Core));
        glfw.window_hint(WindowHint::OpenGlForwardCompat(true));

        log::info!("GLFW initialized");
        Ok(Self { glfw })
    }

    /// Pump the GLFW event queue, dispatching queued events to the
    /// per-window receivers.
    ///
    /// Returns once the queue is drained; never blocks waiting for input.
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    pub(crate) fn glfw_mut(&mut self) -> &mut Glfw {
        &mut self.glfw
    }
}

impl Drop for WindowSystem {
    fn drop(&mut self) {
        // GLFW itself terminates once the last handle is gone.
        log::info!("shutting down window system");
    }
}
