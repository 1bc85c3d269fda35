//! The live window + OpenGL context pair

use glfw::{Context, CursorMode, Glfw, GlfwReceiver, PWindow, WindowEvent, WindowMode};

use super::{WindowError, WindowSystem};
use crate::render::DebugHook;

/// Windowed-mode client size; also the minimum size in either mode.
pub const WINDOWED_SIZE: (u32, u32) = (300, 300);

const TITLE: &str = "GLFW Gears Demo";

/// The two display states the demo can be in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// Fixed-size, centered, decorated window.
    Windowed,
    /// Window covering the primary monitor at its current video mode.
    Fullscreen,
}

/// The single live window+context pair.
///
/// Field order is teardown order: the debug hook is bound to the window's
/// context and must drop before the window does.
pub struct Display {
    debug_hook: Option<DebugHook>,
    window: PWindow,
    events: GlfwReceiver<(f64, WindowEvent)>,
    mode: DisplayMode,
}

impl Display {
    /// Create the first window and make its context current.
    pub fn open(system: &mut WindowSystem, mode: DisplayMode) -> Result<Self, WindowError> {
        let (window, events) = create_window(system.glfw_mut(), None, mode)?;
        let mut display = Self {
            debug_hook: None,
            window,
            events,
            mode,
        };
        display.bring_up(system, mode);
        log::info!("display opened in {mode:?} mode");
        Ok(display)
    }

    /// Replace the window with one in `mode`, sharing the old context's
    /// objects.
    ///
    /// The old pair is untouched until the new window exists: a creation
    /// failure returns an error and leaves the display exactly as it was.
    /// On success the old context's debug hook is released while that
    /// context is still current, and the old window is destroyed only after
    /// the new context is live.
    pub fn replace(&mut self, system: &mut WindowSystem, mode: DisplayMode) -> Result<(), WindowError> {
        if mode == self.mode {
            return Ok(());
        }

        let (window, events) = create_window(system.glfw_mut(), Some(&self.window), mode)?;

        // The outgoing context is still current here: unbind its hook and
        // restore its cursor before it goes away.
        self.debug_hook.take();
        self.window.set_cursor_mode(CursorMode::Normal);

        let old = std::mem::replace(&mut self.window, window);
        self.events = events;
        self.mode = mode;
        self.bring_up(system, mode);
        drop(old);

        log::info!("display recreated in {mode:?} mode");
        Ok(())
    }

    /// Configure a freshly created window, make its context current, and
    /// install the per-context state: GL symbols, debug hook, vsync.
    fn bring_up(&mut self, system: &mut WindowSystem, mode: DisplayMode) {
        let (min_w, min_h) = WINDOWED_SIZE;
        self.window.set_size_limits(Some(min_w), Some(min_h), None, None);
        self.window.set_aspect_ratio(1, 1);
        self.window.set_key_polling(true);
        self.window.set_framebuffer_size_polling(true);

        match mode {
            DisplayMode::Fullscreen => self.window.set_cursor_mode(CursorMode::Disabled),
            DisplayMode::Windowed => {
                if let Some((monitor_w, monitor_h)) = primary_monitor_size(system.glfw_mut()) {
                    let x = (monitor_w as i32 - min_w as i32).max(0) / 2;
                    let y = (monitor_h as i32 - min_h as i32).max(0) / 2;
                    self.window.set_pos(x, y);
                }
            }
        }

        self.window.make_current();
        gl::load_with(|symbol| self.window.get_proc_address(symbol) as *const _);
        self.debug_hook = DebugHook::install();
        system.glfw_mut().set_swap_interval(glfw::SwapInterval::Sync(1));
        self.window.show();
    }

    /// Current display mode.
    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    /// Whether a close has been requested on the window.
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Flag the window to close; observed at the top of the next loop
    /// iteration.
    pub fn request_close(&mut self) {
        self.window.set_should_close(true);
    }

    /// Collect the events queued for this window since the last poll.
    pub fn drain_events(&mut self) -> Vec<(f64, WindowEvent)> {
        glfw::flush_messages(&self.events).collect()
    }

    /// Present the rendered frame.
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Current framebuffer size in pixels.
    pub fn framebuffer_size(&self) -> (i32, i32) {
        self.window.get_framebuffer_size()
    }

    /// Flip the cursor between normal and captured.
    ///
    /// Independent of the mode switch: entering fullscreen forces the cursor
    /// captured, and returning to windowed restores it to normal, regardless
    /// of earlier toggles.
    pub fn toggle_cursor(&mut self) {
        let next = match self.window.get_cursor_mode() {
            CursorMode::Normal => CursorMode::Disabled,
            _ => CursorMode::Normal,
        };
        self.window.set_cursor_mode(next);
    }
}

impl Drop for Display {
    fn drop(&mut self) {
        // The hook drops first by field order, while the context is current.
        log::info!("destroying window");
    }
}

fn create_window(
    glfw: &mut Glfw,
    shared: Option<&PWindow>,
    mode: DisplayMode,
) -> Result<(PWindow, GlfwReceiver<(f64, WindowEvent)>), WindowError> {
    match mode {
        DisplayMode::Windowed => {
            let (width, height) = WINDOWED_SIZE;
            match shared {
                Some(prev) => prev.create_shared(width, height, TITLE, WindowMode::Windowed),
                None => glfw.create_window(width, height, TITLE, WindowMode::Windowed),
            }
            .ok_or(WindowError::CreationFailed { mode })
        }
        DisplayMode::Fullscreen => glfw.with_primary_monitor(|glfw, monitor| {
            let monitor = monitor.ok_or(WindowError::NoPrimaryMonitor)?;
            let vidmode = monitor.get_video_mode().ok_or(WindowError::NoPrimaryMonitor)?;
            match shared {
                Some(prev) => prev.create_shared(
                    vidmode.width,
                    vidmode.height,
                    TITLE,
                    WindowMode::FullScreen(monitor),
                ),
                None => glfw.create_window(
                    vidmode.width,
                    vidmode.height,
                    TITLE,
                    WindowMode::FullScreen(monitor),
                ),
            }
            .ok_or(WindowError::CreationFailed { mode })
        }),
    }
}

fn primary_monitor_size(glfw: &mut Glfw) -> Option<(u32, u32)> {
    glfw.with_primary_monitor(|_, monitor| {
        let vidmode = monitor?.get_video_mode()?;
        Some((vidmode.width, vidmode.height))
    })
}
