//! The demo loop controller
//!
//! One single-threaded cooperative loop owns the window, the context, and
//! the renderer: poll events, apply the pending display-mode request, draw,
//! present, count the frame. Key handlers only produce intent
//! ([`DemoCommand`]); everything mutable is applied here.

use std::time::Instant;

use glfw::WindowEvent;
use thiserror::Error;

use crate::foundation::time::{FpsCounter, Timer};
use crate::input::{self, DemoCommand};
use crate::render::{GearsRenderer, RenderError};
use crate::window::{Display, DisplayMode, WindowError, WindowSystem};

/// Top-level demo failures.
#[derive(Error, Debug)]
pub enum DemoError {
    /// Window or context lifecycle failure.
    #[error(transparent)]
    Window(#[from] WindowError),

    /// GPU pipeline setup failure.
    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The gears demo: one window/context pair and the scene rendered into it.
///
/// Declaration order doubles as teardown order, on every exit path: the
/// renderer's GPU objects go while the display's context is still alive, the
/// display then releases its debug hook and window, and the window system
/// terminates GLFW last.
pub struct GearsDemo {
    renderer: GearsRenderer,
    display: Display,
    system: WindowSystem,
    pending_mode: Option<DisplayMode>,
    timer: Timer,
    fps: FpsCounter,
}

impl GearsDemo {
    /// Initialize GLFW, open the windowed display, and set up the scene.
    ///
    /// Fails fatally if GLFW or the first window cannot come up; nothing is
    /// retried.
    pub fn new() -> Result<Self, DemoError> {
        let mut system = WindowSystem::init()?;
        let display = Display::open(&mut system, DisplayMode::Windowed)?;

        let mut renderer = GearsRenderer::new();
        renderer.rebuild()?;
        let (width, height) = display.framebuffer_size();
        renderer.set_viewport(width, height);

        Ok(Self {
            renderer,
            display,
            system,
            pending_mode: None,
            timer: Timer::new(),
            fps: FpsCounter::new(Instant::now()),
        })
    }

    /// Run the loop until a close is requested.
    ///
    /// The close flag is observed once per iteration, so a request takes at
    /// most one frame to act.
    pub fn run(&mut self) -> Result<(), DemoError> {
        while !self.display.should_close() {
            self.system.poll_events();
            for (_, event) in self.display.drain_events() {
                self.handle_event(event);
            }

            // Consumed at most once per iteration, then cleared.
            if let Some(mode) = self.pending_mode.take() {
                self.switch_mode(mode)?;
            }

            let dt = self.timer.tick();
            self.renderer.render_frame(dt);
            self.display.swap_buffers();

            self.fps.frame();
            if let Some(report) = self.fps.tick(Instant::now()) {
                println!("{report}");
            }
        }

        log::info!("close requested, leaving main loop");
        Ok(())
    }

    fn handle_event(&mut self, event: WindowEvent) {
        match event {
            WindowEvent::Key(key, _, action, _) => {
                if let Some(command) = input::translate_key_event(key, action, self.display.mode())
                {
                    self.apply(command);
                }
            }
            WindowEvent::FramebufferSize(width, height) => {
                self.renderer.set_viewport(width, height);
            }
            _ => {}
        }
    }

    fn apply(&mut self, command: DemoCommand) {
        match command {
            DemoCommand::RequestClose => self.display.request_close(),
            DemoCommand::SwitchMode(mode) => self.pending_mode = Some(mode),
            DemoCommand::ToggleCursor => self.display.toggle_cursor(),
        }
    }

    /// Recreate the display in `mode` and rebuild the per-context GPU state.
    ///
    /// A creation failure leaves the old display usable but ends the run:
    /// the error is logged and propagated, not retried.
    fn switch_mode(&mut self, mode: DisplayMode) -> Result<(), DemoError> {
        if let Err(err) = self.display.replace(&mut self.system, mode) {
            log::error!("display mode switch failed: {err}");
            return Err(err.into());
        }

        self.renderer.rebuild()?;
        let (width, height) = self.display.framebuffer_size();
        self.renderer.set_viewport(width, height);
        Ok(())
    }
}
