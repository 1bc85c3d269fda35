//! Gears scene rendering
//!
//! The tessellation in [`gears`] is pure geometry; [`GearsRenderer`] owns all
//! OpenGL state and is the one frame-drawing collaborator the demo loop
//! calls. [`DebugHook`] wires driver diagnostics from the current context
//! into the log.

pub mod debug;
pub mod gears;
pub mod mesh;

mod renderer;

pub use debug::DebugHook;
pub use renderer::{GearsRenderer, RenderError};
