//! # Gears Engine
//!
//! Support library for the GLFW gears demo: one window/OpenGL-context pair,
//! keyboard-driven mode switching, and the classic rotating-gears scene.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gears_engine::GearsDemo;
//!
//! fn main() -> Result<(), gears_engine::DemoError> {
//!     let mut demo = GearsDemo::new()?;
//!     demo.run()
//! }
//! ```
//!
//! The library is split along the demo's seams:
//!
//! - [`window`]: GLFW lifecycle, the live window+context pair, and the
//!   windowed/fullscreen switch
//! - [`input`]: translation of raw key events into loop commands
//! - [`render`]: gear tessellation, the OpenGL renderer, and the GL debug
//!   message hook
//! - [`foundation`]: frame timing and throughput reporting

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod foundation;
pub mod input;
pub mod render;
pub mod window;

mod demo;

pub use demo::{DemoError, GearsDemo};
