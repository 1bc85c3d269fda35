//! OpenGL debug-output hook

use std::ffi::{c_void, CStr};
use std::ptr;

use gl::types::{GLchar, GLenum, GLsizei, GLuint};

/// Routes OpenGL debug-output messages from the driver into the log.
///
/// A hook is bound to whichever context is current when [`install`] runs,
/// and there is at most one per context. It must be dropped while its
/// context is still current, before that context is destroyed; [`Display`]
/// field ordering and the replace sequence enforce this.
///
/// [`install`]: DebugHook::install
/// [`Display`]: crate::window::Display
pub struct DebugHook {
    _not_send: std::marker::PhantomData<*const ()>,
}

impl DebugHook {
    /// Enable debug output on the current context.
    ///
    /// Returns `None` when the driver does not expose the debug-output entry
    /// points (GL 4.3 / `KHR_debug`); the demo then runs without driver
    /// diagnostics.
    pub fn install() -> Option<Self> {
        if !gl::DebugMessageCallback::is_loaded() {
            log::debug!("GL debug output not available on this context");
            return None;
        }

        unsafe {
            gl::Enable(gl::DEBUG_OUTPUT);
            gl::Enable(gl::DEBUG_OUTPUT_SYNCHRONOUS);
            gl::DebugMessageCallback(Some(debug_message), ptr::null());
        }
        log::debug!("GL debug output enabled");
        Some(Self {
            _not_send: std::marker::PhantomData,
        })
    }
}

impl Drop for DebugHook {
    fn drop(&mut self) {
        if gl::DebugMessageCallback::is_loaded() {
            unsafe {
                gl::DebugMessageCallback(None, ptr::null());
                gl::Disable(gl::DEBUG_OUTPUT);
            }
        }
    }
}

extern "system" fn debug_message(
    source: GLenum,
    gltype: GLenum,
    id: GLuint,
    severity: GLenum,
    _length: GLsizei,
    message: *const GLchar,
    _user_param: *mut c_void,
) {
    let message = if message.is_null() {
        "<no message>".into()
    } else {
        unsafe { CStr::from_ptr(message) }.to_string_lossy()
    };

    match severity {
        gl::DEBUG_SEVERITY_HIGH => {
            log::error!("GL [src {source:#x} type {gltype:#x} id {id}]: {message}");
        }
        gl::DEBUG_SEVERITY_MEDIUM => {
            log::warn!("GL [src {source:#x} type {gltype:#x} id {id}]: {message}");
        }
        gl::DEBUG_SEVERITY_LOW => {
            log::info!("GL [src {source:#x} type {gltype:#x} id {id}]: {message}");
        }
        _ => {
            log::debug!("GL [src {source:#x} type {gltype:#x} id {id}]: {message}");
        }
    }
}
