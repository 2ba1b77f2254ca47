//! OpenGL ES bindings and driver error reporting.

// Import OpenGL ES constants and types.
include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));

use self::types::GLenum;

/// Signature of `glGetError`.
pub type GetErrorFn = unsafe extern "system" fn() -> GLenum;

/// Returns the symbolic name of a `glGetError` code.
///
/// Codes outside the known set map to `"Unknown"`.
pub fn error_to_string(code: GLenum) -> &'static str {
    match code {
        NO_ERROR => "GL_NO_ERROR",
        INVALID_ENUM => "GL_INVALID_ENUM",
        INVALID_VALUE => "GL_INVALID_VALUE",
        INVALID_OPERATION => "GL_INVALID_OPERATION",
        INVALID_FRAMEBUFFER_OPERATION => "GL_INVALID_FRAMEBUFFER_OPERATION",
        OUT_OF_MEMORY => "GL_OUT_OF_MEMORY",
        STACK_OVERFLOW_KHR => "GL_STACK_OVERFLOW",
        STACK_UNDERFLOW_KHR => "GL_STACK_UNDERFLOW",
        _ => "Unknown",
    }
}

/// Corresponds to `glGetError` plus an error check.
///
/// Does nothing when `error_fn` is `None`. Any code other than `GL_NO_ERROR`
/// is a misuse of the driver by the caller and panics, naming `name` as the
/// offending call.
///
/// # Panics
///
/// On any driver error. The panic stands in for terminating the process:
/// callers must not catch it with `catch_unwind`, and `Drop` impls that
/// issue further checked calls while unwinding will abort on the second
/// panic. Build with `panic = "abort"` to terminate immediately instead.
///
/// # Safety
///
/// `error_fn` must point to the `glGetError` of the current context.
pub unsafe fn check_error(error_fn: Option<GetErrorFn>, name: &str) {
    let get_error = match error_fn {
        Some(f) => f,
        None => return,
    };
    let code = get_error();
    if code != NO_ERROR {
        error!(target: "gl", "{} (0x{:x}) after {}", error_to_string(code), code, name);
        panic!(
            "GL error {} ({}) encountered on call to {}",
            error_to_string(code),
            code,
            name,
        );
    }
}
