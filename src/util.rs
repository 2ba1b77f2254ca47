//! Utility functions.

use std::ffi;
use std::os::raw::c_char;

use gl::types::GLubyte;

/// Copies a NUL-terminated string returned by the driver.
///
/// Returns `None` for a null pointer.
///
/// # Safety
///
/// `ptr` must be null or point to a NUL-terminated string.
pub unsafe fn string_from_gl(ptr: *const GLubyte) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        let cstr = ffi::CStr::from_ptr(ptr as *const c_char);
        Some(cstr.to_string_lossy().into_owned())
    }
}

/// Shortens `text` to at most `max` bytes without splitting a character.
pub fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
