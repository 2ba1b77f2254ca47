//! A fake driver for tests.
//!
//! Every entry point is an `extern "system"` stub backed by thread-local
//! state, so each test thread sees its own driver.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::ffi::{CStr, CString};
use std::os::raw::c_void;
use std::{ptr, slice};

use env_logger;
use gl;
use gl::types::*;

/// Name returned by `glCreateShader`.
pub const SHADER_ID: GLuint = 42;

/// Value reported for `GL_MAX_LABEL_LENGTH_KHR` unless overridden.
pub const MAX_LABEL_LENGTH: GLint = 256;

struct State {
    pending_error: GLenum,
    error_queries: usize,
    calls: Vec<String>,
    strings: HashMap<GLenum, CString>,
    extensions: Vec<CString>,
    unavailable: HashSet<String>,
    framebuffer_binding: GLint,
    framebuffers: HashSet<GLuint>,
    status: GLenum,
    attachments: HashMap<GLenum, (GLint, GLint)>,
    dead: HashSet<GLuint>,
    max_label_length: GLint,
    labels: Vec<(GLenum, GLuint, String)>,
    debug_groups: Vec<String>,
    shader_sources: Vec<(GLuint, String)>,
}

impl State {
    fn new() -> Self {
        let mut state = State {
            pending_error: gl::NO_ERROR,
            error_queries: 0,
            calls: Vec::new(),
            strings: HashMap::new(),
            extensions: Vec::new(),
            unavailable: HashSet::new(),
            framebuffer_binding: 0,
            framebuffers: HashSet::new(),
            status: gl::FRAMEBUFFER_COMPLETE,
            attachments: HashMap::new(),
            dead: HashSet::new(),
            max_label_length: MAX_LABEL_LENGTH,
            labels: Vec::new(),
            debug_groups: Vec::new(),
            shader_sources: Vec::new(),
        };
        state.set_string(gl::VENDOR, "Fake Vendor");
        state.set_string(gl::RENDERER, "Fake Renderer");
        state.set_string(gl::VERSION, "OpenGL ES 2.0 Fake");
        state.set_string(gl::SHADING_LANGUAGE_VERSION, "OpenGL ES GLSL ES 1.00");
        state.set_extensions(&["GL_KHR_debug", "GL_OES_fake"]);
        state
    }

    fn set_string(&mut self, name: GLenum, value: &str) {
        self.strings.insert(name, CString::new(value).unwrap());
    }

    fn set_extensions(&mut self, extensions: &[&str]) {
        let joined = extensions.join(" ");
        self.set_string(gl::EXTENSIONS, &joined);
        self.extensions = extensions.iter().map(|ext| CString::new(*ext).unwrap()).collect();
    }
}

thread_local! {
    static STATE: RefCell<State> = RefCell::new(State::new());
}

fn with<T, F: FnOnce(&mut State) -> T>(f: F) -> T {
    STATE.with(|state| f(&mut state.borrow_mut()))
}

fn record(name: &str) {
    with(|state| state.calls.push(name.to_string()));
}

// Configuration

/// Restores the default driver.
///
/// Also installs a test logger, so `RUST_LOG=gl=trace` shows every call.
pub fn reset() {
    let _ = env_logger::builder().is_test(true).try_init();
    with(|state| *state = State::new());
}

/// Queues an error for the next `glGetError`.
pub fn set_error(code: GLenum) {
    with(|state| state.pending_error = code);
}

/// Overrides a `glGetString` value.
pub fn set_string(name: GLenum, value: &str) {
    with(|state| state.set_string(name, value));
}

/// Makes `glGetString` return null for `name`.
pub fn remove_string(name: GLenum) {
    with(|state| {
        state.strings.remove(&name);
    });
}

/// Replaces the advertised extension list.
pub fn set_extensions(extensions: &[&str]) {
    with(|state| state.set_extensions(extensions));
}

/// Makes `resolve` return null for `symbol`.
pub fn make_unavailable(symbol: &str) {
    with(|state| {
        state.unavailable.insert(symbol.to_string());
    });
}

/// Binds `id` as the current framebuffer; non-zero names become framebuffer
/// objects.
pub fn bind_framebuffer(id: GLuint) {
    with(|state| {
        state.framebuffer_binding = id as GLint;
        if id != 0 {
            state.framebuffers.insert(id);
        }
    });
}

/// Sets the value returned by `glCheckFramebufferStatus`.
pub fn set_status(status: GLenum) {
    with(|state| state.status = status);
}

/// Attaches an object of `ty` (`GL_TEXTURE` or `GL_RENDERBUFFER`).
pub fn attach(attachment: GLenum, ty: GLenum, name: GLuint) {
    with(|state| {
        state.attachments.insert(attachment, (ty as GLint, name as GLint));
    });
}

/// Makes every `glIs*` query report `name` as deleted.
pub fn kill(name: GLuint) {
    with(|state| {
        state.dead.insert(name);
    });
}

/// Sets the value reported for `GL_MAX_LABEL_LENGTH_KHR`.
pub fn set_max_label_length(length: GLint) {
    with(|state| state.max_label_length = length);
}

// Inspection

pub fn pending_error() -> GLenum {
    with(|state| state.pending_error)
}

pub fn error_queries() -> usize {
    with(|state| state.error_queries)
}

pub fn calls() -> Vec<String> {
    with(|state| state.calls.clone())
}

pub fn clear_calls() {
    with(|state| state.calls.clear());
}

pub fn labels() -> Vec<(GLenum, GLuint, String)> {
    with(|state| state.labels.clone())
}

pub fn debug_groups() -> Vec<String> {
    with(|state| state.debug_groups.clone())
}

pub fn shader_sources() -> Vec<(GLuint, String)> {
    with(|state| state.shader_sources.clone())
}

// Resolvers

/// Resolves every declared symbol to a stub.
pub fn resolve(symbol: &str) -> *const c_void {
    if with(|state| state.unavailable.contains(symbol)) {
        return ptr::null();
    }
    match symbol {
        "glGetError" => get_error as *const c_void,
        "glClear" => clear as *const c_void,
        "glCreateShader" => create_shader as *const c_void,
        "glGetString" => get_string as *const c_void,
        "glGetStringi" => get_stringi as *const c_void,
        "glGetIntegerv" => get_integerv as *const c_void,
        "glIsFramebuffer" => is_framebuffer as *const c_void,
        "glCheckFramebufferStatus" => check_framebuffer_status as *const c_void,
        "glGetFramebufferAttachmentParameteriv" => {
            get_framebuffer_attachment_parameteriv as *const c_void
        }
        "glIsTexture" | "glIsBuffer" | "glIsProgram" | "glIsShader" => is_live as *const c_void,
        "glObjectLabelKHR" => object_label as *const c_void,
        "glPushDebugGroupKHR" => push_debug_group as *const c_void,
        "glPopDebugGroupKHR" => pop_debug_group as *const c_void,
        "glShaderSource" => shader_source as *const c_void,
        _ => not_implemented as *const c_void,
    }
}

/// Resolves nothing.
pub fn resolve_nothing(_: &str) -> *const c_void {
    ptr::null()
}

// Stubs

pub unsafe extern "system" fn get_error() -> GLenum {
    with(|state| {
        state.error_queries += 1;
        let code = state.pending_error;
        state.pending_error = gl::NO_ERROR;
        code
    })
}

unsafe extern "system" fn not_implemented() {
    panic!("called an entry point the fake driver does not implement");
}

unsafe extern "system" fn clear(_mask: GLbitfield) {
    record("glClear");
}

unsafe extern "system" fn create_shader(_ty: GLenum) -> GLuint {
    record("glCreateShader");
    SHADER_ID
}

unsafe extern "system" fn get_string(name: GLenum) -> *const GLubyte {
    record("glGetString");
    with(|state| match state.strings.get(&name) {
        Some(value) => value.as_ptr() as *const GLubyte,
        None => ptr::null(),
    })
}

unsafe extern "system" fn get_stringi(name: GLenum, index: GLuint) -> *const GLubyte {
    record("glGetStringi");
    with(|state| match (name, state.extensions.get(index as usize)) {
        (gl::EXTENSIONS, Some(value)) => value.as_ptr() as *const GLubyte,
        _ => {
            state.pending_error = gl::INVALID_VALUE;
            ptr::null()
        }
    })
}

unsafe extern "system" fn get_integerv(pname: GLenum, data: *mut GLint) {
    record("glGetIntegerv");
    let value = with(|state| match pname {
        gl::FRAMEBUFFER_BINDING => state.framebuffer_binding,
        gl::NUM_EXTENSIONS => state.extensions.len() as GLint,
        gl::MAX_LABEL_LENGTH_KHR => state.max_label_length,
        _ => 0,
    });
    *data = value;
}

unsafe extern "system" fn is_framebuffer(framebuffer: GLuint) -> GLboolean {
    record("glIsFramebuffer");
    if with(|state| state.framebuffers.contains(&framebuffer)) {
        gl::TRUE
    } else {
        gl::FALSE
    }
}

unsafe extern "system" fn check_framebuffer_status(target: GLenum) -> GLenum {
    record("glCheckFramebufferStatus");
    with(|state| {
        if target == gl::FRAMEBUFFER {
            state.status
        } else {
            state.pending_error = gl::INVALID_ENUM;
            0
        }
    })
}

unsafe extern "system" fn get_framebuffer_attachment_parameteriv(
    _target: GLenum,
    attachment: GLenum,
    pname: GLenum,
    params: *mut GLint,
) {
    record("glGetFramebufferAttachmentParameteriv");
    let (ty, name) = with(|state| {
        state.attachments.get(&attachment).cloned().unwrap_or((gl::NONE as GLint, 0))
    });
    *params = match pname {
        gl::FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE => ty,
        gl::FRAMEBUFFER_ATTACHMENT_OBJECT_NAME => name,
        _ => 0,
    };
}

unsafe extern "system" fn is_live(name: GLuint) -> GLboolean {
    record("glIs*");
    if with(|state| state.dead.contains(&name)) {
        gl::FALSE
    } else {
        gl::TRUE
    }
}

unsafe fn read_string(data: *const GLchar, length: GLsizei) -> String {
    if length < 0 {
        CStr::from_ptr(data).to_string_lossy().into_owned()
    } else {
        let bytes = slice::from_raw_parts(data as *const u8, length as usize);
        String::from_utf8_lossy(bytes).into_owned()
    }
}

unsafe extern "system" fn object_label(
    identifier: GLenum,
    name: GLuint,
    length: GLsizei,
    label: *const GLchar,
) {
    record("glObjectLabelKHR");
    let label = read_string(label, length);
    with(|state| state.labels.push((identifier, name, label)));
}

unsafe extern "system" fn push_debug_group(
    _source: GLenum,
    _id: GLuint,
    length: GLsizei,
    message: *const GLchar,
) {
    record("glPushDebugGroupKHR");
    let message = read_string(message, length);
    with(|state| state.debug_groups.push(message));
}

unsafe extern "system" fn pop_debug_group() {
    record("glPopDebugGroupKHR");
    with(|state| {
        state.debug_groups.pop();
    });
}

unsafe extern "system" fn shader_source(
    shader: GLuint,
    count: GLsizei,
    strings: *const *const GLchar,
    lengths: *const GLint,
) {
    record("glShaderSource");
    let mut source = String::new();
    for i in 0..count as usize {
        let length = if lengths.is_null() { -1 } else { *lengths.add(i) };
        source.push_str(&read_string(*strings.add(i), length));
    }
    with(|state| state.shader_sources.push((shader, source)));
}
