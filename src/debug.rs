//! Debug labels and groups via `GL_KHR_debug`.
//!
//! Everything here is advisory: when the extension is missing the calls do
//! nothing.

use gl;
use gl::types::*;
use proc_table::ProcTable;
use util;

/// Kinds of driver object that may carry a label.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum DebugResourceType {
    Texture,
    Buffer,
    Program,
    Shader,
}

impl DebugResourceType {
    /// Returns the `glObjectLabelKHR` identifier.
    pub fn as_gl_enum(self) -> GLenum {
        match self {
            DebugResourceType::Texture => gl::TEXTURE,
            DebugResourceType::Buffer => gl::BUFFER_KHR,
            DebugResourceType::Program => gl::PROGRAM_KHR,
            DebugResourceType::Shader => gl::SHADER_KHR,
        }
    }
}

impl ProcTable {
    /// Whether [`set_debug_label`] will reach the driver.
    ///
    /// [`set_debug_label`]: #method.set_debug_label
    pub fn supports_debug_labels(&self) -> bool {
        self.is_valid()
            && self.get_description().map_or(false, |d| d.has_debug_extension())
            && self.procs.object_label_khr.is_available()
    }

    /// Attaches `label` to the driver object `name` for debuggers and
    /// capture tools.
    ///
    /// A silent no-op when labeling is unsupported or the object is not
    /// live. Labels longer than `GL_MAX_LABEL_LENGTH_KHR - 1` bytes are
    /// truncated.
    pub fn set_debug_label(&self, ty: DebugResourceType, name: GLuint, label: &str) {
        if !self.supports_debug_labels() {
            return;
        }
        if !self.resource_is_live(ty, name) {
            trace!(target: "gl", "not labeling dead {:?} {}", ty, name);
            return;
        }
        let label = self.truncate_label(label);
        unsafe {
            self.procs.object_label_khr.call(
                ty.as_gl_enum(),
                name,
                label.len() as GLsizei,
                label.as_ptr() as *const GLchar,
            );
        }
    }

    /// Opens a named debug group; pair with [`pop_debug_group`].
    ///
    /// [`pop_debug_group`]: #method.pop_debug_group
    pub fn push_debug_group(&self, label: &str) {
        if !self.is_valid() || !self.procs.push_debug_group_khr.is_available() {
            return;
        }
        let label = self.truncate_label(label);
        unsafe {
            self.procs.push_debug_group_khr.call(
                gl::DEBUG_SOURCE_APPLICATION_KHR,
                0,
                label.len() as GLsizei,
                label.as_ptr() as *const GLchar,
            );
        }
    }

    /// Closes the innermost debug group.
    pub fn pop_debug_group(&self) {
        if !self.is_valid() || !self.procs.pop_debug_group_khr.is_available() {
            return;
        }
        unsafe { self.procs.pop_debug_group_khr.call() };
    }

    fn resource_is_live(&self, ty: DebugResourceType, name: GLuint) -> bool {
        let query = match ty {
            DebugResourceType::Texture => &self.procs.is_texture,
            DebugResourceType::Buffer => &self.procs.is_buffer,
            DebugResourceType::Program => &self.procs.is_program,
            DebugResourceType::Shader => &self.procs.is_shader,
        };
        query.is_available() && unsafe { query.call(name) } == gl::TRUE
    }

    fn truncate_label<'a>(&self, label: &'a str) -> &'a str {
        match self.max_label_length {
            Some(max) => util::truncate(label, max - 1),
            None => label,
        }
    }
}
