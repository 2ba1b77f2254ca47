//! Framebuffer introspection.

use gl;
use gl::types::*;
use proc_table::{ProcTable, Procs};

/// Returned when not even the framebuffer binding can be queried.
pub const NO_INFORMATION: &str = "No framebuffer information available.";

/// Returned when no framebuffer object is bound.
pub const DEFAULT_FRAMEBUFFER: &str = "No framebuffer or the default window framebuffer is bound.";

/// Attachments listed by [`ProcTable::describe_current_framebuffer`].
///
/// [`ProcTable::describe_current_framebuffer`]: ../proc_table/struct.ProcTable.html#method.describe_current_framebuffer
const ATTACHMENTS: [(&str, GLenum); 3] = [
    ("Color", gl::COLOR_ATTACHMENT0),
    ("Depth", gl::DEPTH_ATTACHMENT),
    ("Stencil", gl::STENCIL_ATTACHMENT),
];

/// Returns the symbolic name of a `glCheckFramebufferStatus` result.
pub fn framebuffer_status_to_string(status: GLenum) -> &'static str {
    match status {
        gl::FRAMEBUFFER_COMPLETE => "GL_FRAMEBUFFER_COMPLETE",
        gl::FRAMEBUFFER_INCOMPLETE_ATTACHMENT => "GL_FRAMEBUFFER_INCOMPLETE_ATTACHMENT",
        gl::FRAMEBUFFER_INCOMPLETE_DIMENSIONS => "GL_FRAMEBUFFER_INCOMPLETE_DIMENSIONS",
        gl::FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT => {
            "GL_FRAMEBUFFER_INCOMPLETE_MISSING_ATTACHMENT"
        }
        gl::FRAMEBUFFER_INCOMPLETE_MULTISAMPLE => "GL_FRAMEBUFFER_INCOMPLETE_MULTISAMPLE",
        gl::FRAMEBUFFER_UNDEFINED => "GL_FRAMEBUFFER_UNDEFINED",
        gl::FRAMEBUFFER_UNSUPPORTED => "GL_FRAMEBUFFER_UNSUPPORTED",
        gl::INVALID_ENUM => "GL_INVALID_ENUM",
        _ => "Unknown FBO Error Status",
    }
}

/// Returns the symbolic name of a `GL_FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE`.
pub fn attachment_type_to_string(ty: GLenum) -> &'static str {
    match ty {
        gl::RENDERBUFFER => "GL_RENDERBUFFER",
        gl::TEXTURE => "GL_TEXTURE",
        gl::NONE => "GL_NONE",
        _ => "Unknown Type",
    }
}

fn describe_attachment(procs: &Procs, attachment: GLenum) -> String {
    let query = &procs.get_framebuffer_attachment_parameteriv;
    if !query.is_available() {
        return "unavailable".to_string();
    }
    let mut ty = gl::NONE as GLint;
    unsafe {
        query.call(
            gl::FRAMEBUFFER,
            attachment,
            gl::FRAMEBUFFER_ATTACHMENT_OBJECT_TYPE,
            &mut ty,
        );
    }
    if ty as GLenum == gl::NONE {
        return "No attachment".to_string();
    }
    let mut name: GLint = 0;
    unsafe {
        query.call(
            gl::FRAMEBUFFER,
            attachment,
            gl::FRAMEBUFFER_ATTACHMENT_OBJECT_NAME,
            &mut name,
        );
    }
    format!("{}({})", attachment_type_to_string(ty as GLenum), name)
}

impl ProcTable {
    /// Corresponds to `glCheckFramebufferStatus(GL_FRAMEBUFFER)`, or `None`
    /// when that entry point is unavailable.
    pub fn current_framebuffer_status(&self) -> Option<GLenum> {
        let check = &self.procs.check_framebuffer_status;
        if check.is_available() {
            Some(unsafe { check.call(gl::FRAMEBUFFER) })
        } else {
            None
        }
    }

    /// Whether the bound framebuffer reports `GL_FRAMEBUFFER_COMPLETE`.
    ///
    /// `false` when the status cannot be queried.
    pub fn is_current_framebuffer_complete(&self) -> bool {
        self.current_framebuffer_status() == Some(gl::FRAMEBUFFER_COMPLETE)
    }

    /// Human-readable summary of the bound framebuffer and its color, depth
    /// and stencil attachments.
    ///
    /// Parts that cannot be queried with the resolved entry points are
    /// reported as unavailable.
    pub fn describe_current_framebuffer(&self) -> String {
        let procs = &self.procs;
        if !procs.get_integerv.is_available() {
            return NO_INFORMATION.to_string();
        }

        let mut binding: GLint = 0;
        unsafe {
            procs.get_integerv.call(gl::FRAMEBUFFER_BINDING, &mut binding);
        }
        let is_object = binding > 0 && (!procs.is_framebuffer.is_available()
            || unsafe { procs.is_framebuffer.call(binding as GLuint) } == gl::TRUE);
        if !is_object {
            return DEFAULT_FRAMEBUFFER.to_string();
        }

        let status = self.current_framebuffer_status();
        let mut description = format!(
            "FBO {}: {}\n",
            binding,
            status.map(framebuffer_status_to_string).unwrap_or("status unavailable"),
        );
        if status == Some(gl::FRAMEBUFFER_COMPLETE) {
            description.push_str("Framebuffer is complete.\n");
        } else {
            description.push_str("Framebuffer is incomplete.\n");
        }
        for &(label, attachment) in ATTACHMENTS.iter() {
            description.push_str(&format!(
                "{} attachment: {}\n",
                label,
                describe_attachment(procs, attachment),
            ));
        }
        description
    }
}
