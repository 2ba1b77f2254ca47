//! The procedure table.

use std::{fmt, ops};
use std::marker::PhantomData;
use std::os::raw::c_void;

use config::{Config, ErrorChecking};
use description::Description;
use gl;
use gl::GetErrorFn;
use gl::types::*;
use slot::Proc;

declare_procs! {
    core {
        ActiveTexture => active_texture: fn(GLenum);
        AttachShader => attach_shader: fn(GLuint, GLuint);
        BindAttribLocation => bind_attrib_location: fn(GLuint, GLuint, *const GLchar);
        BindBuffer => bind_buffer: fn(GLenum, GLuint);
        BindTexture => bind_texture: fn(GLenum, GLuint);
        BlendEquationSeparate => blend_equation_separate: fn(GLenum, GLenum);
        BlendFuncSeparate => blend_func_separate: fn(GLenum, GLenum, GLenum, GLenum);
        BufferData => buffer_data: fn(GLenum, GLsizeiptr, *const c_void, GLenum);
        CheckFramebufferStatus => check_framebuffer_status: fn(GLenum) -> GLenum;
        Clear => clear: fn(GLbitfield);
        ClearColor => clear_color: fn(GLfloat, GLfloat, GLfloat, GLfloat);
        ClearDepthf => clear_depthf: fn(GLfloat);
        ClearStencil => clear_stencil: fn(GLint);
        ColorMask => color_mask: fn(GLboolean, GLboolean, GLboolean, GLboolean);
        CompileShader => compile_shader: fn(GLuint);
        CreateProgram => create_program: fn() -> GLuint;
        CreateShader => create_shader: fn(GLenum) -> GLuint;
        CullFace => cull_face: fn(GLenum);
        DeleteBuffers => delete_buffers: fn(GLsizei, *const GLuint);
        DeleteProgram => delete_program: fn(GLuint);
        DeleteShader => delete_shader: fn(GLuint);
        DeleteTextures => delete_textures: fn(GLsizei, *const GLuint);
        DepthFunc => depth_func: fn(GLenum);
        DepthMask => depth_mask: fn(GLboolean);
        DepthRangef => depth_rangef: fn(GLfloat, GLfloat);
        DetachShader => detach_shader: fn(GLuint, GLuint);
        Disable => disable: fn(GLenum);
        DisableVertexAttribArray => disable_vertex_attrib_array: fn(GLuint);
        DrawElements => draw_elements: fn(GLenum, GLsizei, GLenum, *const c_void);
        Enable => enable: fn(GLenum);
        EnableVertexAttribArray => enable_vertex_attrib_array: fn(GLuint);
        FrontFace => front_face: fn(GLenum);
        GenBuffers => gen_buffers: fn(GLsizei, *mut GLuint);
        GenTextures => gen_textures: fn(GLsizei, *mut GLuint);
        GetActiveUniform => get_active_uniform: fn(
            GLuint, GLuint, GLsizei, *mut GLsizei, *mut GLint, *mut GLenum, *mut GLchar
        );
        GetBooleanv => get_booleanv: fn(GLenum, *mut GLboolean);
        GetError => get_error: fn() -> GLenum;
        GetFloatv => get_floatv: fn(GLenum, *mut GLfloat);
        GetFramebufferAttachmentParameteriv => get_framebuffer_attachment_parameteriv: fn(
            GLenum, GLenum, GLenum, *mut GLint
        );
        GetIntegerv => get_integerv: fn(GLenum, *mut GLint);
        GetProgramiv => get_programiv: fn(GLuint, GLenum, *mut GLint);
        GetShaderInfoLog => get_shader_info_log: fn(GLuint, GLsizei, *mut GLsizei, *mut GLchar);
        GetShaderiv => get_shaderiv: fn(GLuint, GLenum, *mut GLint);
        GetString => get_string: fn(GLenum) -> *const GLubyte;
        GetUniformLocation => get_uniform_location: fn(GLuint, *const GLchar) -> GLint;
        IsBuffer => is_buffer: fn(GLuint) -> GLboolean;
        IsFramebuffer => is_framebuffer: fn(GLuint) -> GLboolean;
        IsProgram => is_program: fn(GLuint) -> GLboolean;
        IsShader => is_shader: fn(GLuint) -> GLboolean;
        IsTexture => is_texture: fn(GLuint) -> GLboolean;
        LinkProgram => link_program: fn(GLuint);
        Scissor => scissor: fn(GLint, GLint, GLsizei, GLsizei);
        ShaderBinary => shader_binary: fn(GLsizei, *const GLuint, GLenum, *const c_void, GLsizei);
        ShaderSource => shader_source: fn(GLuint, GLsizei, *const *const GLchar, *const GLint);
        StencilFuncSeparate => stencil_func_separate: fn(GLenum, GLenum, GLint, GLuint);
        StencilMaskSeparate => stencil_mask_separate: fn(GLenum, GLuint);
        StencilOpSeparate => stencil_op_separate: fn(GLenum, GLenum, GLenum, GLenum);
        TexImage2D => tex_image_2d: fn(
            GLenum, GLint, GLint, GLsizei, GLsizei, GLint, GLenum, GLenum, *const c_void
        );
        TexParameteri => tex_parameteri: fn(GLenum, GLenum, GLint);
        Uniform1fv => uniform_1fv: fn(GLint, GLsizei, *const GLfloat);
        Uniform1i => uniform_1i: fn(GLint, GLint);
        Uniform2fv => uniform_2fv: fn(GLint, GLsizei, *const GLfloat);
        Uniform4fv => uniform_4fv: fn(GLint, GLsizei, *const GLfloat);
        UniformMatrix4fv => uniform_matrix_4fv: fn(GLint, GLsizei, GLboolean, *const GLfloat);
        UseProgram => use_program: fn(GLuint);
        VertexAttribPointer => vertex_attrib_pointer: fn(
            GLuint, GLint, GLenum, GLboolean, GLsizei, *const c_void
        );
        Viewport => viewport: fn(GLint, GLint, GLsizei, GLsizei);
    }
    extension {
        // Core in ES 3.0, absent from ES 2.0.
        GetStringi => get_stringi: fn(GLenum, GLuint) -> *const GLubyte;
        PushDebugGroupKHR => push_debug_group_khr: fn(GLenum, GLuint, GLsizei, *const GLchar);
        PopDebugGroupKHR => pop_debug_group_khr: fn();
        ObjectLabelKHR => object_label_khr: fn(GLenum, GLuint, GLsizei, *const GLchar);
    }
}

/// Resolved driver entry points for one context.
///
/// Slots are reachable through `Deref<Target = Procs>`, e.g.
/// `unsafe { table.clear.call(gl::COLOR_BUFFER_BIT) }`.
///
/// The table belongs to the thread on which its context is current, so it
/// is neither `Send` nor `Sync`.
pub struct ProcTable {
    pub(crate) procs: Procs,
    description: Option<Description>,
    /// `GL_MAX_LABEL_LENGTH_KHR`, when labeling is supported.
    pub(crate) max_label_length: Option<usize>,
    is_valid: bool,
    _context: PhantomData<*const ()>,
}

impl ProcTable {
    /// Resolves every declared entry point with the default [`Config`].
    ///
    /// `resolver` maps a symbol name such as `glClear` to its address, or
    /// to null when the driver lacks it.
    ///
    /// [`Config`]: ../config/struct.Config.html
    pub fn new<F>(resolver: F) -> Self
        where F: FnMut(&str) -> *const c_void
    {
        ProcTable::with_config(resolver, Config::default())
    }

    /// Resolves every declared entry point.
    ///
    /// A table whose core entry points do not all resolve is returned
    /// invalid rather than as an error. A driver that cannot be described
    /// leaves the table valid but without a description or debug labeling.
    pub fn with_config<F>(mut resolver: F, config: Config) -> Self
        where F: FnMut(&str) -> *const c_void
    {
        let error_fn = Proc::<GetErrorFn>::resolve("glGetError", &mut resolver, None).function();
        let (core_error_fn, extension_error_fn) = match config.error_checking {
            ErrorChecking::Disabled => (None, None),
            ErrorChecking::Core => (error_fn, None),
            ErrorChecking::All => (error_fn, error_fn),
        };
        let mut procs = Procs::resolve(&mut resolver, core_error_fn, extension_error_fn);
        procs.get_error.set_error_fn(None);

        let mut table = ProcTable {
            procs,
            description: None,
            max_label_length: None,
            is_valid: false,
            _context: PhantomData,
        };

        let missing = table.procs.missing_core_procs();
        for name in &missing {
            warn!(target: "gl", "could not resolve {}", name);
        }
        for name in table.procs.missing_extension_procs() {
            debug!(target: "gl", "{} is unavailable", name);
        }
        table.is_valid = missing.is_empty();
        if !table.is_valid {
            return table;
        }

        let description = match Description::new(&table.procs) {
            Ok(description) => description,
            Err(err) => {
                error!(target: "gl", "could not describe driver: {}", err);
                table.reset_debug_procs();
                return table;
            }
        };
        info!(target: "gl", "{}", description);

        if !description.has_debug_extension() {
            table.reset_debug_procs();
        } else if table.procs.object_label_khr.is_available() {
            let mut length: GLint = 0;
            unsafe {
                table.procs.get_integerv.call(gl::MAX_LABEL_LENGTH_KHR, &mut length);
            }
            if length > 0 {
                table.max_label_length = Some(length as usize);
            }
        }

        table.description = Some(description);
        table
    }

    fn reset_debug_procs(&mut self) {
        self.procs.push_debug_group_khr.reset();
        self.procs.pop_debug_group_khr.reset();
        self.procs.object_label_khr.reset();
    }

    /// Whether every core entry point resolved.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Core entry points that did not resolve.
    pub fn missing_procs(&self) -> Vec<&'static str> {
        self.procs.missing_core_procs()
    }

    /// The driver description; `None` when the table is invalid or the
    /// driver strings could not be parsed.
    pub fn get_description(&self) -> Option<&Description> {
        self.description.as_ref()
    }

    /// Uploads shader source bytes to `shader` with `glShaderSource`.
    ///
    /// The bytes need not be NUL-terminated.
    pub fn shader_source_mapping<M>(&self, shader: GLuint, mapping: &M)
        where M: AsRef<[u8]> + ?Sized
    {
        let bytes = mapping.as_ref();
        if bytes.len() > GLint::max_value() as usize {
            panic!("shader source of {} bytes is too long", bytes.len());
        }
        let sources = [bytes.as_ptr() as *const GLchar];
        let lengths = [bytes.len() as GLint];
        unsafe {
            self.procs.shader_source.call(shader, 1, sources.as_ptr(), lengths.as_ptr());
        }
    }

    /// Empties every slot and drops the description.
    ///
    /// Must happen before the context itself is destroyed.
    pub fn reset(&mut self) {
        self.procs.reset();
        self.description = None;
        self.max_label_length = None;
        self.is_valid = false;
    }
}

impl fmt::Debug for ProcTable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ProcTable")
            .field("is_valid", &self.is_valid)
            .field("missing_procs", &self.procs.missing_core_procs())
            .field("description", &self.description)
            .finish()
    }
}

impl ops::Deref for ProcTable {
    type Target = Procs;

    fn deref(&self) -> &Procs {
        &self.procs
    }
}

/// Gives access to [`Proc::set_error_fn`] on individual slots.
///
/// [`Proc::set_error_fn`]: ../slot/struct.Proc.html#method.set_error_fn
impl ops::DerefMut for ProcTable {
    fn deref_mut(&mut self) -> &mut Procs {
        &mut self.procs
    }
}
