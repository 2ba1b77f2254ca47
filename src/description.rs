//! Driver description.

use std::collections::BTreeSet;
use std::{error, fmt};

use gl;
use gl::types::*;
use proc_table::Procs;
use util;

/// The extension that provides object labels and debug groups.
pub const DEBUG_EXTENSION: &str = "GL_KHR_debug";

/// A `major.minor.patch` version triple.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Constructor.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version { major, minor, patch }
    }

    /// Parses the version out of a `GL_VERSION` or
    /// `GL_SHADING_LANGUAGE_VERSION` string.
    ///
    /// Accepts `"4.6.0 NVIDIA 535.54"`, `"OpenGL ES 3.2 Mesa"` and
    /// `"OpenGL ES GLSL ES 3.20"`. Missing components are zero.
    pub fn parse(string: &str) -> Option<Self> {
        let mut rest = string.trim_start();
        if rest.starts_with("OpenGL ES ") {
            rest = &rest["OpenGL ES ".len()..];
        }
        if rest.starts_with("GLSL ES ") {
            rest = &rest["GLSL ES ".len()..];
        }
        let token = rest.split_whitespace().next()?;
        let mut components = token.split('.').map(leading_number);
        let major = components.next().and_then(|c| c)?;
        let minor = components.next().and_then(|c| c).unwrap_or(0);
        let patch = components.next().and_then(|c| c).unwrap_or(0);
        Some(Version { major, minor, patch })
    }

    /// Whether `self` is `other` or newer.
    pub fn is_at_least(&self, other: Version) -> bool {
        *self >= other
    }
}

fn leading_number(component: &str) -> Option<u32> {
    let end = component
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(component.len());
    component[..end].parse().ok()
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Reasons a driver description could not be built.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DescriptionError {
    /// `glGetString` returned null (or is unavailable) for the named string.
    MissingString(&'static str),

    /// The `GL_VERSION` string has no recognisable version.
    UnknownGlVersion(String),

    /// The `GL_SHADING_LANGUAGE_VERSION` string has no recognisable version.
    UnknownSlVersion(String),
}

impl fmt::Display for DescriptionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            DescriptionError::MissingString(name) => write!(f, "driver did not report {}", name),
            DescriptionError::UnknownGlVersion(ref s) => write!(f, "could not determine GL version from {:?}", s),
            DescriptionError::UnknownSlVersion(ref s) => write!(f, "could not determine SL version from {:?}", s),
        }
    }
}

impl error::Error for DescriptionError {}

/// Read-only snapshot of what the driver reports about itself.
#[derive(Clone, Debug)]
pub struct Description {
    vendor: String,
    renderer: String,
    gl_version_string: String,
    sl_version_string: String,
    gl_version: Version,
    sl_version: Version,
    is_es: bool,
    extensions: BTreeSet<String>,
}

impl Description {
    /// Queries the driver through resolved slots.
    pub fn new(procs: &Procs) -> Result<Self, DescriptionError> {
        let vendor = get_string(procs, gl::VENDOR, "GL_VENDOR")?;
        let renderer = get_string(procs, gl::RENDERER, "GL_RENDERER")?;
        let gl_version_string = get_string(procs, gl::VERSION, "GL_VERSION")?;
        let sl_version_string = get_string(
            procs,
            gl::SHADING_LANGUAGE_VERSION,
            "GL_SHADING_LANGUAGE_VERSION",
        )?;

        let gl_version = match Version::parse(&gl_version_string) {
            Some(version) => version,
            None => return Err(DescriptionError::UnknownGlVersion(gl_version_string)),
        };
        let sl_version = match Version::parse(&sl_version_string) {
            Some(version) => version,
            None => return Err(DescriptionError::UnknownSlVersion(sl_version_string)),
        };
        let is_es = gl_version_string.starts_with("OpenGL ES");
        let extensions = get_extensions(procs, gl_version);

        Ok(Description {
            vendor,
            renderer,
            gl_version_string,
            sl_version_string,
            gl_version,
            sl_version,
            is_es,
            extensions,
        })
    }

    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    pub fn renderer(&self) -> &str {
        &self.renderer
    }

    /// The raw `GL_VERSION` string.
    pub fn gl_version_string(&self) -> &str {
        &self.gl_version_string
    }

    /// The raw `GL_SHADING_LANGUAGE_VERSION` string.
    pub fn sl_version_string(&self) -> &str {
        &self.sl_version_string
    }

    pub fn gl_version(&self) -> Version {
        self.gl_version
    }

    pub fn sl_version(&self) -> Version {
        self.sl_version
    }

    /// Whether the driver implements OpenGL ES rather than desktop OpenGL.
    pub fn is_es(&self) -> bool {
        self.is_es
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.contains(name)
    }

    /// Whether `GL_KHR_debug` is advertised.
    pub fn has_debug_extension(&self) -> bool {
        self.has_extension(DEBUG_EXTENSION)
    }

    /// Advertised extensions in lexical order.
    pub fn extensions(&self) -> impl Iterator<Item = &str> {
        self.extensions.iter().map(String::as_str)
    }
}

impl fmt::Display for Description {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Vendor: {}", self.vendor)?;
        writeln!(f, "Renderer: {}", self.renderer)?;
        writeln!(f, "GL Version: {} ({})", self.gl_version, self.gl_version_string)?;
        writeln!(f, "SL Version: {} ({})", self.sl_version, self.sl_version_string)?;
        writeln!(f, "ES: {}", self.is_es)?;
        write!(f, "Extensions: {}", self.extensions.len())
    }
}

fn get_string(procs: &Procs, name: GLenum, what: &'static str) -> Result<String, DescriptionError> {
    if !procs.get_string.is_available() {
        return Err(DescriptionError::MissingString(what));
    }
    let string = unsafe { util::string_from_gl(procs.get_string.call(name)) };
    string.ok_or(DescriptionError::MissingString(what))
}

/// `GL_NUM_EXTENSIONS` only exists from GL 3.0 / ES 3.0 onwards; older
/// drivers report one space separated string.
fn get_extensions(procs: &Procs, gl_version: Version) -> BTreeSet<String> {
    let indexed = gl_version.is_at_least(Version::new(3, 0, 0))
        && procs.get_stringi.is_available()
        && procs.get_integerv.is_available();
    if indexed {
        let mut count: GLint = 0;
        unsafe { procs.get_integerv.call(gl::NUM_EXTENSIONS, &mut count) };
        (0..count.max(0) as GLuint)
            .filter_map(|index| unsafe {
                util::string_from_gl(procs.get_stringi.call(gl::EXTENSIONS, index))
            })
            .collect()
    } else {
        let all = if procs.get_string.is_available() {
            unsafe { util::string_from_gl(procs.get_string.call(gl::EXTENSIONS)) }
        } else {
            None
        };
        all.map(|all| all.split_whitespace().map(String::from).collect())
            .unwrap_or_default()
    }
}
