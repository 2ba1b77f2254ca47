//! Runtime procedure table for OpenGL ES drivers.
//!
//! A [`ProcTable`] resolves a fixed set of core and extension entry points
//! through a platform resolver (`eglGetProcAddress`, `wglGetProcAddress`,
//! ...), checks that every core entry point is present, and describes the
//! driver. Each entry point lives in a typed [`Proc`] slot; calls through a
//! slot can be followed by a `glGetError` check that panics on misuse.
//!
//! ```rust,no_run
//! # extern crate glproc;
//! # use std::os::raw::c_void;
//! # fn get_proc_address(_: &str) -> *const c_void { std::ptr::null() }
//! # fn main() {
//! use glproc::{gl, DebugResourceType, ProcTable};
//!
//! let table = ProcTable::new(|symbol| get_proc_address(symbol));
//! if !table.is_valid() {
//!     panic!("missing entry points: {:?}", table.missing_procs());
//! }
//! unsafe {
//!     table.clear_color.call(0.0, 0.0, 0.0, 1.0);
//!     table.clear.call(gl::COLOR_BUFFER_BIT);
//! }
//! table.set_debug_label(DebugResourceType::Texture, 1, "albedo");
//! # }
//! ```
//!
//! [`ProcTable`]: proc_table/struct.ProcTable.html
//! [`Proc`]: slot/struct.Proc.html

#[macro_use] extern crate log;

#[cfg(test)]
extern crate env_logger;

#[macro_use]
mod macros;
mod util;

#[cfg(test)]
mod fake;

pub mod config;
pub mod debug;
pub mod description;
pub mod framebuffer;
pub mod gl;
pub mod proc_table;
pub mod slot;

#[doc(inline)]
pub use config::Config;

#[doc(inline)]
pub use config::ErrorChecking;

#[doc(inline)]
pub use debug::DebugResourceType;

#[doc(inline)]
pub use description::Description;

#[doc(inline)]
pub use description::DescriptionError;

#[doc(inline)]
pub use description::Version;

#[doc(inline)]
pub use gl::error_to_string;

#[doc(inline)]
pub use proc_table::ProcTable;

#[doc(inline)]
pub use proc_table::Procs;

#[doc(inline)]
pub use slot::Proc;

#[doc(inline)]
pub use slot::ProcFn;
