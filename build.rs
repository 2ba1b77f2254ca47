extern crate gl_generator;

use gl_generator::{Registry, Api, Profile, Fallbacks, StructGenerator};

fn main() {
    let out_dir = std::env::var("OUT_DIR").unwrap();
    let path = std::path::Path::new(&out_dir).join("gl_bindings.rs");
    let mut file = std::fs::File::create(path).unwrap();
    Registry::new(Api::Gles2, (3, 0), Profile::Core, Fallbacks::All, ["GL_KHR_debug"])
        .write_bindings(StructGenerator, &mut file)
        .unwrap();
}
