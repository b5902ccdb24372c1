//! Module for anything related to rendering the scene.
//!
//! This module contains the quad's geometry and the shaders used to draw it.

/// Builds a [`ShaderProgram`](crate::abs::ShaderProgram) from `render/shaders/<name>/`.
///
/// Expands to a `Result<ShaderProgram, ShaderError>`; compile and link errors are only logged.
/// Only invoke it from files in this directory, the shader paths are relative.
macro_rules! shader_program {
    ($name:ident, $gl:expr) => {
        $crate::abs::ShaderProgram::build(
            $gl,
            include_str!(concat!("shaders/", stringify!($name), "/vert.glsl")),
            include_str!(concat!("shaders/", stringify!($name), "/frag.glsl")),
        )
    };
}

pub mod quad;

pub use quad::*;
