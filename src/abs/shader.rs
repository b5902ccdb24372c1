//! OpenGL Shaders
//!
//! This module defines the [`Shader`] and [`ShaderProgram`] structs for managing OpenGL shaders.
//! This module also provides the [`Uniform`] trait for setting uniform variables in shader
//! programs.
//!
//! Compilation and link problems never abort the program. They are logged and the builder hands
//! back whatever program object it ended up with, which then renders nothing or garbage.

use std::{fmt, path::Path, sync::Arc};

use glam::Mat4;
use glow::HasContext;

/// One programmable pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    /// The matching `GL_*_SHADER` enum.
    pub fn gl_enum(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Why a shader stage or program could not be produced.
#[derive(Debug, thiserror::Error)]
pub enum ShaderError {
    #[error("failed to read shader source {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to create {0} shader object: {1}")]
    Create(ShaderStage, String),
    #[error("failed to compile {stage} shader:\n{log}")]
    Compile { stage: ShaderStage, log: String },
    #[error("failed to create program object: {0}")]
    Program(String),
}

/// Reads a shader stage's source text from a file.
pub fn load_source(path: impl AsRef<Path>) -> Result<String, ShaderError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|source| {
        log::error!("Open file failed: {}", path.display());
        ShaderError::Read {
            path: path.display().to_string(),
            source,
        }
    })
}

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
    stage: ShaderStage,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    ///
    /// On failure the shader object is deleted and the driver's info log is returned.
    pub fn new(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Result<Self, ShaderError> {
        unsafe {
            let shader = gl
                .create_shader(stage.gl_enum())
                .map_err(|e| ShaderError::Create(stage, e))?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(ShaderError::Compile { stage, log });
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
                stage,
            })
        }
    }

    /// The stage this shader was compiled for.
    pub fn stage(&self) -> ShaderStage {
        self.stage
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// Compiles one stage, logging the failure instead of returning it.
///
/// `None` stands for the invalid stage handle: the program is still linked without it.
pub fn compile_stage(gl: &Arc<glow::Context>, stage: ShaderStage, source: &str) -> Option<Shader> {
    match Shader::new(gl, stage, source) {
        Ok(shader) => Some(shader),
        Err(err) => {
            log::error!("{err}");
            None
        }
    }
}

/// A value that can be uploaded to a uniform location.
pub trait Uniform {
    /// Writes the value to `location` of the currently bound program.
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation);
}

impl Uniform for i32 {
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_1_i32(Some(location), *self) }
    }
}

impl Uniform for Mat4 {
    fn upload(&self, gl: &glow::Context, location: &glow::UniformLocation) {
        unsafe { gl.uniform_matrix_4_f32_slice(Some(location), false, self.as_ref()) }
    }
}

/// Represents an OpenGL shader program composed of a vertex and a fragment stage.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
    linked: bool,
}

impl ShaderProgram {
    /// Compiles both stages and links them into a program.
    ///
    /// Only a failure to allocate the program object itself is returned as an error. Stage
    /// compile errors and link errors are logged, and the resulting program is returned anyway;
    /// check [`ShaderProgram::is_linked`] to find out whether it is usable.
    pub fn build(
        gl: &Arc<glow::Context>,
        vertex_source: &str,
        fragment_source: &str,
    ) -> Result<Self, ShaderError> {
        let program = unsafe { gl.create_program().map_err(ShaderError::Program)? };

        let vertex = compile_stage(gl, ShaderStage::Vertex, vertex_source);
        let fragment = compile_stage(gl, ShaderStage::Fragment, fragment_source);
        let stages: Vec<&Shader> = vertex.iter().chain(fragment.iter()).collect();

        let linked = unsafe {
            for shader in &stages {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);
            let linked = gl.get_program_link_status(program);
            if linked {
                gl.validate_program(program);
                if gl.get_program_parameter_i32(program, glow::VALIDATE_STATUS) == 0 {
                    log::warn!(
                        "shader program failed validation: {}",
                        gl.get_program_info_log(program)
                    );
                }
            } else {
                log::error!(
                    "failed to link shader program:\n{}",
                    gl.get_program_info_log(program)
                );
            }

            for shader in &stages {
                gl.detach_shader(program, shader.id);
            }
            linked
        };

        // The stage objects are deleted here, linked or not.
        drop(vertex);
        drop(fragment);

        Ok(Self {
            gl: Arc::clone(gl),
            id: program,
            linked,
        })
    }

    /// Builds a program from a vertex and a fragment shader file.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, ShaderError> {
        let vertex_source = load_source(vertex_path)?;
        let fragment_source = load_source(fragment_path)?;
        Self::build(gl, &vertex_source, &fragment_source)
    }

    /// Whether the last link succeeded.
    pub fn is_linked(&self) -> bool {
        self.linked
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Uploads `value` to the uniform called `name`. The program must be bound.
    ///
    /// The location is looked up by name on every call. Names the linker dropped or never saw
    /// are skipped.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        match unsafe { self.gl.get_uniform_location(self.id, name) } {
            Some(location) => value.upload(&self.gl, &location),
            None => log::trace!("uniform {name} is not active, skipping"),
        }
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_maps_to_gl_enum() {
        assert_eq!(ShaderStage::Vertex.gl_enum(), glow::VERTEX_SHADER);
        assert_eq!(ShaderStage::Fragment.gl_enum(), glow::FRAGMENT_SHADER);
        assert_eq!(ShaderStage::Vertex.to_string(), "vertex");
    }

    #[test]
    fn load_source_reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("basic.vert");
        std::fs::write(&path, "#version 330 core\nvoid main() {}\n").unwrap();

        let source = load_source(&path).unwrap();
        assert_eq!(source, "#version 330 core\nvoid main() {}\n");
    }

    #[test]
    fn load_source_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_source(dir.path().join("missing.frag")).unwrap_err();
        assert!(matches!(err, ShaderError::Read { .. }));
        assert!(err.to_string().contains("missing.frag"));
    }
}
