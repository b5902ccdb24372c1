//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing static mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait, which describes their attribute layout.

use std::sync::Arc;

use glow::HasContext;

use crate::error::SetupError;

/// One float vertex attribute inside an interleaved vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// The `layout (location = N)` slot in the vertex shader.
    pub location: u32,
    /// Number of `f32` components.
    pub components: i32,
    /// Byte offset from the start of the vertex.
    pub offset: i32,
}

/// Trait that defines the layout of a vertex.
pub trait Vertex: Copy {
    /// Attributes in the order they appear in the vertex.
    const ATTRIBUTES: &'static [VertexAttribute];

    /// Distance in bytes between two consecutive vertices.
    fn stride() -> i32 {
        std::mem::size_of::<Self>() as i32
    }

    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context) {
        let stride = Self::stride();
        for attribute in Self::ATTRIBUTES {
            unsafe {
                gl.enable_vertex_attrib_array(attribute.location);
                gl.vertex_attrib_pointer_f32(
                    attribute.location,
                    attribute.components,
                    glow::FLOAT,
                    false,
                    stride,
                    attribute.offset,
                );
            }
        }
    }
}

/// Passes `created` through, or runs `release` on the objects made before it when it failed.
fn or_release<T>(created: Result<T, String>, release: impl FnOnce()) -> Result<T, SetupError> {
    created.map_err(|e| {
        release();
        SetupError::Gpu(e)
    })
}

/// Represents a mesh stored on the GPU side. The data is uploaded once and never changes.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: glow::Buffer,
    index_count: usize,
}

impl Mesh {
    /// Creates a new mesh from the given vertex and index data.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, SetupError> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(SetupError::Gpu)?;
            let vbo = or_release(gl.create_buffer(), || gl.delete_vertex_array(vao))?;
            let ebo = or_release(gl.create_buffer(), || {
                gl.delete_buffer(vbo);
                gl.delete_vertex_array(vao);
            })?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    vertices.as_ptr() as *const u8,
                    std::mem::size_of_val(vertices),
                ),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                std::slice::from_raw_parts(
                    indices.as_ptr() as *const u8,
                    std::mem::size_of_val(indices),
                ),
                glow::STATIC_DRAW,
            );

            V::vertex_attribs(gl);

            // The element buffer binding is part of the VAO, so the VAO goes first.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo,
                index_count: indices.len(),
            })
        }
    }

    /// Draws the mesh with the currently bound program.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            self.gl.draw_elements(self.draw_mode, self.index_count as i32, glow::UNSIGNED_INT, 0);
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            self.gl.delete_buffer(self.ebo);
            self.gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn failed_creation_releases_earlier_objects() {
        let released = Cell::new(false);
        let result: Result<u32, _> =
            or_release(Err("out of memory".to_string()), || released.set(true));
        assert!(matches!(result, Err(SetupError::Gpu(msg)) if msg == "out of memory"));
        assert!(released.get());
    }

    #[test]
    fn successful_creation_keeps_earlier_objects() {
        let released = Cell::new(false);
        let result = or_release(Ok(7u32), || released.set(true));
        assert_eq!(result.ok(), Some(7));
        assert!(!released.get());
    }
}
