//! The textured quad.

use std::sync::Arc;

use glam::Vec2;

use crate::{
    abs::{Mesh, ShaderError, ShaderProgram, Vertex, VertexAttribute},
    error::SetupError,
};

/// Uniform holding the model matrix.
pub const WORLD_UNIFORM: &str = "uWorldTransPos";
/// Uniform holding `projection * view`.
pub const VIEW_PROJ_UNIFORM: &str = "uViewProj";
/// Sampler uniform of the quad's texture.
pub const TEXTURE_UNIFORM: &str = "uTexture";
/// Texture unit the quad's texture is bound to.
pub const TEXTURE_UNIT: u32 = 0;

/// Interleaved `{x, y, u, v}` vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadVertex {
    pub position: Vec2,
    pub uv: Vec2,
}

impl Vertex for QuadVertex {
    const ATTRIBUTES: &'static [VertexAttribute] = &[
        // Position attribute
        VertexAttribute {
            location: 0,
            components: 2,
            offset: 0,
        },
        // UV attribute
        VertexAttribute {
            location: 1,
            components: 2,
            offset: 2 * std::mem::size_of::<f32>() as i32,
        },
    ];
}

/// A unit quad centered on the origin, counter-clockwise from the bottom left corner.
pub const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex {
        position: Vec2::new(-0.5, -0.5),
        uv: Vec2::new(0.0, 0.0),
    },
    QuadVertex {
        position: Vec2::new(0.5, -0.5),
        uv: Vec2::new(1.0, 0.0),
    },
    QuadVertex {
        position: Vec2::new(0.5, 0.5),
        uv: Vec2::new(1.0, 1.0),
    },
    QuadVertex {
        position: Vec2::new(-0.5, 0.5),
        uv: Vec2::new(0.0, 1.0),
    },
];

/// Two triangles covering [`QUAD_VERTICES`].
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

/// Uploads the quad.
pub fn quad_mesh(gl: &Arc<glow::Context>) -> Result<Mesh, SetupError> {
    Mesh::new(gl, &QUAD_VERTICES, &QUAD_INDICES, glow::TRIANGLES)
}

/// Compiles and links the quad's shader pair.
pub fn quad_program(gl: &Arc<glow::Context>) -> Result<ShaderProgram, ShaderError> {
    shader_program!(quad, gl)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_layout_is_two_vec2s() {
        assert_eq!(QuadVertex::stride(), 16);
        assert_eq!(QuadVertex::ATTRIBUTES.len(), 2);
        assert_eq!(QuadVertex::ATTRIBUTES[0].offset, 0);
        assert_eq!(QuadVertex::ATTRIBUTES[1].offset, 8);
        assert!(QuadVertex::ATTRIBUTES.iter().all(|a| a.components == 2));
    }

    #[test]
    fn indices_form_two_triangles_over_all_vertices() {
        assert_eq!(QUAD_INDICES.len(), 6);
        for i in 0..QUAD_VERTICES.len() as u32 {
            assert!(QUAD_INDICES.contains(&i));
        }
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn uvs_span_the_whole_texture() {
        let (min, max) = QUAD_VERTICES.iter().fold(
            (Vec2::splat(f32::MAX), Vec2::splat(f32::MIN)),
            |(min, max), v| (min.min(v.uv), max.max(v.uv)),
        );
        assert_eq!(min, Vec2::ZERO);
        assert_eq!(max, Vec2::ONE);
    }

    #[test]
    fn shader_sources_declare_the_uniforms() {
        let vert = include_str!("shaders/quad/vert.glsl");
        let frag = include_str!("shaders/quad/frag.glsl");
        assert!(vert.contains(WORLD_UNIFORM));
        assert!(vert.contains(VIEW_PROJ_UNIFORM));
        assert!(frag.contains(TEXTURE_UNIFORM));
    }
}
