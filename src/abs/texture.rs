//! Structs and functions for handling textures.
//!
//! The module provides [`DecodedImage`], the CPU side of an image ready for upload, and the
//! [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

use crate::error::SetupError;

/// Pixel layout used for both the internal and the source format of a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    Rgb,
    Rgba,
}

impl TextureFormat {
    /// Picks the format for an image with the given number of channels.
    ///
    /// Only three and four channel images have a direct mapping.
    pub fn from_channel_count(channels: u8) -> Option<Self> {
        match channels {
            3 => Some(TextureFormat::Rgb),
            4 => Some(TextureFormat::Rgba),
            _ => None,
        }
    }

    /// The matching `GL_RGB`/`GL_RGBA` enum.
    pub fn gl_enum(self) -> u32 {
        match self {
            TextureFormat::Rgb => glow::RGB,
            TextureFormat::Rgba => glow::RGBA,
        }
    }
}

/// An image decoded into tightly packed 8-bit rows, bottom row first.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    /// Channel count reported by the decoder, before any conversion.
    pub channels: u8,
    pub format: TextureFormat,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Flips `image` vertically and converts it to the format chosen from its channel count.
    ///
    /// The flip puts row 0 at the bottom, which is where OpenGL texture coordinates start.
    pub fn from_image(image: &DynamicImage) -> Self {
        let (width, height) = image.dimensions();
        let channels = image.color().channel_count();
        let image = image.flipv();

        let format = TextureFormat::from_channel_count(channels).unwrap_or_else(|| {
            log::warn!("image has {channels} channels, expanding to RGBA");
            TextureFormat::Rgba
        });
        let pixels = match format {
            TextureFormat::Rgb => image.to_rgb8().into_raw(),
            TextureFormat::Rgba => image.to_rgba8().into_raw(),
        };

        Self {
            width,
            height,
            channels,
            format,
            pixels,
        }
    }

    /// Opens and decodes the image file at `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| SetupError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_image(&image))
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
}

impl Texture {
    /// Uploads a decoded image as a linearly filtered 2D texture.
    pub fn new(gl: &Arc<glow::Context>, image: &DecodedImage) -> Result<Self, SetupError> {
        let format = image.format.gl_enum();
        unsafe {
            let texture = gl.create_texture().map_err(SetupError::Gpu)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            // RGB rows of odd width are not 4-byte aligned.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format as i32,
                image.width as i32,
                image.height as i32,
                0,
                format,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.pixels.as_slice())),
            );
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 4);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width: image.width,
                height: image.height,
            })
        }
    }

    /// Decodes the image at `path` and uploads it.
    pub fn load(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, SetupError> {
        let path = path.as_ref();
        let image = DecodedImage::open(path)?;
        log::info!(
            "loaded texture {} ({}x{}, {} channels)",
            path.display(),
            image.width,
            image.height,
            image.channels
        );
        Self::new(gl, &image)
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
