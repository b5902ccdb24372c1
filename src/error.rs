//! Errors that abort start-up.
//!
//! Anything that goes wrong before the frame loop starts is fatal; the binary logs the error
//! and exits with `-1`. Shader problems are not in here on purpose, they are only logged (see
//! [`crate::abs::shader`]).

use std::path::PathBuf;

/// A fatal failure while setting up the window, the context or the GPU resources.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("failed to initialize SDL: {0}")]
    Sdl(String),
    #[error("failed to create window: {0}")]
    Window(#[from] sdl2::video::WindowBuildError),
    #[error("failed to create OpenGL context: {0}")]
    Context(String),
    #[error("failed to load OpenGL functions: {0}")]
    Loader(String),
    #[error("failed to load image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to create GPU resource: {0}")]
    Gpu(String),
    #[error("failed to initialize debug UI: {0}")]
    Ui(String),
}
