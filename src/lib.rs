//! A small OpenGL demo that draws one textured quad and exposes its transform through an
//! immediate-mode debug overlay.
//!
//! The [`abs`] module holds the thin OpenGL wrappers (window, shaders, meshes, textures),
//! [`transform`] turns the slider state into matrices and [`demo`] drives the frame loop.

pub mod abs;
pub mod config;
pub mod debug_ui;
pub mod demo;
pub mod error;
pub mod logging;
pub mod render;
pub mod timing;
pub mod transform;

pub use config::DemoConfig;
pub use demo::Demo;
pub use error::SetupError;
