//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;

use crate::{config::DemoConfig, error::SetupError};

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    pub video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    pub gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates the window described by `config` and makes a core profile context current on it.
    pub fn new(config: &DemoConfig) -> Result<Self, SetupError> {
        let sdl = sdl2::init().map_err(SetupError::Sdl)?;
        let video_subsystem = sdl.video().map_err(SetupError::Sdl)?;

        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(config.gl_version.0, config.gl_version.1);
        #[cfg(target_os = "macos")]
        gl_attr.set_context_flags().forward_compatible().set();

        let mut builder = video_subsystem.window(&config.title, config.width, config.height);
        builder.opengl().position_centered();
        if config.hidden {
            builder.hidden();
        }
        let window = builder.build()?;

        let gl_context = window.gl_create_context().map_err(SetupError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(SetupError::Context)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        // A context without a loaded `glGetString` reports an empty version.
        let version = unsafe { gl.get_parameter_string(glow::VERSION) };
        if version.is_empty() {
            return Err(SetupError::Loader(
                "could not resolve OpenGL entry points".to_string(),
            ));
        }
        log::info!("OpenGL context: {version}");

        let event_pump = sdl.event_pump().map_err(SetupError::Sdl)?;
        let gl = Arc::new(gl);

        Ok(Self {
            sdl,
            video_subsystem,
            window,
            gl_context,
            gl,
            event_pump,
        })
    }

    /// Presents the back buffer.
    pub fn swap(&self) {
        self.window.gl_swap_window();
    }
}
